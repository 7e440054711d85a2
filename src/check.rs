use crate::booldim::boolean_dimension;
use crate::decomposition::Decomposition;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::objective::Measure;

#[cfg(feature = "log")]
use log::{info, warn};

/// Recomputes the objective of `decomposition` from scratch.
///
/// Every cut dimension is evaluated anew, nothing is cached, so the result
/// does not depend on the code that produced the decomposition.
pub fn check_decomposition<G: BaseGraph>(
    graph: &G,
    decomposition: &Decomposition,
    measure: Measure,
) -> Result<usize, BoolwError> {
    decomposition.validate(graph.universe())?;
    Ok(decomposition
        .cuts()
        .into_iter()
        .fold(0, |acc, cut| measure.aggregate(acc, boolean_dimension(graph, cut))))
}

/// Checks `decomposition` and compares the outcome with what its producer
/// claimed.
pub fn verify_claim<G: BaseGraph>(
    graph: &G,
    decomposition: &Decomposition,
    measure: Measure,
    claimed: usize,
) -> Result<usize, BoolwError> {
    let verified = check_decomposition(graph, decomposition, measure)?;
    if verified != claimed {
        #[cfg(feature = "log")]
        warn!(
            "claimed {} {} but the decomposition has {} {}",
            measure, claimed, measure, verified
        );
        return Err(BoolwError::InconsistentState(format!(
            "claimed {} {} but the decomposition has {} {}",
            measure, claimed, measure, verified
        )));
    }
    #[cfg(feature = "log")]
    info!("verified {} {}", measure, verified);
    Ok(verified)
}
