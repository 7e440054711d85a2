use crate::check::verify_claim;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::objective::Measure;
use crate::solver::BoolwResult;

pub use construct::construct_decomposition;
pub use linear::LinearSolver;
pub use table::{SubsetTable, DEFAULT_EXACT_LIMIT, MAX_EXACT_VERTICES};
pub use tree::TreeSolver;

mod construct;
mod linear;
mod table;
mod tree;

pub trait ExactSolver<'a, G: BaseGraph + 'a>: Sized {
    fn with_graph(graph: &'a G, measure: Measure) -> Self;
    fn with_limit(graph: &'a G, measure: Measure, limit: usize) -> Self;
    fn graph(&self) -> &'a G;
    fn measure(&self) -> Measure;
    fn compute_table(self) -> Result<SubsetTable, BoolwError>;

    /// Optimal decomposition, checked against the table before it is returned.
    fn compute_exact(self) -> Result<BoolwResult, BoolwError> {
        let graph = self.graph();
        let measure = self.measure();
        let table = self.compute_table()?;
        let decomposition = construct_decomposition(&table)?;
        let objective_value = verify_claim(graph, &decomposition, measure, table.objective()?)?;
        Ok(BoolwResult {
            objective_value,
            decomposition,
        })
    }
}

pub fn linear_boolean_width<G: BaseGraph>(graph: &G) -> Result<BoolwResult, BoolwError> {
    LinearSolver::with_graph(graph, Measure::Width).compute_exact()
}

pub fn boolean_width<G: BaseGraph>(graph: &G) -> Result<BoolwResult, BoolwError> {
    TreeSolver::with_graph(graph, Measure::Width).compute_exact()
}

pub fn linear_boolean_cost<G: BaseGraph>(graph: &G) -> Result<BoolwResult, BoolwError> {
    LinearSolver::with_graph(graph, Measure::Cost).compute_exact()
}

pub fn boolean_cost<G: BaseGraph>(graph: &G) -> Result<BoolwResult, BoolwError> {
    TreeSolver::with_graph(graph, Measure::Cost).compute_exact()
}
