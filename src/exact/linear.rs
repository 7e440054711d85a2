use crate::error::BoolwError;
use crate::exact::table::{Combinations, SubsetTable, DEFAULT_EXACT_LIMIT};
use crate::exact::ExactSolver;
use crate::graph::BaseGraph;
use crate::objective::{Measure, Shape};

#[cfg(feature = "log")]
use log::debug;

/// Subset DP over vertex orderings.
///
/// `L(∅) = 0` and `L(A) = agg(min over x ∈ A of L(A \ {x}), bd(A))`, where
/// `agg` is `max` for width and `+` for cost. The choice stored for `A` is
/// the local index of the vertex placed last.
pub struct LinearSolver<'a, G: BaseGraph> {
    graph: &'a G,
    measure: Measure,
    limit: usize,
}

impl<'a, G: BaseGraph> ExactSolver<'a, G> for LinearSolver<'a, G> {
    fn with_graph(graph: &'a G, measure: Measure) -> Self {
        Self {
            graph,
            measure,
            limit: DEFAULT_EXACT_LIMIT,
        }
    }

    fn with_limit(graph: &'a G, measure: Measure, limit: usize) -> Self {
        Self {
            graph,
            measure,
            limit,
        }
    }

    fn graph(&self) -> &'a G {
        self.graph
    }

    fn measure(&self) -> Measure {
        self.measure
    }

    fn compute_table(self) -> Result<SubsetTable, BoolwError> {
        let mut table = SubsetTable::allocate(self.graph, self.measure, Shape::Linear, self.limit)?;
        let n = table.order();
        table.compute_dimension(self.graph, 0);
        table.finalize(0, 0, 0);
        for k in 1..=n {
            for mask in Combinations::new(n, k) {
                let dimension = table.compute_dimension(self.graph, mask);
                let mut best = u32::MAX;
                let mut last = 0;
                let mut rest = mask;
                while rest != 0 {
                    let x = rest.trailing_zeros();
                    rest &= rest - 1;
                    let candidate = table.finalized_value(mask ^ (1 << x))?;
                    if candidate < best {
                        best = candidate;
                        last = x;
                    }
                }
                table.finalize(mask, self.measure.aggregate_u32(best, dimension), last);
            }
            #[cfg(feature = "log")]
            debug!("finalized all subsets of size {}", k);
        }
        Ok(table)
    }
}
