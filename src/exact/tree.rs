use crate::error::BoolwError;
use crate::exact::table::{Combinations, SubsetTable, DEFAULT_EXACT_LIMIT};
use crate::exact::ExactSolver;
use crate::graph::BaseGraph;
use crate::objective::{Measure, Shape};

#[cfg(feature = "log")]
use log::debug;

/// Subset DP over rooted binary decomposition trees.
///
/// Singletons are leaves with `T({v}) = bd({v})`. A larger subset `A` is split
/// into `(L, A \ L)` with both parts non-empty, and
/// `T(A) = agg(min over splits of agg(T(L), T(A \ L)), bd(A))`.
/// `L` always contains the lowest vertex of `A`, so every unordered split is
/// looked at once. The choice stored for `A` is the mask of `L`.
pub struct TreeSolver<'a, G: BaseGraph> {
    graph: &'a G,
    measure: Measure,
    limit: usize,
}

impl<'a, G: BaseGraph> ExactSolver<'a, G> for TreeSolver<'a, G> {
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
        let mut table = SubsetTable::allocate(self.graph, self.measure, Shape::Tree, self.limit)?;
        let n = table.order();
        table.compute_dimension(self.graph, 0);
        table.finalize(0, 0, 0);
        for k in 1..=n {
            for mask in Combinations::new(n, k) {
                let dimension = table.compute_dimension(self.graph, mask);
                if k == 1 {
                    table.finalize(mask, dimension, 0);
                    continue;
                }
                let low = mask & mask.wrapping_neg();
                let rest = mask ^ low;
                let mut best = u32::MAX;
                let mut choice = 0;
                let mut sub = rest;
                loop {
                    let left = low | sub;
                    if left != mask {
                        let candidate = self.measure.aggregate_u32(
                            table.finalized_value(left)?,
                            table.finalized_value(mask ^ left)?,
                        );
                        if candidate < best {
                            best = candidate;
                            choice = left;
                        }
                    }
                    if sub == 0 {
                        break;
                    }
                    sub = (sub - 1) & rest;
                }
                table.finalize(
                    mask,
                    self.measure.aggregate_u32(best, dimension),
                    choice as u32,
                );
            }
            #[cfg(feature = "log")]
            debug!("finalized all subsets of size {}", k);
        }
        Ok(table)
    }
}
