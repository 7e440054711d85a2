use crate::booldim::SubsetCache;
use crate::decomposition::Decomposition;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::heuristic_decomposition::evaluate;
use crate::objective::Measure;
use crate::solver::BoolwResult;
use rand::prelude::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(feature = "log")]
use log::info;

pub const DEFAULT_BUDGET: usize = 10_000;
const DEFAULT_SEED: u64 = 1337;

/// Local search over single swaps: two positions of a vertex order, or the
/// vertices of two leaves of a decomposition tree.
///
/// Each pass looks at all swaps in a random order and takes the first one
/// that strictly improves the objective. The search ends once a full pass
/// finds nothing, or after `budget` evaluated swaps.
pub struct FirstImprovement<'a, G: BaseGraph> {
    graph: &'a G,
    measure: Measure,
    budget: usize,
    seed: u64,
}

impl<'a, G: BaseGraph> FirstImprovement<'a, G> {
    pub fn new(graph: &'a G, measure: Measure) -> Self {
        Self {
            graph,
            measure,
            budget: DEFAULT_BUDGET,
            seed: DEFAULT_SEED,
        }
    }

    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn improve(self, start: Decomposition) -> Result<BoolwResult, BoolwError> {
        start.validate(self.graph.universe())?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut cache = SubsetCache::new(self.graph);
        let mut current = start;
        let mut value = evaluate(&mut cache, &current, self.measure);
        let mut evaluations = 0;

        let positions: Vec<usize> = match &current {
            Decomposition::Linear(d) => (0..d.len()).collect(),
            Decomposition::Tree(td) => td.leaves().map(|n| n.id).collect(),
        };
        let mut swaps: Vec<(usize, usize)> = positions
            .iter()
            .enumerate()
            .flat_map(|(i, a)| positions[i + 1..].iter().map(move |b| (*a, *b)))
            .collect();

        'search: loop {
            swaps.shuffle(&mut rng);
            let mut improved = false;
            for (a, b) in swaps.iter().copied() {
                if evaluations >= self.budget {
                    break 'search;
                }
                #[cfg(feature = "handle-ctrlc")]
                if crate::signals::received_ctrl_c() {
                    break 'search;
                }
                swap(&mut current, a, b)?;
                evaluations += 1;
                let candidate = evaluate(&mut cache, &current, self.measure);
                if candidate < value {
                    #[cfg(feature = "log")]
                    info!(
                        "swap ({}, {}) improves {} from {} to {}",
                        a, b, self.measure, value, candidate
                    );
                    value = candidate;
                    improved = true;
                    break;
                }
                swap(&mut current, a, b)?;
            }
            if !improved {
                break;
            }
        }
        #[cfg(feature = "log")]
        info!(
            "local search stopped after {} evaluations at {} {}",
            evaluations, self.measure, value
        );
        Ok(BoolwResult {
            objective_value: value,
            decomposition: current,
        })
    }
}

fn swap(decomposition: &mut Decomposition, a: usize, b: usize) -> Result<(), BoolwError> {
    match decomposition {
        Decomposition::Linear(d) => {
            d.swap(a, b);
            Ok(())
        }
        Decomposition::Tree(td) => td.swap_leaves(a, b),
    }
}

#[cfg(test)]
mod tests {
    use crate::check::check_decomposition;
    use crate::decomposition::{Decomposition, LinearDecomposition};
    use crate::error::BoolwError;
    use crate::exact::{ExactSolver, LinearSolver};
    use crate::graph::bit_graph::fixtures;
    use crate::heuristic_decomposition::{random_decomposition, random_tree_decomposition};
    use crate::meta_heuristics::FirstImprovement;
    use crate::objective::Measure;

    #[test]
    fn fixes_a_scrambled_path() {
        let graph = fixtures::path(6);
        let start: Decomposition = LinearDecomposition::from_vertices(&[0, 5, 1, 4, 2, 3])
            .unwrap()
            .into();
        let before = check_decomposition(&graph, &start, Measure::Cost).unwrap();
        let result = FirstImprovement::new(&graph, Measure::Cost)
            .improve(start)
            .unwrap();
        assert!(result.objective_value < before);
        assert_eq!(
            check_decomposition(&graph, &result.decomposition, Measure::Cost),
            Ok(result.objective_value)
        );
    }

    #[test]
    fn never_worse_than_start() {
        for seed in 0..5 {
            let graph = fixtures::random(9, 0.3, seed);
            for measure in [Measure::Width, Measure::Cost].iter().copied() {
                let start = random_decomposition(&graph, measure, seed);
                let optimum = LinearSolver::with_graph(&graph, measure)
                    .compute_exact()
                    .unwrap()
                    .objective_value;
                let result = FirstImprovement::new(&graph, measure)
                    .seed(seed)
                    .improve(start.decomposition)
                    .unwrap();
                assert!(result.objective_value <= start.objective_value);
                assert!(optimum <= result.objective_value);
                assert_eq!(
                    check_decomposition(&graph, &result.decomposition, measure),
                    Ok(result.objective_value)
                );

                let tree = random_tree_decomposition(&graph, measure, seed).unwrap();
                let result = FirstImprovement::new(&graph, measure)
                    .improve(tree.decomposition)
                    .unwrap();
                assert!(result.objective_value <= tree.objective_value);
                assert_eq!(
                    check_decomposition(&graph, &result.decomposition, measure),
                    Ok(result.objective_value)
                );
            }
        }
    }

    #[test]
    fn zero_budget_keeps_the_start() {
        let graph = fixtures::random(8, 0.5, 1);
        let start = random_decomposition(&graph, Measure::Width, 3);
        let result = FirstImprovement::new(&graph, Measure::Width)
            .budget(0)
            .improve(start.decomposition.clone())
            .unwrap();
        assert_eq!(result.decomposition, start.decomposition);
        assert_eq!(result.objective_value, start.objective_value);
    }

    #[test]
    fn rejects_foreign_decomposition() {
        let graph = fixtures::path(4);
        let start = LinearDecomposition::from_vertices(&[0, 1, 2]).unwrap().into();
        assert!(matches!(
            FirstImprovement::new(&graph, Measure::Width).improve(start),
            Err(BoolwError::InvalidInput(_))
        ));
    }
}
