use crate::check::verify_claim;
use crate::decomposition::Decomposition;
use crate::error::BoolwError;
use crate::exact::{
    ExactSolver, LinearSolver, TreeSolver, DEFAULT_EXACT_LIMIT, MAX_EXACT_VERTICES,
};
use crate::graph::BaseGraph;
use crate::heuristic_decomposition::{
    greedy_light, greedy_light_single_start, random_decomposition, random_tree_decomposition,
    GreedyLinearDecomposer, GreedyTreeDecomposer,
};
use crate::meta_heuristics::{FirstImprovement, DEFAULT_BUDGET};
use crate::objective::{Measure, Shape};
use crate::scoring::Scoring;
#[cfg(feature = "log")]
use log::info;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Objective value together with a decomposition attaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolwResult {
    pub objective_value: usize,
    pub decomposition: Decomposition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicType {
    Greedy,
    GreedyLight,
    GreedyLightSingleStart(usize),
    /// Greedy followed by first improvement local search.
    FirstImprovement,
    Random,
}

impl Default for HeuristicType {
    fn default() -> Self {
        Self::FirstImprovement
    }
}

impl Display for HeuristicType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicType::Greedy => write!(f, "greedy"),
            HeuristicType::GreedyLight => write!(f, "greedy_light"),
            HeuristicType::GreedyLightSingleStart(v) => {
                write!(f, "greedy_light_single_start:{}", v)
            }
            HeuristicType::FirstImprovement => write!(f, "first_improvement"),
            HeuristicType::Random => write!(f, "random"),
        }
    }
}

impl FromStr for HeuristicType {
    type Err = BoolwError;

    /// The single start variant is written `greedy_light_single_start:<vertex>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(HeuristicType::Greedy),
            "greedy_light" => Ok(HeuristicType::GreedyLight),
            "first_improvement" => Ok(HeuristicType::FirstImprovement),
            "random" => Ok(HeuristicType::Random),
            _ => match s.strip_prefix("greedy_light_single_start:") {
                Some(v) => v
                    .parse()
                    .map(HeuristicType::GreedyLightSingleStart)
                    .map_err(|_| BoolwError::invalid(format!("invalid start vertex '{}'", v))),
                None => Err(BoolwError::invalid(format!("unknown heuristic '{}'", s))),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Solver {
    measure: Measure,
    shape: Shape,
    exact_limit: usize,
    heuristic: HeuristicType,
    scoring: Scoring,
    local_search_budget: usize,
    seed: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            measure: Measure::default(),
            shape: Shape::default(),
            exact_limit: DEFAULT_EXACT_LIMIT,
            heuristic: HeuristicType::default(),
            scoring: Scoring::default(),
            local_search_budget: DEFAULT_BUDGET,
            seed: 1337,
        }
    }
}

impl Solver {
    pub fn boolean_width() -> Self {
        Self::default().shape(Shape::Tree)
    }

    pub fn boolean_cost() -> Self {
        Self::default().shape(Shape::Tree).measure(Measure::Cost)
    }

    pub fn linear_boolean_width() -> Self {
        Self::default()
    }

    pub fn linear_boolean_cost() -> Self {
        Self::default().measure(Measure::Cost)
    }

    /// Never runs the exact engine.
    pub fn heuristic_only() -> Self {
        Self::default().exact_limit(0)
    }

    impl_setter!(self, measure, Measure);
    impl_setter!(self, shape, Shape);
    impl_setter!(self, exact_limit, usize);
    impl_setter!(self, heuristic, HeuristicType);
    impl_setter!(self, scoring, Scoring);
    impl_setter!(self, local_search_budget, usize);
    impl_setter!(self, seed, u64);

    /// Exact when the graph fits below the exact limit, heuristic otherwise.
    /// Limits above [`MAX_EXACT_VERTICES`] are treated as that ceiling.
    pub fn solve<G: BaseGraph>(&self, graph: &G) -> Result<BoolwResult, BoolwError> {
        #[cfg(feature = "log")]
        info!(
            "attempting to solve graph with {} vertices for {} {}",
            graph.order(),
            self.shape,
            self.measure
        );
        if graph.order() <= self.exact_limit.min(MAX_EXACT_VERTICES) {
            self.solve_exact(graph)
        } else {
            #[cfg(feature = "log")]
            info!("graph too large to be solved exactly");
            self.solve_heuristic(graph)
        }
    }

    pub fn solve_exact<G: BaseGraph>(&self, graph: &G) -> Result<BoolwResult, BoolwError> {
        match self.shape {
            Shape::Linear => {
                LinearSolver::with_limit(graph, self.measure, self.exact_limit).compute_exact()
            }
            Shape::Tree => {
                TreeSolver::with_limit(graph, self.measure, self.exact_limit).compute_exact()
            }
        }
    }

    /// Runs the configured heuristic and checks its claimed objective.
    pub fn solve_heuristic<G: BaseGraph>(&self, graph: &G) -> Result<BoolwResult, BoolwError> {
        let result = match (self.shape, self.heuristic) {
            (Shape::Linear, HeuristicType::Greedy) => {
                GreedyLinearDecomposer::new(graph, self.measure)
                    .scoring(self.scoring)
                    .compute()?
            }
            (Shape::Linear, HeuristicType::GreedyLight) => {
                greedy_light(graph, self.measure, self.scoring)?
            }
            (Shape::Linear, HeuristicType::GreedyLightSingleStart(v)) => {
                greedy_light_single_start(graph, self.measure, self.scoring, v)?
            }
            (Shape::Linear, HeuristicType::Random) => {
                random_decomposition(graph, self.measure, self.seed)
            }
            (Shape::Tree, HeuristicType::Greedy) => GreedyTreeDecomposer::new(graph, self.measure)
                .scoring(self.scoring)
                .compute()?,
            (Shape::Tree, HeuristicType::GreedyLight)
            | (Shape::Tree, HeuristicType::GreedyLightSingleStart(_)) => {
                GreedyTreeDecomposer::new(graph, self.measure)
                    .scoring(self.scoring)
                    .light(true)
                    .compute()?
            }
            (Shape::Tree, HeuristicType::Random) => {
                random_tree_decomposition(graph, self.measure, self.seed)?
            }
            (_, HeuristicType::FirstImprovement) => {
                let start = self.heuristic(HeuristicType::Greedy).solve_heuristic(graph)?;
                FirstImprovement::new(graph, self.measure)
                    .budget(self.local_search_budget)
                    .seed(self.seed)
                    .improve(start.decomposition)?
            }
        };
        #[cfg(feature = "log")]
        info!(
            "{} heuristic claims {} {}",
            self.heuristic, self.measure, result.objective_value
        );
        verify_claim(graph, &result.decomposition, self.measure, result.objective_value)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::check::check_decomposition;
    use crate::datastructures::BitSet;
    use crate::decomposition::Decomposition;
    use crate::error::BoolwError;
    use crate::graph::bit_graph::fixtures;
    use crate::graph::BitGraph;
    use crate::objective::{Measure, Shape};
    use crate::scoring::Scoring;
    use crate::solver::{HeuristicType, Solver};

    #[test]
    fn dispatch() {
        let graph = fixtures::cycle(10);
        let exact = Solver::default().solve(&graph).unwrap();
        let heuristic = Solver::heuristic_only().solve(&graph).unwrap();
        assert!(exact.objective_value <= heuristic.objective_value);
        assert_eq!(exact.objective_value, 2);

        let tree = Solver::boolean_width().solve(&graph).unwrap();
        assert!(matches!(tree.decomposition, Decomposition::Tree(_)));
    }

    #[test]
    fn every_heuristic() {
        let graph = fixtures::random(12, 0.3, 9);
        let heuristics = [
            HeuristicType::Greedy,
            HeuristicType::GreedyLight,
            HeuristicType::GreedyLightSingleStart(4),
            HeuristicType::FirstImprovement,
            HeuristicType::Random,
        ];
        for shape in [Shape::Linear, Shape::Tree].iter().copied() {
            for measure in [Measure::Width, Measure::Cost].iter().copied() {
                let optimum = Solver::default()
                    .shape(shape)
                    .measure(measure)
                    .solve_exact(&graph)
                    .unwrap()
                    .objective_value;
                for heuristic in heuristics.iter().copied() {
                    let result = Solver::heuristic_only()
                        .shape(shape)
                        .measure(measure)
                        .heuristic(heuristic)
                        .scoring(Scoring::Lun)
                        .local_search_budget(200)
                        .solve(&graph)
                        .unwrap();
                    assert_eq!(result.decomposition.shape(), shape);
                    assert!(optimum <= result.objective_value);
                }
            }
        }
    }

    #[test]
    fn exact_limit_is_respected() {
        let graph = fixtures::path(12);
        assert!(matches!(
            Solver::default().exact_limit(10).solve_exact(&graph),
            Err(BoolwError::CapacityExceeded {
                requested: 12,
                capacity: 10
            })
        ));
        // solve falls back to the heuristic instead
        assert_eq!(
            Solver::default().exact_limit(10).solve(&graph).unwrap().objective_value,
            1
        );
    }

    #[test]
    fn exact_limit_above_the_ceiling_falls_back() {
        let graph = fixtures::path(31);
        assert!(matches!(
            Solver::default().exact_limit(40).solve_exact(&graph),
            Err(BoolwError::CapacityExceeded {
                requested: 31,
                capacity: 30
            })
        ));
        let result = Solver::linear_boolean_width()
            .exact_limit(40)
            .heuristic(HeuristicType::Greedy)
            .solve(&graph)
            .unwrap();
        assert_eq!(
            check_decomposition(&graph, &result.decomposition, Measure::Width),
            Ok(result.objective_value)
        );
    }

    #[test]
    fn empty_graph() {
        let graph = BitGraph::default();
        for solver in [
            Solver::boolean_width(),
            Solver::boolean_cost(),
            Solver::linear_boolean_cost(),
            Solver::heuristic_only(),
        ]
        .iter()
        {
            assert_eq!(solver.solve(&graph).unwrap().objective_value, 0);
        }
    }

    #[test]
    fn edgeless_graph() {
        let graph = BitGraph::with_vertices(BitSet::full(5).unwrap());
        assert_eq!(Solver::boolean_width().solve(&graph).unwrap().objective_value, 0);
    }

    #[test]
    fn parse_heuristic() {
        assert_eq!("greedy".parse::<HeuristicType>(), Ok(HeuristicType::Greedy));
        assert_eq!(
            "greedy_light_single_start:7".parse::<HeuristicType>(),
            Ok(HeuristicType::GreedyLightSingleStart(7))
        );
        assert!("greedy_light_single_start:x".parse::<HeuristicType>().is_err());
        assert!("tabu".parse::<HeuristicType>().is_err());
        assert_eq!(
            HeuristicType::GreedyLightSingleStart(3).to_string(),
            "greedy_light_single_start:3"
        );
    }
}
