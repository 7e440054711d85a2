use crate::booldim::SubsetCache;
use crate::datastructures::BitSet;
use crate::decomposition::{Decomposition, DecompositionTree, LinearDecomposition};
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::objective::Measure;
use crate::scoring::Scoring;
use crate::solver::BoolwResult;
use rand::prelude::*;

#[cfg(feature = "log")]
use log::{debug, info};

/// Objective of `decomposition` with dimensions taken from `cache`.
pub(crate) fn evaluate<G: BaseGraph>(
    cache: &mut SubsetCache<G>,
    decomposition: &Decomposition,
    measure: Measure,
) -> usize {
    decomposition
        .cuts()
        .into_iter()
        .fold(0, |acc, cut| measure.aggregate(acc, cache.dimension(cut)))
}

fn result<G: BaseGraph>(
    cache: &mut SubsetCache<G>,
    decomposition: Decomposition,
    measure: Measure,
) -> BoolwResult {
    BoolwResult {
        objective_value: evaluate(cache, &decomposition, measure),
        decomposition,
    }
}

/// Grows a vertex order one vertex at a time, always taking the best scoring
/// vertex. In light mode only vertices adjacent to the current front are
/// scored, unless there are none.
pub struct GreedyLinearDecomposer<'a, G: BaseGraph> {
    graph: &'a G,
    measure: Measure,
    scoring: Scoring,
    light: bool,
    start: Option<usize>,
}

impl<'a, G: BaseGraph> GreedyLinearDecomposer<'a, G> {
    pub fn new(graph: &'a G, measure: Measure) -> Self {
        Self {
            graph,
            measure,
            scoring: Scoring::default(),
            light: false,
            start: None,
        }
    }

    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn light(mut self, light: bool) -> Self {
        self.light = light;
        self
    }

    pub fn start(mut self, start: Option<usize>) -> Self {
        self.start = start;
        self
    }

    pub fn compute(self) -> Result<BoolwResult, BoolwError> {
        let mut cache = SubsetCache::new(self.graph);
        self.compute_with_cache(&mut cache)
    }

    fn compute_with_cache(&self, cache: &mut SubsetCache<G>) -> Result<BoolwResult, BoolwError> {
        let universe = self.graph.universe();
        let mut order: Vec<BitSet> = Vec::with_capacity(universe.cardinality());
        let mut front = BitSet::empty();
        let mut remaining = universe;
        if let Some(v) = self.start {
            if !universe.contains(v) {
                return Err(BoolwError::invalid(format!(
                    "start vertex {} is not in the graph",
                    v
                )));
            }
            let v = BitSet::singleton(v);
            order.push(v);
            front = v;
            remaining = remaining.difference(v);
        }
        while !remaining.is_empty() {
            let mut candidates = remaining;
            if self.light && !front.is_empty() {
                let adjacent = self.graph.exterior_border(front).intersect(remaining);
                if !adjacent.is_empty() {
                    candidates = adjacent;
                }
            }
            let mut best = None;
            let mut best_score = i64::MAX;
            for v in candidates.iter() {
                let score = self.scoring.score(cache, front, v);
                if best.is_none() || score < best_score {
                    best = Some(v);
                    best_score = score;
                }
            }
            // candidates is never empty here
            let v = match best {
                Some(v) => v,
                None => break,
            };
            order.push(v);
            front = front.union(v);
            remaining = remaining.difference(v);
        }
        Ok(result(
            cache,
            LinearDecomposition::from(order).into(),
            self.measure,
        ))
    }
}

/// Starts with every vertex as its own part and repeatedly merges the best
/// scoring pair of parts. In light mode only adjacent parts are scored,
/// unless no two parts are adjacent.
pub struct GreedyTreeDecomposer<'a, G: BaseGraph> {
    graph: &'a G,
    measure: Measure,
    scoring: Scoring,
    light: bool,
}

impl<'a, G: BaseGraph> GreedyTreeDecomposer<'a, G> {
    pub fn new(graph: &'a G, measure: Measure) -> Self {
        Self {
            graph,
            measure,
            scoring: Scoring::default(),
            light: false,
        }
    }

    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn light(mut self, light: bool) -> Self {
        self.light = light;
        self
    }

    pub fn compute(self) -> Result<BoolwResult, BoolwError> {
        let mut cache = SubsetCache::new(self.graph);
        let mut td = DecompositionTree::with_capacity(2 * self.graph.order());
        // (node id, vertex set) of every part awaiting a merge
        let mut pool: Vec<(usize, BitSet)> = self
            .graph
            .vertices()
            .map(|v| (td.add_leaf(v), v))
            .collect();
        while pool.len() > 1 {
            let mut adjacent_only = self.light;
            if adjacent_only {
                adjacent_only = pool.iter().enumerate().any(|(i, (_, a))| {
                    let border = self.graph.exterior_border(*a);
                    pool[i + 1..].iter().any(|(_, b)| border.intersects_with(b))
                });
            }
            let mut best: Option<(usize, usize)> = None;
            let mut best_score = i64::MAX;
            for i in 0..pool.len() {
                let border = self.graph.exterior_border(pool[i].1);
                for j in i + 1..pool.len() {
                    if adjacent_only && !border.intersects_with(&pool[j].1) {
                        continue;
                    }
                    let score = self.scoring.score(&mut cache, pool[i].1, pool[j].1);
                    if best.is_none() || score < best_score {
                        best = Some((i, j));
                        best_score = score;
                    }
                }
            }
            let (i, j) = match best {
                Some(pair) => pair,
                None => break,
            };
            let (right, right_set) = pool.remove(j);
            let (left, left_set) = pool[i];
            let id = td.add_internal(left, right)?;
            pool[i] = (id, left_set.union(right_set));
            #[cfg(feature = "log")]
            debug!("merged {} and {} at score {}", left_set, right_set, best_score);
        }
        Ok(result(&mut cache, td.into(), self.measure))
    }
}

pub fn greedy<G: BaseGraph>(
    graph: &G,
    measure: Measure,
    scoring: Scoring,
) -> Result<BoolwResult, BoolwError> {
    GreedyLinearDecomposer::new(graph, measure)
        .scoring(scoring)
        .compute()
}

/// Light greedy from every possible start vertex; the best order wins, ties
/// going to the lowest start vertex.
pub fn greedy_light<G: BaseGraph>(
    graph: &G,
    measure: Measure,
    scoring: Scoring,
) -> Result<BoolwResult, BoolwError> {
    let mut cache = SubsetCache::new(graph);
    let mut best: Option<BoolwResult> = None;
    for v in graph.universe().vertices() {
        let candidate = GreedyLinearDecomposer::new(graph, measure)
            .scoring(scoring)
            .light(true)
            .start(Some(v))
            .compute_with_cache(&mut cache)?;
        #[cfg(feature = "log")]
        debug!("start {} gives {} {}", v, measure, candidate.objective_value);
        if best
            .as_ref()
            .map_or(true, |b| candidate.objective_value < b.objective_value)
        {
            best = Some(candidate);
        }
    }
    match best {
        Some(best) => {
            #[cfg(feature = "log")]
            info!("greedy light found {} {}", measure, best.objective_value);
            Ok(best)
        }
        None => Ok(result(
            &mut cache,
            LinearDecomposition::default().into(),
            measure,
        )),
    }
}

pub fn greedy_light_single_start<G: BaseGraph>(
    graph: &G,
    measure: Measure,
    scoring: Scoring,
    start: usize,
) -> Result<BoolwResult, BoolwError> {
    GreedyLinearDecomposer::new(graph, measure)
        .scoring(scoring)
        .light(true)
        .start(Some(start))
        .compute()
}

/// Uniformly random vertex order.
pub fn random_decomposition<G: BaseGraph>(graph: &G, measure: Measure, seed: u64) -> BoolwResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<BitSet> = graph.vertices().collect();
    order.shuffle(&mut rng);
    let mut cache = SubsetCache::new(graph);
    result(&mut cache, LinearDecomposition::from(order).into(), measure)
}

/// Tree built by merging uniformly random pairs of parts.
pub fn random_tree_decomposition<G: BaseGraph>(
    graph: &G,
    measure: Measure,
    seed: u64,
) -> Result<BoolwResult, BoolwError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut td = DecompositionTree::with_capacity(2 * graph.order());
    let mut pool: Vec<usize> = graph.vertices().map(|v| td.add_leaf(v)).collect();
    while pool.len() > 1 {
        let i = rng.gen_range(0..pool.len());
        let left = pool.swap_remove(i);
        let j = rng.gen_range(0..pool.len());
        pool[j] = td.add_internal(left, pool[j])?;
    }
    let mut cache = SubsetCache::new(graph);
    Ok(result(&mut cache, td.into(), measure))
}

#[cfg(test)]
mod tests {
    use crate::check::check_decomposition;
    use crate::datastructures::BitSet;
    use crate::decomposition::Decomposition;
    use crate::error::BoolwError;
    use crate::exact::{ExactSolver, LinearSolver, TreeSolver};
    use crate::graph::bit_graph::fixtures;
    use crate::graph::{BaseGraph, BitGraph};
    use crate::heuristic_decomposition::{
        greedy, greedy_light, greedy_light_single_start, random_decomposition,
        random_tree_decomposition, GreedyTreeDecomposer,
    };
    use crate::objective::Measure;
    use crate::scoring::Scoring;

    const SCORINGS: [Scoring; 5] = [
        Scoring::MinFront,
        Scoring::Lun,
        Scoring::MinCoverSize,
        Scoring::RelativeNeighborhood,
        Scoring::NeighborhoodSize,
    ];

    #[test]
    fn greedy_follows_a_path() {
        let graph = fixtures::path(8);
        let result = greedy(&graph, Measure::Width, Scoring::MinFront).unwrap();
        assert_eq!(result.objective_value, 1);
        assert_eq!(
            check_decomposition(&graph, &result.decomposition, Measure::Width),
            Ok(1)
        );
    }

    #[test]
    fn linear_builders_are_valid_and_not_better_than_exact() {
        for seed in 0..4 {
            let graph = fixtures::random(8, 0.35, seed);
            for measure in [Measure::Width, Measure::Cost].iter().copied() {
                let optimum = LinearSolver::with_graph(&graph, measure)
                    .compute_exact()
                    .unwrap()
                    .objective_value;
                for scoring in SCORINGS.iter().copied() {
                    for result in vec![
                        greedy(&graph, measure, scoring).unwrap(),
                        greedy_light(&graph, measure, scoring).unwrap(),
                        greedy_light_single_start(&graph, measure, scoring, 3).unwrap(),
                    ] {
                        let verified =
                            check_decomposition(&graph, &result.decomposition, measure).unwrap();
                        assert_eq!(verified, result.objective_value);
                        assert!(optimum <= verified);
                    }
                }
                let random = random_decomposition(&graph, measure, seed);
                assert!(optimum <= random.objective_value);
            }
        }
    }

    #[test]
    fn tree_builders_are_valid_and_not_better_than_exact() {
        for seed in 0..4 {
            let graph = fixtures::random(7, 0.4, seed);
            for measure in [Measure::Width, Measure::Cost].iter().copied() {
                let optimum = TreeSolver::with_graph(&graph, measure)
                    .compute_exact()
                    .unwrap()
                    .objective_value;
                for scoring in SCORINGS.iter().copied() {
                    for light in [false, true].iter().copied() {
                        let result = GreedyTreeDecomposer::new(&graph, measure)
                            .scoring(scoring)
                            .light(light)
                            .compute()
                            .unwrap();
                        assert_eq!(
                            check_decomposition(&graph, &result.decomposition, measure),
                            Ok(result.objective_value)
                        );
                        assert!(optimum <= result.objective_value);
                    }
                }
                let random = random_tree_decomposition(&graph, measure, seed).unwrap();
                assert_eq!(
                    check_decomposition(&graph, &random.decomposition, measure),
                    Ok(random.objective_value)
                );
            }
        }
    }

    #[test]
    fn total_on_degenerate_graphs() {
        let empty = BitGraph::default();
        assert_eq!(greedy_light(&empty, Measure::Cost, Scoring::Lun).unwrap().objective_value, 0);
        assert_eq!(
            GreedyTreeDecomposer::new(&empty, Measure::Width)
                .compute()
                .unwrap()
                .objective_value,
            0
        );
        let edgeless = BitGraph::with_vertices(BitSet::full(6).unwrap());
        let result = greedy_light(&edgeless, Measure::Width, Scoring::MinFront).unwrap();
        assert_eq!(result.objective_value, 0);
        assert_eq!(result.decomposition.cuts().len(), 5);
        let tree = GreedyTreeDecomposer::new(&edgeless, Measure::Cost)
            .light(true)
            .compute()
            .unwrap();
        assert_eq!(tree.objective_value, 0);
        assert_eq!(tree.decomposition.validate(edgeless.universe()), Ok(()));
    }

    #[test]
    fn single_start() {
        let graph = fixtures::path(5);
        let result = greedy_light_single_start(&graph, Measure::Width, Scoring::Lun, 2).unwrap();
        match &result.decomposition {
            Decomposition::Linear(d) => assert_eq!(d.order()[0], BitSet::from_vertex(2).unwrap()),
            _ => panic!("expected a linear decomposition"),
        }
        assert!(matches!(
            greedy_light_single_start(&graph, Measure::Width, Scoring::Lun, 9),
            Err(BoolwError::InvalidInput(_))
        ));
    }

    #[test]
    fn random_is_reproducible() {
        let graph = fixtures::random(10, 0.3, 5);
        let a = random_decomposition(&graph, Measure::Cost, 42);
        let b = random_decomposition(&graph, Measure::Cost, 42);
        assert_eq!(a.decomposition, b.decomposition);
        assert_eq!(a.decomposition.validate(graph.universe()), Ok(()));
        let t = random_tree_decomposition(&graph, Measure::Width, 42).unwrap();
        assert_eq!(t.decomposition.validate(graph.universe()), Ok(()));
    }
}
