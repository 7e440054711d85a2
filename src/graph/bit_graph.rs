use crate::datastructures::BitSet;
use crate::error::BoolwError;
use crate::graph::base_graph::BaseGraph;
use crate::graph::kind::{is_convex_run, GraphKind, Group};
use crate::graph::mutable_graph::MutableGraph;
use std::convert::TryFrom;

/// Graph on at most [`BitSet::CAPACITY`] vertices, stored as one neighborhood
/// bitset per vertex id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGraph {
    universe: BitSet,
    graph: Vec<BitSet>,
    kind: GraphKind,
}

impl Default for BitGraph {
    fn default() -> Self {
        Self::with_kind(BitSet::empty(), GraphKind::Plain)
    }
}

/// Builds a plain graph from an adjacency list; entry `i` is `N(i)`.
impl TryFrom<Vec<BitSet>> for BitGraph {
    type Error = BoolwError;

    fn try_from(neighborhoods: Vec<BitSet>) -> Result<Self, Self::Error> {
        let universe = BitSet::full(neighborhoods.len())?;
        let mut graph = Self::with_vertices(universe);
        for (v, nb) in neighborhoods.iter().enumerate() {
            if nb.contains(v) {
                return Err(BoolwError::invalid(format!("self-loop at {}", v)));
            }
            if !nb.is_subset_of(&universe) {
                return Err(BoolwError::invalid(format!(
                    "neighborhood of {} leaves the vertex set",
                    v
                )));
            }
            for u in nb.vertices() {
                if !neighborhoods[u].contains(v) {
                    return Err(BoolwError::invalid(format!(
                        "edge ({}, {}) is not symmetric",
                        v, u
                    )));
                }
            }
            graph.graph[v] = *nb;
        }
        Ok(graph)
    }
}

impl BitGraph {
    fn with_kind(universe: BitSet, kind: GraphKind) -> Self {
        Self {
            universe,
            graph: vec![BitSet::empty(); BitSet::CAPACITY],
            kind,
        }
    }

    /// Edgeless plain graph on `vertices`.
    pub fn with_vertices(vertices: BitSet) -> Self {
        Self::with_kind(vertices, GraphKind::Plain)
    }

    /// Plain graph on `{0, .., n - 1}` with the given edges.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, BoolwError> {
        let mut graph = Self::with_vertices(BitSet::full(n)?);
        for (v, w) in edges {
            graph.connect(BitSet::from_vertex(*v)?, BitSet::from_vertex(*w)?)?;
        }
        Ok(graph)
    }

    /// Edgeless bipartite graph with the given groups.
    pub fn bipartite(group1: BitSet, group2: BitSet) -> Result<Self, BoolwError> {
        if !group1.is_disjoint(&group2) {
            return Err(BoolwError::invalid(format!(
                "groups share the vertices {}",
                group1.intersect(group2)
            )));
        }
        Ok(Self::with_kind(
            group1.union(group2),
            GraphKind::Bipartite { group1, group2 },
        ))
    }

    /// Edgeless convex bipartite graph with the given groups.
    pub fn convex_bipartite(group1: BitSet, group2: BitSet) -> Result<Self, BoolwError> {
        let mut graph = Self::bipartite(group1, group2)?;
        graph.kind = GraphKind::ConvexBipartite { group1, group2 };
        Ok(graph)
    }

    /// Re-tags a bipartite graph as convex, provided it is.
    pub fn into_convex_bipartite(mut self) -> Result<Self, BoolwError> {
        match self.kind {
            GraphKind::Bipartite { group1, group2 } if self.verify_convexity() => {
                self.kind = GraphKind::ConvexBipartite { group1, group2 };
                Ok(self)
            }
            GraphKind::ConvexBipartite { .. } => Ok(self),
            GraphKind::Bipartite { .. } => Err(BoolwError::invalid(
                "some neighborhood in group1 is not contiguous",
            )),
            GraphKind::Plain => Err(BoolwError::invalid("graph is not bipartite")),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn group1(&self) -> Option<BitSet> {
        self.kind.groups().map(|(g1, _)| g1)
    }

    pub fn group2(&self) -> Option<BitSet> {
        self.kind.groups().map(|(_, g2)| g2)
    }

    pub fn edge_count(&self) -> usize {
        self.universe
            .vertices()
            .map(|v| self.graph[v].cardinality())
            .sum::<usize>()
            / 2
    }

    /// Checks that every `group2` vertex sees a run of consecutive ids.
    /// Always false for graphs without a bipartition.
    pub fn verify_convexity(&self) -> bool {
        match self.kind.groups() {
            None => false,
            Some((_, group2)) => group2.vertices().all(|v| is_convex_run(self.graph[v])),
        }
    }

    /// Induced subgraph on `vertices ∩ universe`, of the same kind.
    pub fn subgraph(&self, vertices: BitSet) -> Self {
        let universe = self.universe.intersect(vertices);
        let mut graph = Self::with_kind(universe, self.kind.restrict(universe));
        for v in universe.vertices() {
            graph.graph[v] = self.graph[v].intersect(universe);
        }
        graph.downgrade_if_not_convex();
        graph
    }

    /// Plain graph on the same vertices whose edges are the non-edges of `self`.
    pub fn complement(&self) -> Self {
        let mut graph = Self::with_vertices(self.universe);
        for v in self.universe.vertices() {
            graph.graph[v] = self.graph[v]
                .complement_in(self.universe)
                .difference(BitSet::singleton(v));
        }
        graph
    }

    /// Bipartite graph on the same groups whose edges are exactly the
    /// cross-group non-edges of `self`.
    pub fn bipartite_complement(&self) -> Result<Self, BoolwError> {
        let (group1, group2) = self
            .kind
            .groups()
            .ok_or_else(|| BoolwError::invalid("graph is not bipartite"))?;
        let mut graph = Self::bipartite(group1, group2)?;
        for v in group1.vertices() {
            graph.graph[v] = group2.difference(self.graph[v]);
        }
        for v in group2.vertices() {
            graph.graph[v] = group1.difference(self.graph[v]);
        }
        Ok(graph)
    }

    /// Dropping vertices can open id gaps inside a run; such graphs stay
    /// bipartite but lose the convex tag.
    fn downgrade_if_not_convex(&mut self) {
        if let GraphKind::ConvexBipartite { group1, group2 } = self.kind {
            if !self.verify_convexity() {
                self.kind = GraphKind::Bipartite { group1, group2 };
            }
        }
    }

    fn require_singleton(&self, v: BitSet) -> Result<usize, BoolwError> {
        if !v.is_singleton() {
            return Err(BoolwError::invalid(format!(
                "expected a single vertex, got {}",
                v
            )));
        }
        let idx = v.index().unwrap_or_default();
        if !self.universe.contains(idx) {
            return Err(BoolwError::invalid(format!("vertex {} is not present", idx)));
        }
        Ok(idx)
    }
}

impl BaseGraph for BitGraph {
    fn universe(&self) -> BitSet {
        self.universe
    }

    fn neighborhood(&self, u: usize) -> BitSet {
        self.graph.get(u).copied().unwrap_or_default()
    }
}

impl MutableGraph for BitGraph {
    fn add(&mut self, vertices: BitSet, group: Option<Group>) -> Result<(), BoolwError> {
        if !self.universe.is_disjoint(&vertices) {
            return Err(BoolwError::invalid(format!(
                "graph already contains some of {}",
                vertices.intersect(self.universe)
            )));
        }
        let kind = self.kind;
        self.kind.assign(vertices, group)?;
        if let GraphKind::ConvexBipartite { .. } = self.kind {
            if !self.verify_convexity() {
                self.kind = kind;
                return Err(BoolwError::invalid(format!(
                    "adding {} breaks convexity",
                    vertices
                )));
            }
        }
        self.universe = self.universe.union(vertices);
        Ok(())
    }

    fn remove(&mut self, vertices: BitSet) -> Result<(), BoolwError> {
        if !vertices.is_subset_of(&self.universe) {
            return Err(BoolwError::invalid(format!(
                "graph does not contain {}",
                vertices.difference(self.universe)
            )));
        }
        for v in vertices.vertices() {
            for w in self.graph[v].vertices() {
                self.graph[w] = self.graph[w].difference(BitSet::singleton(v));
            }
            self.graph[v] = BitSet::empty();
        }
        self.universe = self.universe.difference(vertices);
        self.kind = self.kind.restrict(self.universe);
        self.downgrade_if_not_convex();
        Ok(())
    }

    fn connect(&mut self, v: BitSet, w: BitSet) -> Result<(), BoolwError> {
        let a = self.require_singleton(v)?;
        let b = self.require_singleton(w)?;
        if a == b {
            return Err(BoolwError::invalid(format!("self-loop at {}", a)));
        }
        if self.graph[a].contains(b) {
            return Err(BoolwError::invalid(format!(
                "edge ({}, {}) already exists",
                a, b
            )));
        }
        let graph = &self.graph;
        self.kind.validate_edge(a, b, |x| graph[x])?;
        self.graph[a] = self.graph[a].union(w);
        self.graph[b] = self.graph[b].union(v);
        Ok(())
    }

    fn disconnect(&mut self, v: BitSet, w: BitSet) -> Result<(), BoolwError> {
        let a = self.require_singleton(v)?;
        let b = self.require_singleton(w)?;
        if !self.graph[a].contains(b) {
            return Err(BoolwError::invalid(format!("no edge ({}, {})", a, b)));
        }
        self.graph[a] = self.graph[a].difference(w);
        self.graph[b] = self.graph[b].difference(v);
        if let GraphKind::ConvexBipartite { .. } = self.kind {
            if !self.verify_convexity() {
                self.graph[a] = self.graph[a].union(w);
                self.graph[b] = self.graph[b].union(v);
                return Err(BoolwError::invalid(format!(
                    "removing ({}, {}) breaks convexity",
                    a, b
                )));
            }
        }
        Ok(())
    }

    fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::datastructures::BitSet;
    use crate::graph::{BitGraph, MutableGraph};
    use rand::prelude::StdRng;
    use rand::{Rng, SeedableRng};

    pub(crate) fn complete(n: usize) -> BitGraph {
        let mut graph = BitGraph::with_vertices(BitSet::full(n).unwrap());
        graph.make_clique(BitSet::full(n).unwrap()).unwrap();
        graph
    }

    pub(crate) fn cycle(n: usize) -> BitGraph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        BitGraph::from_edges(n, &edges).unwrap()
    }

    pub(crate) fn path(n: usize) -> BitGraph {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        BitGraph::from_edges(n, &edges).unwrap()
    }

    pub(crate) fn random(n: usize, p: f64, seed: u64) -> BitGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut edges = vec![];
        for v in 0..n {
            for w in (v + 1)..n {
                if rng.gen_bool(p) {
                    edges.push((v, w));
                }
            }
        }
        BitGraph::from_edges(n, &edges).unwrap()
    }
}
