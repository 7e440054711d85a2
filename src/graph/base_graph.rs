use crate::datastructures::{BitSet, BitSetIterator};
use std::fmt::Debug;

/// Read-only view of a graph whose vertices are bit positions.
pub trait BaseGraph: Clone + Debug {
    fn universe(&self) -> BitSet;
    fn neighborhood(&self, u: usize) -> BitSet;

    fn order(&self) -> usize {
        self.universe().cardinality()
    }

    fn has_vertex(&self, u: usize) -> bool {
        self.universe().contains(u)
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighborhood(u).contains(v)
    }

    fn degree(&self, u: usize) -> usize {
        self.neighborhood(u).cardinality()
    }

    fn vertices(&self) -> BitSetIterator {
        self.universe().iter()
    }

    /// Union of the neighborhoods of all members of `vertices`.
    fn neighbors_of(&self, vertices: BitSet) -> BitSet {
        vertices
            .vertices()
            .fold(BitSet::empty(), |acc, v| acc.union(self.neighborhood(v)))
    }

    fn exterior_border(&self, c: BitSet) -> BitSet {
        self.neighbors_of(c).difference(c)
    }
}
