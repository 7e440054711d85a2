//! Boolean dimension of a cut.
//!
//! For a cut `(A, B)` with `B = U \ A`, every `v ∈ A` contributes the row
//! `N(v) ∩ B`. The boolean dimension is the size of the smallest family of
//! rows whose unions produce every row. Empty rows are the union of nothing
//! and never need a generator.
//!
//! A row is needed in every generating family iff it differs from the union of
//! all rows strictly contained in it, and the family of those rows generates
//! everything. Counting them is quadratic in the number of distinct rows.

use crate::datastructures::BitSet;
use crate::graph::BaseGraph;
use fxhash::FxHashMap;

#[cfg(feature = "log")]
use log::debug;

/// Distinct non-empty rows `N(v) ∩ (U \ subset)` for `v ∈ subset`, sorted by
/// cardinality and then by value.
pub fn distinct_rows<G: BaseGraph>(graph: &G, subset: BitSet) -> Vec<BitSet> {
    let other_side = subset.complement_in(graph.universe());
    let mut rows: Vec<BitSet> = subset
        .intersect(graph.universe())
        .vertices()
        .map(|v| graph.neighborhood(v).intersect(other_side))
        .filter(|row| !row.is_empty())
        .collect();
    rows.sort_unstable_by_key(|row| (row.cardinality(), *row));
    rows.dedup();
    rows
}

/// Rows that cannot be written as a union of other rows, in the order of
/// [`distinct_rows`].
pub fn generating_rows(rows: &[BitSet]) -> Vec<BitSet> {
    rows.iter()
        .enumerate()
        .filter(|(i, row)| {
            let covered = rows[..*i]
                .iter()
                .filter(|smaller| smaller.is_subset_of(row))
                .fold(BitSet::empty(), |acc, smaller| acc.union(*smaller));
            covered != **row
        })
        .map(|(_, row)| *row)
        .collect()
}

/// Boolean dimension of `subset` against the rest of the graph's universe.
pub fn boolean_dimension<G: BaseGraph>(graph: &G, subset: BitSet) -> usize {
    generating_rows(&distinct_rows(graph, subset)).len()
}

/// Lazily filled map from subsets to their boolean dimension.
///
/// One cache belongs to exactly one computation on one graph; it is dropped
/// with the computation that created it.
pub struct SubsetCache<'a, G: BaseGraph> {
    graph: &'a G,
    memory: FxHashMap<BitSet, usize>,
    hits: usize,
}

impl<'a, G: BaseGraph> SubsetCache<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            memory: FxHashMap::default(),
            hits: 0,
        }
    }

    pub fn with_capacity(graph: &'a G, capacity: usize) -> Self {
        Self {
            graph,
            memory: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hits: 0,
        }
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn dimension(&mut self, subset: BitSet) -> usize {
        if let Some(d) = self.memory.get(&subset) {
            self.hits += 1;
            return *d;
        }
        let d = boolean_dimension(self.graph, subset);
        self.memory.insert(subset, d);
        d
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl<'a, G: BaseGraph> Drop for SubsetCache<'a, G> {
    fn drop(&mut self) {
        #[cfg(feature = "log")]
        debug!(
            "dropping subset cache with {} entries and {} hits",
            self.memory.len(),
            self.hits
        );
    }
}
