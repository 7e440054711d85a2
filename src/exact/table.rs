use crate::booldim::boolean_dimension;
use crate::datastructures::BitSet;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use crate::objective::{Measure, Shape};
use bitvec::prelude::*;

#[cfg(feature = "log")]
use log::info;

/// Hard ceiling for the exact solvers, independent of any configuration.
pub const MAX_EXACT_VERTICES: usize = 30;

/// Default ceiling used by [`Solver`](crate::solver::Solver).
pub const DEFAULT_EXACT_LIMIT: usize = 16;

/// Iterates all `n`-bit masks with exactly `k` bits set, in increasing order.
pub(crate) struct Combinations {
    current: usize,
    end: usize,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            current: (1usize << k) - 1,
            end: 1usize << n,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current >= self.end {
            return None;
        }
        let x = self.current;
        if x == 0 {
            self.done = true;
        } else {
            // Gosper's hack
            let c = x & x.wrapping_neg();
            let r = x + c;
            self.current = (((r ^ x) >> 2) / c) | r;
        }
        Some(x)
    }
}

/// Finalized dynamic programming table over all subsets of the vertex set.
///
/// Vertices are renumbered to `0..n` by ascending id; a subset is addressed by
/// its `n`-bit mask in that numbering. For every mask the table keeps the
/// boolean dimension of the subset, the optimal objective value of a partial
/// decomposition of it and the choice that attained the optimum: the last
/// vertex (linear) or the mask of the left part (tree).
#[derive(Debug, Clone)]
pub struct SubsetTable {
    measure: Measure,
    shape: Shape,
    vertices: Vec<usize>,
    dimension: Vec<u32>,
    value: Vec<u32>,
    choice: Vec<u32>,
    finalized: BitVec,
}

fn try_table(size: usize, order: usize) -> Result<Vec<u32>, BoolwError> {
    let mut v: Vec<u32> = Vec::new();
    v.try_reserve_exact(size)
        .map_err(|_| BoolwError::CapacityExceeded {
            requested: order,
            capacity: order.saturating_sub(1),
        })?;
    v.resize(size, u32::MAX);
    Ok(v)
}

impl SubsetTable {
    /// Rejects graphs above `limit` (or [`MAX_EXACT_VERTICES`]) before
    /// anything of exponential size is allocated.
    pub(crate) fn allocate<G: BaseGraph>(
        graph: &G,
        measure: Measure,
        shape: Shape,
        limit: usize,
    ) -> Result<Self, BoolwError> {
        let n = graph.order();
        let capacity = limit.min(MAX_EXACT_VERTICES);
        if n > capacity {
            return Err(BoolwError::CapacityExceeded {
                requested: n,
                capacity,
            });
        }
        let size = 1usize << n;
        #[cfg(feature = "log")]
        info!(
            "allocating {} table with {} entries for {} vertices",
            shape, size, n
        );
        Ok(Self {
            measure,
            shape,
            vertices: graph.universe().to_vec(),
            dimension: try_table(size, n)?,
            value: try_table(size, n)?,
            choice: try_table(size, n)?,
            finalized: bitvec![0; size],
        })
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of vertices covered by the table.
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn full_mask(&self) -> usize {
        self.value.len() - 1
    }

    pub fn vertex(&self, local: usize) -> usize {
        self.vertices[local]
    }

    pub fn to_bitset(&self, mask: usize) -> BitSet {
        let mut set = BitSet::empty();
        let mut rest = mask;
        while rest != 0 {
            let i = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            set = set.union(BitSet::singleton(self.vertices[i]));
        }
        set
    }

    pub fn to_mask(&self, subset: BitSet) -> Option<usize> {
        let mut mask = 0usize;
        for v in subset.vertices() {
            let i = self.vertices.binary_search(&v).ok()?;
            mask |= 1 << i;
        }
        Some(mask)
    }

    pub(crate) fn compute_dimension<G: BaseGraph>(&mut self, graph: &G, mask: usize) -> u32 {
        let d = boolean_dimension(graph, self.to_bitset(mask)) as u32;
        self.dimension[mask] = d;
        d
    }

    pub(crate) fn finalize(&mut self, mask: usize, value: u32, choice: u32) {
        self.value[mask] = value;
        self.choice[mask] = choice;
        self.finalized.set(mask, true);
    }

    /// Value of an already finalized entry.
    pub(crate) fn finalized_value(&self, mask: usize) -> Result<u32, BoolwError> {
        if self.finalized[mask] {
            Ok(self.value[mask])
        } else {
            Err(BoolwError::InconsistentState(format!(
                "subset {} was read before it was finalized",
                self.to_bitset(mask)
            )))
        }
    }

    pub(crate) fn finalized_choice(&self, mask: usize) -> Result<u32, BoolwError> {
        self.finalized_value(mask).map(|_| self.choice[mask])
    }

    pub fn is_finalized(&self, mask: usize) -> bool {
        mask < self.finalized.len() && self.finalized[mask]
    }

    pub fn value(&self, subset: BitSet) -> Option<usize> {
        let mask = self.to_mask(subset)?;
        if self.is_finalized(mask) {
            Some(self.value[mask] as usize)
        } else {
            None
        }
    }

    pub fn dimension(&self, subset: BitSet) -> Option<usize> {
        let mask = self.to_mask(subset)?;
        if self.is_finalized(mask) {
            Some(self.dimension[mask] as usize)
        } else {
            None
        }
    }

    /// Optimal objective of the whole graph.
    pub fn objective(&self) -> Result<usize, BoolwError> {
        self.finalized_value(self.full_mask()).map(|v| v as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::BitSet;
    use crate::exact::table::{Combinations, SubsetTable};
    use crate::error::BoolwError;
    use crate::graph::bit_graph::fixtures;
    use crate::graph::BitGraph;
    use crate::objective::{Measure, Shape};

    #[test]
    fn combinations() {
        let masks: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(masks, vec![0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]);
        assert_eq!(Combinations::new(4, 0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(Combinations::new(3, 3).collect::<Vec<_>>(), vec![0b111]);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        let total: usize = (0..=10).map(|k| Combinations::new(10, k).count()).sum();
        assert_eq!(total, 1 << 10);
    }

    #[test]
    fn capacity() {
        let graph = fixtures::path(12);
        assert_eq!(
            SubsetTable::allocate(&graph, Measure::Width, Shape::Linear, 10).map(|_| ()),
            Err(BoolwError::CapacityExceeded {
                requested: 12,
                capacity: 10
            })
        );
        let table = SubsetTable::allocate(&graph, Measure::Width, Shape::Tree, 12).unwrap();
        assert_eq!(table.len(), 1 << 12);
        assert!(!table.is_finalized(0));
    }

    #[test]
    fn renumbering() {
        let graph = BitGraph::with_vertices(BitSet::from_vertices(&[3, 7, 40]).unwrap());
        let table = SubsetTable::allocate(&graph, Measure::Cost, Shape::Linear, 5).unwrap();
        assert_eq!(table.order(), 3);
        assert_eq!(table.vertex(2), 40);
        let subset = BitSet::from_vertices(&[3, 40]).unwrap();
        assert_eq!(table.to_mask(subset), Some(0b101));
        assert_eq!(table.to_bitset(0b101), subset);
        assert_eq!(table.to_mask(BitSet::from_vertices(&[4]).unwrap()), None);
        assert!(table.objective().is_err());
    }
}
