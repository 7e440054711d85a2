//! Scoring strategies for the greedy builders.
//!
//! A move joins `addition` to `left`: a vertex to the current front in the
//! linear builders, one pool member to another in the tree builders. Every
//! strategy maps a move to an `i64`; lower is better.

use crate::booldim::SubsetCache;
use crate::datastructures::BitSet;
use crate::error::BoolwError;
use crate::graph::BaseGraph;
use std::cmp::min;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Everything a custom scoring function gets to see about a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub left: BitSet,
    pub addition: BitSet,
    /// Vertices outside `left ∪ addition`.
    pub rest: BitSet,
    /// Boolean dimension of `left ∪ addition`.
    pub dimension: usize,
}

pub type DynamicScoring = fn(&Candidate) -> i64;

#[derive(Clone, Copy)]
pub enum Scoring {
    /// Boolean dimension of the new front.
    MinFront,
    /// Number of vertices outside the new front with a neighbor inside it.
    Lun,
    /// Smaller side of the new front's boundary: the inner vertices with an
    /// outside neighbor or the outside vertices with an inner neighbor. Both
    /// bound the boolean dimension from above.
    MinCoverSize,
    /// Neighbors of the addition still outside, minus those already in `left`.
    RelativeNeighborhood,
    /// Neighbors of the addition still outside.
    NeighborhoodSize,
    Custom(DynamicScoring),
}

impl Default for Scoring {
    fn default() -> Self {
        Self::MinFront
    }
}

impl Scoring {
    pub fn score<G: BaseGraph>(
        &self,
        cache: &mut SubsetCache<G>,
        left: BitSet,
        addition: BitSet,
    ) -> i64 {
        let graph = cache.graph();
        let front = left.union(addition);
        let rest = graph.universe().difference(front);
        match self {
            Scoring::MinFront => cache.dimension(front) as i64,
            Scoring::Lun => graph.exterior_border(front).cardinality() as i64,
            Scoring::MinCoverSize => {
                let outer = graph.exterior_border(front).cardinality();
                let inner = front
                    .vertices()
                    .filter(|v| graph.neighborhood(*v).intersects_with(&rest))
                    .count();
                min(inner, outer) as i64
            }
            Scoring::RelativeNeighborhood => {
                let neighbors = graph.neighbors_of(addition);
                neighbors.intersect(rest).cardinality() as i64
                    - neighbors.intersect(left).cardinality() as i64
            }
            Scoring::NeighborhoodSize => {
                graph.neighbors_of(addition).intersect(rest).cardinality() as i64
            }
            Scoring::Custom(f) => f(&Candidate {
                left,
                addition,
                rest,
                dimension: cache.dimension(front),
            }),
        }
    }
}

impl fmt::Debug for Scoring {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Scoring {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scoring::MinFront => "minfront",
            Scoring::Lun => "lun",
            Scoring::MinCoverSize => "min_cover_size",
            Scoring::RelativeNeighborhood => "relative_neighborhood",
            Scoring::NeighborhoodSize => "neighborhood_size",
            Scoring::Custom(_) => "custom",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Scoring {
    type Err = BoolwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minfront" => Ok(Scoring::MinFront),
            "lun" => Ok(Scoring::Lun),
            "min_cover_size" => Ok(Scoring::MinCoverSize),
            "relative_neighborhood" => Ok(Scoring::RelativeNeighborhood),
            "neighborhood_size" => Ok(Scoring::NeighborhoodSize),
            _ => Err(BoolwError::invalid(format!("unknown scoring '{}'", s))),
        }
    }
}
