//! Exact and heuristic boolean-width and boolean-cost decompositions.
//!
//! Graphs of up to [`BitSet::CAPACITY`] vertices are stored as neighborhood
//! bitsets. Small graphs are solved exactly by a dynamic program over all
//! vertex subsets, larger ones by greedy builders and local search. Every
//! result is checked against an independent recomputation of its objective.
//!
//! ```
//! use boolean_width::graph::BitGraph;
//! use boolean_width::{check_decomposition, Measure, Solver};
//!
//! let cycle = BitGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let result = Solver::boolean_width().solve(&cycle).unwrap();
//! assert_eq!(result.objective_value, 1);
//! assert_eq!(
//!     check_decomposition(&cycle, &result.decomposition, Measure::Width),
//!     Ok(1)
//! );
//! ```

macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

pub mod booldim;
pub mod check;
pub mod datastructures;
pub mod decomposition;
pub mod error;
pub mod exact;
pub mod graph;
pub mod heuristic_decomposition;
pub mod io;
#[cfg(feature = "logging")]
pub mod logger;
pub mod meta_heuristics;
pub mod objective;
pub mod scoring;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;
pub mod solver;

pub use booldim::{boolean_dimension, SubsetCache};
pub use check::check_decomposition;
pub use datastructures::{BitSet, BitSetIterator};
pub use decomposition::{Cut, Decomposition, DecompositionTree, LinearDecomposition};
pub use error::BoolwError;
pub use exact::{boolean_cost, boolean_width, linear_boolean_cost, linear_boolean_width};
pub use objective::{Measure, Shape};
pub use scoring::Scoring;
pub use solver::{BoolwResult, HeuristicType, Solver};
