pub use base_graph::BaseGraph;
pub use bit_graph::BitGraph;
pub use kind::{GraphKind, Group};
pub use mutable_graph::MutableGraph;

mod base_graph;
pub(crate) mod bit_graph;
mod kind;
mod mutable_graph;
