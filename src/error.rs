use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolwError {
    /// Malformed subset, duplicate or missing vertex, illegal edge, empty split.
    InvalidInput(String),
    /// More vertices than a bitset or the exact solver can hold.
    CapacityExceeded { requested: usize, capacity: usize },
    /// A producer's claim disagrees with the independently checked value.
    InconsistentState(String),
}

impl Display for BoolwError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BoolwError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            BoolwError::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "Capacity Exceeded: requested {}, capacity {}",
                requested, capacity
            ),
            BoolwError::InconsistentState(msg) => write!(f, "Inconsistent State: {}", msg),
        }
    }
}

impl std::error::Error for BoolwError {}

impl BoolwError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        BoolwError::InvalidInput(msg.into())
    }
}
