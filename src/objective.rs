use crate::error::BoolwError;
use std::cmp::max;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the dimensions of all cuts of a decomposition are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Maximum over all cuts.
    Width,
    /// Sum over all cuts.
    Cost,
}

impl Default for Measure {
    fn default() -> Self {
        Self::Width
    }
}

impl Measure {
    #[inline]
    pub fn aggregate(&self, acc: usize, dimension: usize) -> usize {
        match self {
            Measure::Width => max(acc, dimension),
            Measure::Cost => acc + dimension,
        }
    }

    /// Aggregate with values that are known to be `u32`, as in the DP tables.
    #[inline]
    pub(crate) fn aggregate_u32(&self, acc: u32, dimension: u32) -> u32 {
        match self {
            Measure::Width => max(acc, dimension),
            Measure::Cost => acc.saturating_add(dimension),
        }
    }
}

/// Form of a decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Linear,
    Tree,
}

impl Default for Shape {
    fn default() -> Self {
        Self::Linear
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Width => write!(f, "width"),
            Measure::Cost => write!(f, "cost"),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Linear => write!(f, "linear"),
            Shape::Tree => write!(f, "tree"),
        }
    }
}

impl FromStr for Measure {
    type Err = BoolwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(Measure::Width),
            "cost" => Ok(Measure::Cost),
            _ => Err(BoolwError::invalid(format!("unknown measure '{}'", s))),
        }
    }
}

impl FromStr for Shape {
    type Err = BoolwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Shape::Linear),
            "tree" => Ok(Shape::Tree),
            _ => Err(BoolwError::invalid(format!("unknown shape '{}'", s))),
        }
    }
}
