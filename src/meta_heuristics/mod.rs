pub use first_improvement::{FirstImprovement, DEFAULT_BUDGET};

mod first_improvement;
