//! Decision graph evaluation

mod executor;
mod options;

pub use executor::{GraphExecutor, GraphResult};
pub use options::{EvaluationOptions, DEFAULT_MAX_DEPTH};
