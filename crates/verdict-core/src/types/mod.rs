//! Type system for Verdict
//!
//! Runtime values shared by the evaluator, the decision graph and the host API.

pub mod value;

pub use value::Value;
