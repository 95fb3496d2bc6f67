//! DecisionEngine - Main API for evaluating decisions
//!
//! The module is organized into:
//! - `engine`: the `DecisionEngine` entry point
//! - `decision`: the compiled `Decision` handle
//! - `compiler_helper`: loading, compilation, caching and sub-decision resolution

mod compiler_helper;
mod decision;
mod engine;

pub use decision::Decision;
pub use engine::DecisionEngine;
