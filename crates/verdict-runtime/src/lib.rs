//! Verdict Runtime - Evaluation engine for compiled Verdict decisions
//!
//! This crate evaluates [`CompiledDecision`](verdict_core::CompiledDecision)s:
//! - Expression, unary test and template evaluation
//! - Decision table matching and the other node evaluators
//! - Graph scheduling with depth-limited sub-decisions
//! - Execution trace capture
//! - The custom node bridge

pub mod context;
pub mod custom;
pub mod error;
pub mod expression;
pub mod graph;
mod nodes;
pub mod resolver;
pub mod result;

// Re-export main types
pub use context::{EvaluationContext, NodeState, Scope};
pub use custom::{CustomNode, CustomNodeHandler, CustomNodeRegistry, NodeRequest, NodeResponse};
pub use error::{Result, RuntimeError};
pub use expression::{evaluate, evaluate_unary, render_template};
pub use graph::{EvaluationOptions, GraphExecutor, GraphResult, DEFAULT_MAX_DEPTH};
pub use resolver::SubDecisionResolver;
pub use result::{EvaluationResponse, NodeTrace};
