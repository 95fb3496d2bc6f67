//! Evaluation context module
//!
//! Expression scopes and the per-call state of a graph evaluation.

mod context;
mod field_lookup;
mod scope;

pub use context::{EvaluationContext, NodeState};
pub use field_lookup::{lookup_field, resolve_config_path};
pub use scope::Scope;
