//! Intermediate Representation (IR) for Verdict
//!
//! The IR is the compiled, execution-ready form of a decision document:
//! nodes in a stable topological order with every embedded expression
//! already parsed. It serves as the target of compilation and is shared
//! read-only by concurrent evaluations.

pub mod node;
pub mod program;

pub use node::{CompiledNode, CompiledRow, CompiledTable, NodeProgram, TableInput, TableOutput};
pub use program::{CompiledDecision, DecisionMetadata};
