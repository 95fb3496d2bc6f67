//! Verdict Core - Core types and definitions for the Verdict decision engine
//!
//! This crate provides the fundamental types shared by every other crate:
//! - Value types for runtime data
//! - Expression AST definitions
//! - The decision document model (nodes and edges)
//! - The compiled IR executed by the runtime
//! - Error types

pub mod ast;
pub mod document;
pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use document::{DecisionDocument, Edge, Node, NodeKind};
pub use error::CoreError;
pub use ir::CompiledDecision;
pub use types::Value;
