//! Verdict Compiler - decision document to IR compiler
//!
//! This crate validates decision graphs and compiles them into the
//! immutable IR executed by the runtime.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod optimizer;
pub mod semantic;

// Re-export main types
pub use compiler::{Compiler, CompilerOptions};
pub use error::{CompileError, Result};

pub use codegen::{ExpressionCompiler, NodeCompiler, TableCompiler};
pub use optimizer::ConstantFolder;
pub use semantic::{GraphAnalyzer, GraphLayout};
