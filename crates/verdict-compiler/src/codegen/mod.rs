//! Code generation module
//!
//! Turns document node content into the compiled node programs executed by
//! the runtime.

pub mod expression_codegen;
pub mod node_codegen;
pub mod table_codegen;

pub use expression_codegen::ExpressionCompiler;
pub use node_codegen::NodeCompiler;
pub use table_codegen::TableCompiler;
