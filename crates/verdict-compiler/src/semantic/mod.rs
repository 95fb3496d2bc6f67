//! Semantic analysis module
//!
//! Structural checks on the decision graph performed before code generation.

pub mod graph_analyzer;

pub use graph_analyzer::{GraphAnalyzer, GraphLayout};
