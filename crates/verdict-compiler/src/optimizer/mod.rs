//! Optimization module
//!
//! Expression-level rewrites applied to every compiled node.

pub mod constant_folding;

pub use constant_folding::ConstantFolder;
