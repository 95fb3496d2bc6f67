//! Abstract Syntax Tree (AST) definitions for the expression language
//!
//! This module contains the AST node definitions for:
//! - Expressions
//! - Binary and unary operators
//! - Built-in functions
//! - Templates

pub mod expression;
pub mod function;
pub mod operator;
pub mod template;

pub use expression::{Expression, UnaryOperator};
pub use function::BuiltinFunction;
pub use operator::Operator;
pub use template::{Template, TemplateSegment};
