//! Verdict Parser - text to AST parsers for the Verdict decision engine
//!
//! This crate provides parsers for:
//! - Expressions, in standard and unary (table cell) mode
//! - Templates with `{{ expression }}` spans
//! - Decision documents in JSON or YAML form

pub mod document_parser;
pub mod error;
pub mod expression_parser;
pub mod lexer;
pub mod template_parser;

// Re-export main parser types
pub use document_parser::{DocumentFormat, DocumentParser};
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, MAX_NESTING, MAX_OPERATORS};
pub use template_parser::TemplateParser;
