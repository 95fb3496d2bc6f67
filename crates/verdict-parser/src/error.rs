//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid expression syntax
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Input ended while more was expected
    #[error("Unexpected end of expression: {0}")]
    UnexpectedEnd(String),

    /// Function name is not a built-in
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Built-in called with the wrong number of arguments
    #[error("Function '{function}' does not accept {actual} argument(s)")]
    InvalidArity { function: String, actual: usize },

    /// Template span opened with `{{` but never closed
    #[error("Unclosed template span starting at position {position}")]
    UnclosedTemplate { position: usize },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Node `type` is not one of the supported kinds
    #[error("Unknown node kind '{kind}' for node '{node_id}'")]
    UnknownNodeKind { node_id: String, kind: String },

    /// Node content does not match its kind
    #[error("Invalid content for node '{node_id}': {message}")]
    InvalidContent { node_id: String, message: String },
}

impl ParseError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
