//! Compiler error types

use thiserror::Error;
use verdict_parser::ParseError;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Two nodes share an id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// Edge references a node that does not exist
    #[error("Edge '{edge_id}' references unknown node '{node_id}'")]
    DanglingEdge { edge_id: String, node_id: String },

    /// The graph is not acyclic; lists the nodes that could not be ordered
    #[error("Decision graph contains a cycle (unordered nodes: {})", .0.join(", "))]
    Cycle(Vec<String>),

    /// No input node in the document
    #[error("Decision graph has no input node")]
    MissingInputNode,

    /// No output node in the document
    #[error("Decision graph has no output node")]
    MissingOutputNode,

    /// An expression inside a node failed to parse
    #[error("Invalid expression in node '{node_id}' ({location}): {source}")]
    InvalidExpression {
        node_id: String,
        location: String,
        #[source]
        source: ParseError,
    },

    /// Node content is present but unusable
    #[error("Invalid content for node '{node_id}': {message}")]
    InvalidContent { node_id: String, message: String },

    /// Document failed to parse
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompileError::Cycle(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            err.to_string(),
            "Decision graph contains a cycle (unordered nodes: a, b)"
        );

        let err = CompileError::InvalidExpression {
            node_id: "table".to_string(),
            location: "rule 'r1', column 'c1'".to_string(),
            source: ParseError::UnknownFunction("date".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid expression in node 'table' (rule 'r1', column 'c1'): Unknown function: date"
        );
    }
}
