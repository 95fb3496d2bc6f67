//! Runtime error types

use thiserror::Error;
use verdict_core::CoreError;
use verdict_parser::ParseError;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Operand types do not fit the operation
    #[error("Type error: {0}")]
    TypeError(String),

    /// Top-level identifier not present in the scope
    #[error("Undefined reference: {0}")]
    UndefinedReference(String),

    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Built-in rejected its arguments
    #[error("Invalid argument to '{function}': {message}")]
    InvalidArgument { function: String, message: String },

    /// Unary test did not produce a boolean
    #[error("Unary expression must evaluate to a boolean, got {0}")]
    NonBooleanUnary(String),

    /// Expression or template text parsed at evaluation time was invalid
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Value conversion failed
    #[error(transparent)]
    Conversion(#[from] CoreError),

    /// Custom node config path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Graph evaluated at or beyond the allowed depth
    #[error("Depth limit exceeded: maximum sub-decision depth is {max_depth}")]
    DepthExceeded { max_depth: u8 },

    /// Sub-decision key could not be resolved or compiled
    #[error("Failed to resolve decision '{key}': {message}")]
    Resolution { key: String, message: String },

    /// Custom node evaluated without a handler
    #[error("Custom node '{node_id}' cannot be evaluated: no custom node handler is configured")]
    CustomNodeNotConfigured { node_id: String },

    /// Custom node handler returned an error
    #[error("Custom node '{node_id}' failed: {message}")]
    Extension { node_id: String, message: String },

    /// Node evaluation failed; wraps the cause
    #[error("Node '{node_id}' failed: {source}")]
    NodeFailed {
        node_id: String,
        #[source]
        source: Box<RuntimeError>,
    },
}

impl RuntimeError {
    /// Attach the failing node to an error.
    ///
    /// Errors from sub-decisions nest, so the message reads from the outer
    /// node down to the node that actually failed. A node that recursively
    /// calls its own decision is named once, not once per level.
    pub fn in_node(self, node_id: &str) -> Self {
        if matches!(&self, RuntimeError::NodeFailed { node_id: inner, .. } if inner == node_id) {
            return self;
        }
        RuntimeError::NodeFailed {
            node_id: node_id.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost cause, looking through node wrappers
    pub fn root_cause(&self) -> &RuntimeError {
        match self {
            RuntimeError::NodeFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        RuntimeError::TypeError(message.into())
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_chain_message() {
        let err = RuntimeError::DivisionByZero.in_node("inner").in_node("outer");
        assert_eq!(
            err.to_string(),
            "Node 'outer' failed: Node 'inner' failed: Division by zero"
        );
        assert!(matches!(err.root_cause(), RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_same_node_is_not_wrapped_twice() {
        let err = (0..255).fold(
            RuntimeError::DepthExceeded { max_depth: 255 },
            |err, _| err.in_node("again"),
        );
        assert_eq!(
            err.to_string(),
            "Node 'again' failed: Depth limit exceeded: maximum sub-decision depth is 255"
        );

        let err = err.in_node("outer").in_node("outer");
        assert_eq!(err.to_string().matches("Node 'outer'").count(), 1);
    }

    #[test]
    fn test_root_cause_of_depth_error() {
        let err = RuntimeError::DepthExceeded { max_depth: 1 }.in_node("child");
        assert!(matches!(
            err.root_cause(),
            RuntimeError::DepthExceeded { max_depth: 1 }
        ));
    }
}
