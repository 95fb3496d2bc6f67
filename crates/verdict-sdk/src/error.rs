//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] verdict_parser::ParseError),

    /// Compiler error
    #[error("Compiler error: {0}")]
    CompileError(#[from] verdict_compiler::CompileError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] verdict_runtime::RuntimeError),

    /// Context or result could not be converted
    #[error("Conversion error: {0}")]
    ConversionError(#[from] verdict_core::CoreError),

    /// Loader failed; the loader's message is kept verbatim
    #[error("Failed to load decision '{key}': {message}")]
    LoaderError { key: String, message: String },

    /// Decision requested by key with no loader configured
    #[error("No loader configured, cannot load decision '{0}'")]
    NoLoader(String),

    /// Loaded document failed to compile
    #[error("Invalid decision '{key}': {source}")]
    InvalidDecision {
        key: String,
        #[source]
        source: verdict_compiler::CompileError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SdkError {
    /// Message used when this error surfaces from a sub-decision lookup.
    ///
    /// Loader messages are passed through as-is so the original text is
    /// not buried under the key, which the resolution error already names.
    pub(crate) fn resolution_message(&self) -> String {
        match self {
            SdkError::LoaderError { message, .. } => message.clone(),
            SdkError::InvalidDecision { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("Invalid configuration".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_loader_error_keeps_key_and_message() {
        let error = SdkError::LoaderError {
            key: "myKey".to_string(),
            message: "Custom error".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to load decision 'myKey': Custom error");
        assert_eq!(error.resolution_message(), "Custom error");
    }

    #[test]
    fn test_runtime_error_conversion() {
        let error: SdkError = verdict_runtime::RuntimeError::DivisionByZero.into();
        assert!(error.to_string().contains("Runtime error"));
        assert!(error.to_string().contains("Division by zero"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::NoLoader("a.json".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("NoLoader"));
    }
}
