//! Error types for Verdict Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
