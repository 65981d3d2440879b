//! Error types for the evaluation framework

use thiserror::Error;

/// Result type alias for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvalError {
    /// Failed to load a dataset or config file
    #[error("Failed to load file: {0}")]
    LoadError(String),

    /// A function-call record or dataset entry did not have the expected shape
    #[error("Failed to parse record: {0}")]
    ParseError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML config error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}
