//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied a value the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store index outside `[0, len)`
    #[error("Index {index} out of range (store holds {len} measurements)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Store file could not be read or written (strict mode only)
    #[error("Persistence error: {0}")]
    Persistence(String),
}
