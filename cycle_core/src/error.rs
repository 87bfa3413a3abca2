//! Error types for the cycle_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cycle_core operations
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

    /// Cycle settings rejected by validation
    #[error("Invalid cycle settings: {0}")]
    InvalidSettings(String),

    /// Unparseable calendar date
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Journal entry error
    #[error("Journal error: {0}")]
    Journal(String),

    /// No cycle settings have been saved yet
    #[error("Cycle not configured: run `cycle setup` first")]
    NotConfigured,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
