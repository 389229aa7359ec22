//! CLI error types

use thiserror::Error;

/// Error type for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine-level failure
    #[error("tokenizer error: {0}")]
    Engine(#[from] unitok_core::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed glob pattern
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob expansion failure
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
