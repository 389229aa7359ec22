//! Error types for the tokenization engine

use thiserror::Error;

/// Error type for engine operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed settings file, quote table entry, or EOS marker entry
    #[error("configuration error: {0}")]
    Config(String),

    /// A rule pattern failed to compile
    #[error("rule {id}: invalid regular expression: {source}")]
    Rule {
        id: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A sentence index or flush count outside the buffer
    #[error("out of range: {0}")]
    Range(String),

    /// Input bytes cannot be decoded under the declared encoding
    #[error("cannot decode input as {encoding}")]
    Coding { encoding: String },

    /// An internal invariant was violated by the calling contract
    #[error("logic error: {0}")]
    Logic(String),

    /// I/O failure while reading settings or input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
