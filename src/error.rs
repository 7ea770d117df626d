//! Centralized error types for quickchat.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the quickchat library.
#[derive(Error, Debug)]
pub enum ChatError {
    /// I/O error with the associated file path.
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Records could not be serialized.
    #[error("Could not encode records: {0}")]
    Encode(#[from] serde_json::Error),

    /// The recipient is not a `+`-prefixed number of 10 to 13 characters.
    #[error("Recipient is incorrectly formatted: {0}")]
    InvalidRecipient(String),

    /// The message text is longer than the configured maximum.
    #[error("Message is {len} characters long, the maximum is {max}")]
    MessageTooLong { len: usize, max: usize },

    /// The caller picked something other than send, store or disregard.
    #[error("Invalid action: {0}")]
    InvalidDisposition(String),
}

/// Convenience alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
