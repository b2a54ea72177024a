//! Detection log error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// File I/O error.
    #[error("failed to {operation} detection log {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log line that is not a valid entry.
    #[error("invalid detection log entry at {path}:{line}")]
    InvalidEntry {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize detection log entry")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, HistoryError>;
