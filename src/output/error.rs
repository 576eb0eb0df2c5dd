//! Output error types

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot name output files, URL has no host: {0}")]
    MissingHost(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
