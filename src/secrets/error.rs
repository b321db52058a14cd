//! Error types for persisting credential records.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for secret sink operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while storing credential records.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Writing the record to its destination failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record cannot be rendered (e.g. a line break inside a field).
    #[error("Invalid credential record: {reason}")]
    InvalidRecord { reason: String },
}

impl SecretsError {
    /// Create an I/O error bound to the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create an invalid record error.
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord { reason: reason.into() }
    }
}
