//! Report errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading inputs or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or JSON not matching the result shape
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that is neither a result list nor a paginated response
    #[error("{path} does not contain a result list")]
    NotAResultList {
        /// File involved.
        path: PathBuf,
    },

    /// Serialization of a report failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
