//! Error types for the Shelfmark library.
//!
//! Per-record errors (missing rows, bad URIs, filesystem failures) are
//! reported to the organizer, which skips the record and continues the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Shelfmark operations.
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    // Missing relational rows
    #[error("Document not found: {doc_id}")]
    DocumentNotFound { doc_id: i64 },

    #[error("File record not found: {hash}")]
    FileNotFound { hash: String },

    #[error("Folder not found: {folder_id}")]
    FolderNotFound { folder_id: i64 },

    // Stored location URIs that cannot be interpreted
    #[error("Invalid location URI {uri:?}: {reason}")]
    InvalidLocationUri { uri: String, reason: String },

    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Result type alias for Shelfmark operations.
pub type Result<T> = std::result::Result<T, ShelfmarkError>;

impl From<rusqlite::Error> for ShelfmarkError {
    fn from(err: rusqlite::Error) -> Self {
        ShelfmarkError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<std::io::Error> for ShelfmarkError {
    fn from(err: std::io::Error) -> Self {
        ShelfmarkError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl ShelfmarkError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShelfmarkError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
