//! Error types for bookfinder-store.

use std::path::PathBuf;

/// Result type for bookfinder-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bookfinder-store.
///
/// Store mutations never return these: write failures are downgraded to
/// warnings inside [`Store`](crate::Store). They surface from opening storage,
/// from the [`Storage`](crate::Storage) backends themselves, and from export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The database was written with a schema this build cannot read.
    #[error("Unsupported database schema version {found} (this build reads version {supported})")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
