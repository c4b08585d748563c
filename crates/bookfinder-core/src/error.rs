//! Error types for bookfinder-core.
//!
//! Catalog requests are attempted once. Every failure is returned to the
//! caller as-is; there is no retry or backoff.

use thiserror::Error;

/// Errors that can occur when talking to the catalog.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The catalog could not be reached.
    #[error("Catalog not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed after a connection was made.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No record exists for the given key.
    #[error("No catalog record for {0}")]
    NotFound(String),

    /// A search with no query text, author or subject.
    #[error("Search needs a query, an author or a subject")]
    EmptyQuery,
}

/// Result type alias using bookfinder-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
