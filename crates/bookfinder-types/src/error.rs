//! Error types for value parsing in bookfinder-types.

use thiserror::Error;

/// Errors that can occur when parsing BookFinder values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The name does not match any of the three reading lists.
    #[error(
        "Unknown reading list '{0}'. Valid lists: wantToRead, currentlyReading, completed"
    )]
    UnknownReadingList(String),

    /// The name is not a known view mode.
    #[error("Unknown view mode '{0}'. Valid modes: grid, list")]
    UnknownViewMode(String),

    /// The name is not a known theme.
    #[error("Unknown theme '{0}'. Valid themes: light, dark")]
    UnknownTheme(String),
}

/// Result type alias using bookfinder-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
