//! Error types for daycal.

use thiserror::Error;

/// Reasons a line, filename or time string could not be decoded.
///
/// These are always recoverable: stores skip the offending entry and log a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    EmptyLine,

    #[error("no title after the time")]
    MissingBody,

    #[error("invalid time '{0}'")]
    InvalidTime(String),

    #[error("event has no title")]
    EmptyTitle,

    #[error("invalid filename '{0}'")]
    InvalidFilename(String),
}

/// Errors that can occur in daycal operations.
#[derive(Error, Debug)]
pub enum DaycalError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("No event at position {index} (day has {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid event: {0}")]
    InvalidState(String),

    #[error("Too many filename collisions for '{0}'")]
    TooManyCollisions(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No storage location available (home directory could not be resolved)")]
    StorageUnavailable,
}

/// Result type alias for daycal operations.
pub type DaycalResult<T> = Result<T, DaycalError>;
