//! Error types for sift.

use thiserror::Error;

/// Result type alias for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Errors that can occur in sift operations.
#[derive(Error, Debug)]
pub enum SiftError {
    /// Caller supplied a structurally invalid argument
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("Parse error at line {line}: {message}")]
    Json { line: usize, message: String },

    /// Invalid data format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// An argument failed validation.
///
/// Raised before any computation starts, so no partial result exists
/// alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `threshold` must be at least one character.
    #[error("threshold must be > 0 (got {0})")]
    Threshold(usize),

    /// `separator` must not be empty.
    #[error("separator must not be empty")]
    Separator,

    /// `length` must be at least one character.
    #[error("prefix length must be > 0 (got {0})")]
    PrefixLength(usize),

    /// `items` was expected to be a list.
    #[error("items must be a list, got {0}")]
    NotAList(&'static str),

    /// `items[index]` was expected to be a mapping.
    #[error("items[{index}] must be a mapping, got {kind}")]
    NotARecord { index: usize, kind: &'static str },

    /// A required key was absent from a record.
    #[error("key '{key}' not found in record")]
    MissingKey { key: String },

    /// The requested grouping mode is not known.
    #[error("unsupported grouping mode '{0}'")]
    UnsupportedMode(String),
}
