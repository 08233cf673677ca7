//! Core error types

use thiserror::Error;

/// Errors raised while reading or writing an animated attribute
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttrError {
    /// Attribute does not exist on the target container
    #[error("attribute `{0}` not found on target")]
    Missing(String),

    /// Resolved `from` and `to` values are of different kinds
    #[error("attribute `{key}`: expected a {expected} value, got a {got} value")]
    KindMismatch {
        key: String,
        expected: &'static str,
        got: &'static str,
    },

    /// The container rejected the write
    #[error("failed to write attribute `{key}`: {reason}")]
    Apply { key: String, reason: String },
}

/// Result type for attribute operations
pub type Result<T> = std::result::Result<T, AttrError>;
