//! Tween error types

use slew_core::AttrError;
use thiserror::Error;

/// Errors that settle a session as failed or reject an animate request
///
/// Cancellation is not an error; it is a normal session outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Reading or writing an animated attribute failed
    #[error(transparent)]
    Attr(#[from] AttrError),

    /// The per-tick hook reported a failure
    #[error("tick hook failed: {0}")]
    Hook(String),
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;
