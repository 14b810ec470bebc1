//! Domain errors.

use thiserror::Error;

/// Errors raised while constructing value objects from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long ({actual} > {max} characters)")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Errors reported by a [`MessageStore`](super::MessageStore) backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached at all
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    /// The backend was reached but rejected or failed the operation
    #[error("message store backend error: {0}")]
    Backend(String),
}

/// Errors reported by a [`MessagePusher`](super::MessagePusher)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("session '{0}' is not connected")]
    SessionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
