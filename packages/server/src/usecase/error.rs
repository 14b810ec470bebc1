//! UseCase errors.

use thiserror::Error;

use crate::domain::StoreError;

/// Errors on the chat submit path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// The message could not be persisted and was not broadcast
    #[error("failed to persist message: {0}")]
    PersistenceFailed(#[from] StoreError),

    /// The chat dispatcher task is no longer running
    #[error("chat dispatcher is closed")]
    DispatcherClosed,
}
