//! Server bootstrap errors.

use thiserror::Error;

use crate::domain::StoreError;

/// Errors that stop the server from starting or running
#[derive(Debug, Error)]
pub enum ServerError {
    /// The message store did not answer the startup probe
    #[error("message store is not reachable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
