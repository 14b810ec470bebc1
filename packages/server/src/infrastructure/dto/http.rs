//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Persisted message record returned by `GET /api/messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMessageDto {
    pub user: String,
    pub message: String,
    /// Server receipt time (RFC 3339)
    pub timestamp: String,
    /// Store creation time (RFC 3339)
    pub created_at: String,
}

/// Error body for failed HTTP requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
