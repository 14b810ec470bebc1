//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{ErrorResponseDto, PersistedMessageDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Every persisted message, ordered by store creation time
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PersistedMessageDto>>, (StatusCode, Json<ErrorResponseDto>)> {
    match state.get_messages_usecase.execute().await {
        Ok(messages) => Ok(Json(
            messages
                .iter()
                .map(|m| PersistedMessageDto::from_stored(m, state.offset))
                .collect(),
        )),
        Err(e) => {
            tracing::error!("Error fetching messages: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto {
                    error: "Internal server error".to_string(),
                }),
            ))
        }
    }
}
