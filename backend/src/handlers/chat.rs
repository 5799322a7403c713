//! HTTP handlers for the advisory chat

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::ChatMessage;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: String,
}

/// Ask the assistant a question
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<Json<ChatMessage>> {
    input.validate()?;
    if input.message.trim().is_empty() {
        return Err(AppError::Validation {
            field: "message".to_string(),
            message: "Message must not be empty".to_string(),
        });
    }

    let answer = state.advisory.ask(&current.handle, &input.message).await;
    Ok(Json(answer))
}

/// Transcript in the order messages were sent
pub async fn list_messages(current: CurrentSession) -> Json<Vec<ChatMessage>> {
    let session = current.handle.lock().await;
    Json(session.chat_messages().to_vec())
}

pub async fn clear_messages(current: CurrentSession) -> StatusCode {
    current.handle.lock().await.clear_chat();
    StatusCode::NO_CONTENT
}
