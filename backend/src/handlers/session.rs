//! HTTP handlers for session lifecycle and session settings

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use shared::{validate_images, validate_location, AppSession, UserRole, WeatherSnapshot};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
}

/// Overview of a session's state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub role: UserRole,
    pub user_location: String,
    pub is_offline: bool,
    pub is_analyzing: bool,
    pub image_count: usize,
    pub has_results: bool,
    pub analysis_error: Option<String>,
    pub weather: Option<WeatherSnapshot>,
    pub history_count: usize,
    pub chat_count: usize,
}

impl SessionSummary {
    fn new(session_id: Uuid, session: &AppSession) -> Self {
        Self {
            session_id,
            role: session.role(),
            user_location: session.user_location().to_string(),
            is_offline: session.is_offline(),
            is_analyzing: session.is_analyzing(),
            image_count: session.images().len(),
            has_results: session.results().is_some(),
            analysis_error: session.analysis_error().map(str::to_string),
            weather: session.weather().cloned(),
            history_count: session.history().len(),
            chat_count: session.chat_messages().len(),
        }
    }
}

/// Start a new session
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// Summarize the current session
pub async fn get_session(current: CurrentSession) -> Json<SessionSummary> {
    let session = current.handle.lock().await;
    Json(SessionSummary::new(current.id, &session))
}

/// End the current session
pub async fn end_session(
    State(state): State<AppState>,
    current: CurrentSession,
) -> AppResult<StatusCode> {
    if state.sessions.remove(current.id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetImagesRequest {
    #[validate(length(max = 10, message = "At most 10 images per session"))]
    pub images: Vec<String>,
}

/// Replace the images waiting for analysis
pub async fn set_images(
    current: CurrentSession,
    Json(input): Json<SetImagesRequest>,
) -> AppResult<Json<SessionSummary>> {
    input.validate()?;
    validate_images(&input.images).map_err(|e| AppError::ImageRejected(e.to_string()))?;

    let mut session = current.handle.lock().await;
    session.set_images(input.images);
    tracing::debug!(session_id = %current.id, count = session.images().len(), "Images replaced");
    Ok(Json(SessionSummary::new(current.id, &session)))
}

/// Drop all pending images
pub async fn clear_images(current: CurrentSession) -> StatusCode {
    current.handle.lock().await.clear_images();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetLocationRequest {
    #[validate(length(min = 1, max = 100, message = "Location must be 1-100 characters"))]
    pub location: String,
}

pub async fn set_location(
    current: CurrentSession,
    Json(input): Json<SetLocationRequest>,
) -> AppResult<Json<SessionSummary>> {
    input.validate()?;
    validate_location(&input.location).map_err(|e| AppError::Validation {
        field: "location".to_string(),
        message: e.to_string(),
    })?;

    let mut session = current.handle.lock().await;
    session.set_user_location(input.location.trim());
    Ok(Json(SessionSummary::new(current.id, &session)))
}

#[derive(Debug, Deserialize)]
pub struct SetOfflineRequest {
    pub offline: bool,
}

pub async fn set_offline(
    current: CurrentSession,
    Json(input): Json<SetOfflineRequest>,
) -> Json<SessionSummary> {
    let mut session = current.handle.lock().await;
    session.set_offline(input.offline);
    Json(SessionSummary::new(current.id, &session))
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: UserRole,
    pub passcode: Option<String>,
}

/// Switch between farmer and expert; expert needs the passcode
pub async fn switch_role(
    State(state): State<AppState>,
    current: CurrentSession,
    Json(input): Json<SwitchRoleRequest>,
) -> AppResult<Json<SessionSummary>> {
    let mut session = current.handle.lock().await;
    session.switch_role(
        input.role,
        input.passcode.as_deref(),
        &state.config.community.expert_passcode,
    )?;

    tracing::info!(session_id = %current.id, role = %input.role, "Role switched");
    Ok(Json(SessionSummary::new(current.id, &session)))
}
