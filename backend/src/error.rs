//! Error handling for CropGuard
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::SessionError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Session errors
    #[error("Missing or unknown session")]
    SessionNotFound,

    #[error("Invalid expert passcode")]
    InvalidPasscode,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Image rejected: {0}")]
    ImageRejected(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // External service errors
    #[error("Weather service unavailable: {0}")]
    WeatherServiceUnavailable(String),

    #[error("Analysis service error: {0}")]
    AnalysisServiceError(String),

    #[error("LLM service error: {0}")]
    LlmServiceError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPasscode => AppError::InvalidPasscode,
            SessionError::NotExpert => AppError::InsufficientPermissions,
            SessionError::EmptyField(field) => AppError::Validation {
                field: field.to_string(),
                message: err.to_string(),
            },
            SessionError::AnalysisInProgress => AppError::Conflict(err.to_string()),
            SessionError::NoImages => AppError::Validation {
                field: "images".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        match errors.field_errors().into_iter().next() {
            Some((field, errs)) => AppError::Validation {
                field: field.to_string(),
                message: errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field)),
            },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound => StatusCode::UNAUTHORIZED,
            AppError::InvalidPasscode | AppError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AppError::Validation { .. }
            | AppError::ValidationError(_)
            | AppError::ImageRejected(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::WeatherServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AnalysisServiceError(_) | AppError::LlmServiceError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Configuration(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_detail = match &self {
            AppError::SessionNotFound => ErrorDetail::new(
                "SESSION_NOT_FOUND",
                "Start a session and send its id in the X-Session-Id header",
            ),
            AppError::InvalidPasscode => {
                ErrorDetail::new("INVALID_PASSCODE", "Invalid expert passcode.")
            }
            AppError::InsufficientPermissions => ErrorDetail::new(
                "INSUFFICIENT_PERMISSIONS",
                "Only verified experts can perform this action",
            ),
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            AppError::ImageRejected(msg) => ErrorDetail {
                code: "IMAGE_REJECTED".to_string(),
                message: msg.clone(),
                field: Some("images".to_string()),
            },
            AppError::Conflict(msg) => ErrorDetail::new("CONFLICT", msg.clone()),
            AppError::WeatherServiceUnavailable(_) => ErrorDetail::new(
                "WEATHER_SERVICE_UNAVAILABLE",
                "Weather service is temporarily unavailable",
            ),
            AppError::AnalysisServiceError(_) => ErrorDetail::new(
                "ANALYSIS_SERVICE_ERROR",
                "Analysis failed. Please try again.",
            ),
            AppError::LlmServiceError(_) => ErrorDetail::new(
                "LLM_SERVICE_ERROR",
                "The advisory service is unavailable right now",
            ),
            AppError::Configuration(msg) => {
                ErrorDetail::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg))
            }
            AppError::InternalError(_) => {
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred")
            }
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
