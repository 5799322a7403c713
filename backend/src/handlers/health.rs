//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub weather: String,
    pub llm: String,
    pub sessions: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let weather = if state.weather.is_live() { "live" } else { "mock" };
    let llm = if state.config.llm.is_configured() {
        "configured"
    } else {
        "offline"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        weather: weather.to_string(),
        llm: llm.to_string(),
        sessions: state.sessions.len().await,
    })
}
