//! CropGuard backend
//!
//! HTTP service that keeps per-session crop diagnosis state and fronts the
//! image analysis, weather and language model services.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod sessions;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};

use crate::services::{AdvisoryService, DiagnosisService, WeatherService};
use crate::sessions::SessionRegistry;

/// Largest request body accepted; several base64 images fit comfortably
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionRegistry,
    pub weather: WeatherService,
    pub diagnosis: DiagnosisService,
    pub advisory: AdvisoryService,
}

impl AppState {
    /// Build the state and external clients from configuration
    pub fn new(config: Config) -> AppResult<Self> {
        Ok(Self {
            sessions: SessionRegistry::new(),
            weather: WeatherService::new(&config.weather)?,
            diagnosis: DiagnosisService::new(&config)?,
            advisory: AdvisoryService::new(&config.llm)?,
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "CropGuard API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
