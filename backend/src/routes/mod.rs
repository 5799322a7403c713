//! Route definitions for CropGuard

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Session creation (public)
        .route("/sessions", post(handlers::create_session))
        // Weather lookups (public)
        .nest("/weather", weather_routes())
        // Session-scoped routes
        .merge(session_scoped_routes(state))
}

/// Weather and pest-risk routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::current_weather))
        .route("/pest-risk", post(handlers::assess_pest_risk))
}

/// Routes that need an `X-Session-Id` header
fn session_scoped_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/session", session_routes())
        .nest("/diagnosis", diagnosis_routes())
        .nest("/chat", chat_routes())
        .nest("/community", community_routes())
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_session).delete(handlers::end_session))
        .route(
            "/images",
            put(handlers::set_images).delete(handlers::clear_images),
        )
        .route("/location", put(handlers::set_location))
        .route("/offline", put(handlers::set_offline))
        .route("/role", put(handlers::switch_role))
}

fn diagnosis_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_diagnosis)
                .post(handlers::run_diagnosis)
                .delete(handlers::clear_diagnosis),
        )
        .route("/history", get(handlers::get_history))
}

fn chat_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_messages)
            .post(handlers::send_message)
            .delete(handlers::clear_messages),
    )
}

fn community_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/filters", get(handlers::get_filters))
}
