//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the UI is served from localhost and the API carries no
    // cookies or session state.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/group-allotment-report", get(handlers::group_allotment_report))
        .route("/reservations", get(handlers::reservations))
        .route("/test-connection", get(handlers::test_connection))
        .route("/settings", get(handlers::get_settings))
        .route("/settings", post(handlers::save_settings));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Settings bodies are tiny; anything bigger is a mistake.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
