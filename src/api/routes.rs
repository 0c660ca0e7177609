//! API Routes
//!
//! Configures the Axum router with all demo endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, operation_handler, stats_handler, AppState};

/// Builds the demo router: `POST /operations`, `GET /stats`, `GET /health`.
///
/// Requests are traced through `tower-http`; CORS is open to any origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/operations", post(operation_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(open_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn open_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
