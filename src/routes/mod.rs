//! Router assembly: health and problem endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod error;
pub mod http;

/// Build the application router with:
/// - liveness at `/`, `/health` and `/api/health`
/// - problem lookups under `/api/problems/...`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_root))
        .route("/health", get(http::http_health))
        .route("/api/health", get(http::http_health))
        // Static segments take precedence over `:key`.
        .route("/api/problems/random", get(http::http_get_random))
        .route("/api/problems/today", get(http::http_get_today))
        .route("/api/problems/:key", get(http::http_get_problem))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
