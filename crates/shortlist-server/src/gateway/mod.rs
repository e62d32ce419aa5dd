//! HTTP gateway (Axum) for document scoring.
//!
//! This module is primarily used by the `shortlist` server binary.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::score_document_handler;
pub use state::HandlerState;

/// Response header carrying the gateway outcome category.
pub const SHORTLIST_STATUS_HEADER: &str = "x-shortlist-status";
/// Header value for a served score.
pub const SHORTLIST_STATUS_SCORED: &str = "scored";
/// Header value for the liveness probe.
pub const SHORTLIST_STATUS_HEALTHY: &str = "healthy";

/// Body headroom for multipart framing above the configured size ceiling,
/// so the gateway's own check (exact boundary semantics) decides the
/// borderline cases rather than the framework limit.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

pub fn create_router_with_state(state: HandlerState) -> Router {
    let body_limit = state.max_size_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/", post(score_document_handler))
        .layer(DefaultBodyLimit::max(body_limit as usize))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe: performs no work.
#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SHORTLIST_STATUS_HEADER,
        HeaderValue::from_static(SHORTLIST_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "healthy" }),
    )
        .into_response()
}
