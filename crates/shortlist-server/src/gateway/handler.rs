use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use super::error::GatewayError;
use super::state::HandlerState;
use super::{SHORTLIST_STATUS_HEADER, SHORTLIST_STATUS_SCORED};

/// Form field carrying the uploaded document.
const DOCUMENT_FIELD: &str = "file";
/// Recognized document extension (compared case-insensitively).
const DOCUMENT_EXTENSION: &str = ".pdf";

#[derive(serde::Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

/// Accepts a multipart document upload, validates it, and runs the
/// extraction and scoring pipeline on the worker pool.
///
/// Validation happens synchronously, before any offload: extension first
/// (cheap fail-fast), then presence, then the size ceiling. Everything
/// CPU-bound runs on the pool; within one request extraction always
/// completes before scoring begins.
#[instrument(skip(state, multipart), fields(filename = tracing::field::Empty))]
pub async fn score_document_handler(
    State(state): State<HandlerState>,
    mut multipart: Multipart,
) -> Result<Response, GatewayError> {
    let field = loop {
        let field = multipart.next_field().await.map_err(|e| {
            GatewayError::InvalidFormat(format!("unreadable multipart payload: {e}"))
        })?;
        match field {
            Some(field) if field.name() == Some(DOCUMENT_FIELD) => break field,
            Some(_) => continue,
            None => {
                return Err(GatewayError::EmptyPayload(
                    "request carried no document part".to_string(),
                ));
            }
        }
    };

    let filename = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::InvalidFormat("document part has no filename".to_string()))?;
    tracing::Span::current().record("filename", tracing::field::display(&filename));

    if !filename.to_lowercase().ends_with(DOCUMENT_EXTENSION) {
        return Err(GatewayError::InvalidFormat(format!(
            "only {DOCUMENT_EXTENSION} documents are supported, got '{filename}'"
        )));
    }

    let content_type = field.content_type().map(str::to_string);
    let payload = field.bytes().await.map_err(|e| {
        GatewayError::InvalidFormat(format!("unreadable multipart payload: {e}"))
    })?;

    debug!(
        filename = %filename,
        content_type = content_type.as_deref().unwrap_or("unknown"),
        payload_len = payload.len(),
        "document received"
    );

    if payload.is_empty() {
        return Err(GatewayError::EmptyPayload(
            "uploaded document is empty".to_string(),
        ));
    }
    if payload.len() as u64 > state.max_size_bytes {
        return Err(GatewayError::PayloadTooLarge {
            actual: payload.len() as u64,
            limit: state.max_size_bytes,
        });
    }

    let extractor = Arc::clone(&state.extractor);
    let text = state
        .pool
        .run(move || extractor.extract(&payload))
        .await??;

    debug!(extracted_len = text.as_str().len(), "extraction complete");

    let scorer = Arc::clone(&state.scorer);
    let score = state.pool.run(move || scorer.score(text.as_str())).await?;

    debug!(score, "document scored");

    let mut headers = HeaderMap::new();
    headers.insert(
        SHORTLIST_STATUS_HEADER,
        HeaderValue::from_static(SHORTLIST_STATUS_SCORED),
    );
    Ok((StatusCode::OK, headers, Json(ScoreResponse { score })).into_response())
}
