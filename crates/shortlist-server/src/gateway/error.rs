use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use shortlist::extract::ExtractError;
use shortlist::offload::OffloadError;

use super::SHORTLIST_STATUS_HEADER;

/// User-facing failure taxonomy for the scoring endpoint.
///
/// 4xx variants are input errors and not worth retrying; the single 5xx
/// variant marks transient server faults the client collaborator may
/// retry. Messages are sanitized; no internal stack detail crosses the
/// boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unsupported document format: {0}")]
    InvalidFormat(String),

    #[error("empty payload: {0}")]
    EmptyPayload(String),

    #[error("payload of {actual} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { actual: u64, limit: u64 },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("document contains no extractable text")]
    NoExtractableText,

    #[error("internal processing error: {0}")]
    InternalProcessingError(String),
}

impl From<ExtractError> for GatewayError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::MalformedDocument { reason } => GatewayError::MalformedDocument(reason),
            ExtractError::NoExtractableText => GatewayError::NoExtractableText,
        }
    }
}

impl From<OffloadError> for GatewayError {
    fn from(err: OffloadError) -> Self {
        GatewayError::InternalProcessingError(err.to_string())
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    /// Short machine-readable category for the status header.
    pub fn status_label(&self) -> &'static str {
        match self {
            GatewayError::InvalidFormat(_) => "invalid_format",
            GatewayError::EmptyPayload(_) => "empty_payload",
            GatewayError::PayloadTooLarge { .. } => "payload_too_large",
            GatewayError::MalformedDocument(_) => "malformed_document",
            GatewayError::NoExtractableText => "no_extractable_text",
            GatewayError::InternalProcessingError(_) => "internal_error",
        }
    }

    /// HTTP status for the variant: 4xx for input errors, 5xx for
    /// retryable server faults.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidFormat(_)
            | GatewayError::EmptyPayload(_)
            | GatewayError::MalformedDocument(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::NoExtractableText => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::InternalProcessingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            SHORTLIST_STATUS_HEADER,
            HeaderValue::from_static(self.status_label()),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
