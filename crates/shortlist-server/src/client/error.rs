use thiserror::Error;

/// Client-side failure outcomes, one per distinct user-facing message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request exceeded the boundary timeout.
    #[error("request timed out")]
    Timeout,

    /// The service could not be reached at all.
    #[error("could not connect to the scoring service: {0}")]
    Connect(String),

    /// The input was rejected (4xx); retrying the same document will not help.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Refused locally by the courtesy size check, before any upload.
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    /// Transient server fault (5xx); eligible for retry.
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The transport succeeded but the response was not understood.
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// The client itself could not be constructed.
    #[error("failed to build client: {0}")]
    Build(String),
}

impl ClientError {
    /// Only transient server faults are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::ServerError { .. })
    }
}
