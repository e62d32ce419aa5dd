//! Resilient submit client for the scoring endpoint.
//!
//! The retry contract is explicit rather than inferred: only the
//! transient server statuses in [`RETRYABLE_STATUSES`] are retried, with
//! an increasing backoff over a bounded number of attempts. Input
//! rejections (4xx), timeouts, and connectivity failures surface
//! immediately as distinct [`ClientError`] variants so a UI can show a
//! different message for each.

pub mod error;


pub use error::ClientError;

use std::time::Duration;

use tracing::warn;

/// Server statuses eligible for retry (transient faults).
pub const RETRYABLE_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Default number of submit attempts (first try included).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Bounded retry behavior for transient server faults.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Whether `status` belongs to the designated transient set.
    pub fn is_retryable(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Delay before the given 1-based retry; grows with each attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// HTTP client for the submit operation with a bounded request timeout.
#[derive(Debug, Clone)]
pub struct ScoreClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    max_size_bytes: u64,
}

impl ScoreClient {
    /// Builds a client against `base_url` with the given boundary timeout.
    ///
    /// The timeout is observed per attempt; a slow server request is
    /// abandoned by the client but not interrupted server-side.
    pub fn new(
        base_url: impl Into<String>,
        retry: RetryPolicy,
        request_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
            max_size_bytes: shortlist::config::DEFAULT_MAX_SIZE_BYTES,
        })
    }

    /// Overrides the courtesy size ceiling checked before uploading.
    /// The server-side gateway remains the authoritative enforcement point.
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// Submits a document for scoring and returns the final score.
    ///
    /// Oversized payloads are refused locally without a network round
    /// trip. Retries happen transparently on the transient status set;
    /// every other failure is returned to the caller on the first
    /// occurrence.
    pub async fn submit(&self, filename: &str, payload: Vec<u8>) -> Result<f64, ClientError> {
        if payload.len() as u64 > self.max_size_bytes {
            return Err(ClientError::TooLarge {
                size: payload.len() as u64,
                limit: self.max_size_bytes,
            });
        }

        let mut attempt = 1;
        loop {
            match self.submit_once(filename, payload.clone()).await {
                Ok(score) => return Ok(score),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient server failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn submit_once(&self, filename: &str, payload: Vec<u8>) -> Result<f64, ClientError> {
        let part = reqwest::multipart::Part::bytes(payload)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ClientError::Build(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let body: ScoreBody = response
                .json()
                .await
                .map_err(|e| ClientError::Protocol(e.to_string()))?;
            return Ok(body.score);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("status {status}"));

        if RetryPolicy::is_retryable(status.as_u16()) {
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn classify_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_connect() {
        ClientError::Connect(err.to_string())
    } else {
        ClientError::Protocol(err.to_string())
    }
}

#[derive(serde::Deserialize)]
struct ScoreBody {
    score: f64,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}
