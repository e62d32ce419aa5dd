//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The offload pool needs at least one worker.
    #[error("worker_count must be at least 1")]
    ZeroWorkerCount,

    /// A zero byte ceiling would reject every upload.
    #[error("max_size_bytes must be at least 1")]
    ZeroSizeLimit,

    /// A zero timeout would fail every client request immediately.
    #[error("request_timeout_seconds must be at least 1")]
    ZeroRequestTimeout,
}
