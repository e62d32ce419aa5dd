//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SHORTLIST_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SHORTLIST_*` overrides on top of
/// defaults, then [`Config::validate`] before wiring the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Upload size ceiling in bytes. A payload of exactly this size is
    /// accepted. Default: 5 MiB.
    pub max_size_bytes: u64,

    /// Number of threads in the offload worker pool. Default: `3`.
    pub worker_count: usize,

    /// Boundary timeout observed by the client collaborator, in seconds.
    /// Default: `30`.
    pub request_timeout_secs: u64,
}

/// Default upload size ceiling (matches the 5 MB limit advertised to users).
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            worker_count: crate::offload::DEFAULT_WORKER_COUNT,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SHORTLIST_PORT";
    const ENV_BIND_ADDR: &'static str = "SHORTLIST_BIND_ADDR";
    const ENV_MAX_SIZE_BYTES: &'static str = "SHORTLIST_MAX_SIZE_BYTES";
    const ENV_WORKER_COUNT: &'static str = "SHORTLIST_WORKER_COUNT";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "SHORTLIST_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let max_size_bytes =
            Self::parse_u64_from_env(Self::ENV_MAX_SIZE_BYTES, defaults.max_size_bytes);
        let worker_count =
            Self::parse_u64_from_env(Self::ENV_WORKER_COUNT, defaults.worker_count as u64) as usize;
        let request_timeout_secs = Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout_secs,
        );

        Ok(Self {
            port,
            bind_addr,
            max_size_bytes,
            worker_count,
            request_timeout_secs,
        })
    }

    /// Validates basic invariants the rest of the service relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkerCount);
        }
        if self.max_size_bytes == 0 {
            return Err(ConfigError::ZeroSizeLimit);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// The boundary timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
