//! Configuration module for the dnsrelay console.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `DNSRELAY_SERVER_URL` | Yes | - | Backend base URL (e.g., `https://relay.example.com`) |
//! | `DNSRELAY_POLL_INTERVAL_SECS` | No | 3 | Verification poll interval in seconds |
//! | `DNSRELAY_REQUEST_TIMEOUT_SECS` | No | 30 | HTTP request timeout in seconds |

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default verification poll interval in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the dnsrelay console.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub server_url: String,

    /// Interval between verification status polls.
    pub poll_interval: Duration,

    /// Timeout applied to each HTTP request.
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `DNSRELAY_SERVER_URL` is not set or is not an http(s) URL
    /// - `DNSRELAY_POLL_INTERVAL_SECS` or `DNSRELAY_REQUEST_TIMEOUT_SECS` is
    ///   set but cannot be parsed as a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: DNSRELAY_SERVER_URL
        let server_url = env::var("DNSRELAY_SERVER_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DNSRELAY_SERVER_URL".to_string()))?;
        let server_url = normalize_server_url(&server_url)?;

        // Optional: DNSRELAY_POLL_INTERVAL_SECS (default: 3, must be > 0)
        let poll_interval = Duration::from_secs(parse_positive_secs(
            "DNSRELAY_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);

        // Optional: DNSRELAY_REQUEST_TIMEOUT_SECS (default: 30, must be > 0)
        let request_timeout = Duration::from_secs(parse_positive_secs(
            "DNSRELAY_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            server_url,
            poll_interval,
            request_timeout,
        })
    }

    /// Whether the backend is reached over HTTPS.
    ///
    /// The push provider requires callbacks to be delivered over HTTPS; a
    /// plain-http base URL triggers an advisory warning in the wizard but
    /// never blocks setup.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.server_url.starts_with("https://")
    }
}

/// Validates the scheme and strips any trailing slash.
fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            key: "DNSRELAY_SERVER_URL".to_string(),
            message: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_string())
}

/// Parses an optional positive-seconds variable with a default.
fn parse_positive_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(val) => {
            let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected positive integer, got '{val}'"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1 second".to_string(),
                });
            }
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}
