//! Client configuration.
//!
//! # Environment Variables
//!
//! - `TODO_API_URL`: Base URL of the todo service (default: `http://localhost:5002`)
//! - `TODO_API_TIMEOUT_MS`: Per-request timeout in milliseconds (default: `5000`)

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::infrastructure::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5002";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where the client finds the service and how long it waits for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("TODO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup("TODO_API_TIMEOUT_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|error| ConfigError::InvalidValue {
                    key: "TODO_API_TIMEOUT_MS".to_string(),
                    message: error.to_string(),
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Self::new(&base_url, timeout)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: "TODO_API_URL".to_string(),
        message,
    };

    let url = Url::parse(value.trim()).map_err(|error| invalid(error.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }
}
