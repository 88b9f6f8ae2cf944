//! Server configuration management.
//!
//! Configuration is loaded once at startup from environment variables.
//! Missing values fall back to defaults; present but invalid values are
//! reported as [`ConfigError`] so startup can abort with a clear message.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `5002`)
//! - `SEED_TODOS`: Whether to start with the seed todos (default: `true`)

use std::env;

use thiserror::Error;

/// Default port the service listens on.
pub const DEFAULT_PORT: u16 = 5002;

/// Default host the service binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Runtime settings for the todo service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP server host address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Whether the store starts with the seed todos.
    pub seed_todos: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_todos: true,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            seed_todos: true,
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` or `SEED_TODOS` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|error| ConfigError::InvalidValue {
                    key: "PORT".to_string(),
                    message: error.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        let seed_todos = match lookup("SEED_TODOS") {
            Some(value) => parse_flag("SEED_TODOS", &value)?,
            None => true,
        };

        Ok(Self {
            host,
            port,
            seed_todos,
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a boolean flag the way the deployment scripts spell them.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for anything other than
/// `true`/`false`, `1`/`0` or `yes`/`no` (case-insensitive).
pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected true/false, got '{other}'"),
        }),
    }
}
