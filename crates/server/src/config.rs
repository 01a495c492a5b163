//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DRIPPSS_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `DRIPPSS_HOST` - Bind address (default: 127.0.0.1)
//! - `DRIPPSS_PORT` - Listen port (default: 3000)
//! - `DRIPPSS_BASE_URL` - Public URL (default: http://localhost:3000);
//!   an `https://` base URL marks session cookies as secure
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string.
    pub database_url: SecretString,
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Public base URL for the server.
    pub base_url: String,
    /// Sentry DSN for error tracking (optional).
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (optional).
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = SecretString::from(get_required_env("DRIPPSS_DATABASE_URL")?);

        let host: IpAddr = get_env_or_default("DRIPPSS_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| ConfigError::InvalidValue("DRIPPSS_HOST".to_owned(), format!("{e}")))?;

        let port: u16 = get_env_or_default("DRIPPSS_PORT", "3000")
            .parse()
            .map_err(|e| ConfigError::InvalidValue("DRIPPSS_PORT".to_owned(), format!("{e}")))?;

        let base_url = get_env_or_default("DRIPPSS_BASE_URL", "http://localhost:3000");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the server is publicly served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().expect("valid host"),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = test_config();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn secure_only_for_https_base_url() {
        let mut config = test_config();
        assert!(!config.is_secure());
        config.base_url = "https://shop.drippss.com".to_owned();
        assert!(config.is_secure());
    }
}
