//! Configuration for the fitlog API service.

use std::str::FromStr;
use std::time::Duration;

use fitlog_auth_core::AuthConfig;
use fitlog_db::PoolOptions;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Pool size and store operation bound
    pub pool: PoolOptions,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Config with defaults for everything but the database URL and token secret
    pub fn new(database_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            http_port: 8080,
            database_url: database_url.into(),
            auth,
            pool: PoolOptions::default(),
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        // Token secret (minimum 32 bytes, checked by AuthConfig)
        let token_secret = lookup("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?;

        let http_port: u16 = parse_or(&lookup, "HTTP_PORT", 8080)?;
        let token_ttl_hours: u64 = parse_or(&lookup, "TOKEN_TTL_HOURS", 24)?;
        let store_timeout_secs: u64 = parse_or(&lookup, "STORE_TIMEOUT_SECS", 10)?;
        let max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let metrics_enabled: bool = parse_or(&lookup, "METRICS_ENABLED", true)?;

        if token_ttl_hours == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_HOURS"));
        }
        if store_timeout_secs == 0 {
            return Err(ConfigError::Invalid("STORE_TIMEOUT_SECS"));
        }

        let token_ttl_secs = token_ttl_hours
            .checked_mul(3600)
            .ok_or(ConfigError::Invalid("TOKEN_TTL_HOURS"))?;

        let auth = AuthConfig::new(token_secret).with_token_ttl(Duration::from_secs(token_ttl_secs));
        auth.validate()
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?;

        let pool = PoolOptions {
            max_connections,
            store_timeout: Duration::from_secs(store_timeout_secs),
            ..PoolOptions::default()
        };

        Ok(Self {
            http_port,
            database_url,
            auth,
            pool,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
