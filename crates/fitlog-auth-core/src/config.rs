//! Configuration types for the auth core

use std::time::Duration;

use crate::crypto::HmacKey;
use crate::AuthError;

/// Auth configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub token_secret: String,
    /// How long an issued token stays valid
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Default token lifetime
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Create a new auth config with the default token lifetime
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl: Self::DEFAULT_TOKEN_TTL,
        }
    }

    /// Create a config, rejecting secrets shorter than [`HmacKey::MIN_KEY_LENGTH`]
    pub fn try_new(token_secret: impl Into<String>) -> Result<Self, AuthError> {
        let config = Self::new(token_secret);
        config.validate()?;
        Ok(config)
    }

    /// Check the secret length and TTL
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.token_secret.len() < HmacKey::MIN_KEY_LENGTH {
            return Err(AuthError::Configuration(format!(
                "token secret must be at least {} bytes",
                HmacKey::MIN_KEY_LENGTH
            )));
        }
        if self.token_ttl.is_zero() {
            return Err(AuthError::Configuration(
                "token TTL must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[redacted]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
