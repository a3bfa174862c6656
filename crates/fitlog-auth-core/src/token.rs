//! Stateless bearer tokens
//!
//! Wire format: `base64url(json claims) "." base64url(hmac-sha256)`, both
//! parts unpadded. The signature covers the encoded claims exactly as sent.

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::crypto::{constant_time_eq, HmacKey};
use crate::AuthError;

/// Signed token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the account email)
    pub sub: String,
    /// Issue timestamp (milliseconds)
    pub issued: i64,
    /// Expiration timestamp (milliseconds)
    pub expires: i64,
}

impl TokenClaims {
    /// Claims for `subject` valid for `ttl` from now
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now().timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            sub: subject.into(),
            issued: now,
            expires: now.saturating_add(ttl_ms),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.expires).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A freshly issued token
#[derive(Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Issues and verifies bearer tokens with a process-wide key
#[derive(Clone)]
pub struct TokenService {
    key: HmacKey,
    ttl: Duration,
}

impl TokenService {
    /// Build from config
    ///
    /// # Errors
    /// Returns `Configuration` if the secret is shorter than 32 bytes.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let key = HmacKey::new(config.token_secret.as_bytes())
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(Self {
            key,
            ttl: config.token_ttl,
        })
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token binding `subject` until now + TTL
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
        let claims = TokenClaims::new(subject, self.ttl);
        let token = self.sign(&claims)?;
        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Encode and sign arbitrary claims
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let claims_json = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Internal(format!("failed to encode token claims: {e}")))?;

        let claims_b64 = URL_SAFE_NO_PAD.encode(claims_json);
        let signature = self.compute_signature(&claims_b64);

        Ok(format!("{claims_b64}.{signature}"))
    }

    /// Verify signature and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let (claims_b64, signature) = token.rsplit_once('.').ok_or(AuthError::InvalidToken)?;

        let expected = self.compute_signature(claims_b64);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            tracing::debug!("Token signature mismatch");
            return Err(AuthError::InvalidToken);
        }

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: TokenClaims =
            serde_json::from_slice(&claims_json).map_err(|_| AuthError::InvalidToken)?;

        if claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.decode(token).map(|claims| claims.sub)
    }

    fn compute_signature(&self, data: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.key.sign(data.as_bytes()))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
