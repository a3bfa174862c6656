//! Password hashing with Argon2id
//!
//! Hashes are self-describing PHC strings (`$argon2id$v=19$m=...`), so the
//! parameters and salt travel with the stored value.

use std::sync::{Arc, OnceLock};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::AuthError;

/// Memory cost in KiB (19 MiB)
pub const MEMORY_COST_KIB: u32 = Params::DEFAULT_M_COST;
/// Iterations
pub const TIME_COST: u32 = Params::DEFAULT_T_COST;
/// Lanes
pub const PARALLELISM: u32 = Params::DEFAULT_P_COST;

const PLACEHOLDER_PASSWORD: &[u8] = b"fitlog-placeholder-password";

/// One-way salted password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
    /// Hash checked when there is no stored hash to check against,
    /// created with the same parameters on first use
    placeholder: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    /// Argon2id with the fixed production work factor
    pub fn new() -> Self {
        Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
            placeholder: Arc::new(OnceLock::new()),
        }
    }

    /// Argon2id with custom cost parameters
    pub fn with_params(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| AuthError::Configuration(format!("invalid argon2 params: {e}")))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            placeholder: Arc::new(OnceLock::new()),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Runs on the blocking pool.
    pub async fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let argon = self.argon.clone();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))
    }

    /// Check a plaintext candidate against a stored hash.
    ///
    /// A stored hash that does not parse verifies as `false`.
    pub async fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let argon = self.argon.clone();
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&stored_hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored password hash is malformed");
                    return false;
                }
            };
            argon
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .await;

        match outcome {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Spend one full verification on a candidate that has no stored hash,
    /// so a lookup miss costs the same as a mismatch.
    pub async fn verify_placeholder(&self, plaintext: &str) {
        let argon = self.argon.clone();
        let placeholder = Arc::clone(&self.placeholder);
        let plaintext = plaintext.to_owned();

        let outcome = tokio::task::spawn_blocking(move || {
            let stored = placeholder.get_or_init(|| {
                let salt = SaltString::generate(&mut OsRng);
                argon
                    .hash_password(PLACEHOLDER_PASSWORD, &salt)
                    .map(|hash| hash.to_string())
                    .unwrap_or_default()
            });
            if let Ok(parsed) = PasswordHash::new(stored) {
                let _ = argon.verify_password(plaintext.as_bytes(), &parsed);
            }
        })
        .await;

        if let Err(e) = outcome {
            tracing::error!("Password verification task failed: {}", e);
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = cheap();
        let hash = hasher.hash("secret1").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "secret1");
        assert!(hasher.verify("secret1", &hash).await);
        assert!(!hasher.verify("secret1x", &hash).await);
    }

    #[tokio::test]
    async fn test_salt_differs_per_call() {
        let hasher = cheap();
        let a = hasher.hash("secret1").await.unwrap();
        let b = hasher.hash("secret1").await.unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("secret1", &a).await);
        assert!(hasher.verify("secret1", &b).await);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_false() {
        let hasher = cheap();
        assert!(!hasher.verify("secret1", "not-a-phc-string").await);
        assert!(!hasher.verify("secret1", "").await);
    }

    #[tokio::test]
    async fn test_production_params_are_encoded() {
        let hash = PasswordHasher::new().hash("secret1").await.unwrap();
        assert!(hash.contains(&format!(
            "m={MEMORY_COST_KIB},t={TIME_COST},p={PARALLELISM}"
        )));
    }

    #[tokio::test]
    async fn test_placeholder_runs_a_real_verification() {
        let hasher = cheap();
        assert!(hasher.placeholder.get().is_none());

        hasher.verify_placeholder("secret1").await;
        let stored = hasher.placeholder.get().cloned().unwrap();
        assert!(stored.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

        // Built once, shared by clones
        let clone = hasher.clone();
        clone.verify_placeholder("secret2").await;
        assert_eq!(clone.placeholder.get(), Some(&stored));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(PasswordHasher::with_params(1024, 0, 1).is_err());
    }
}
