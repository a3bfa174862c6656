//! Cryptographic utilities for token signing
//!
//! Comparisons of secret material go through [`constant_time_eq`] so that
//! timing does not leak how much of a signature matched.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Pre-keyed HMAC-SHA256 state for repeated signing.
///
/// The key is validated and absorbed once; each signature clones the keyed
/// state instead of re-deriving it from raw bytes.
#[derive(Clone)]
pub struct HmacKey {
    mac: Hmac<Sha256>,
    key_length: usize,
}

impl HmacKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new HMAC key from bytes.
    ///
    /// # Errors
    /// Returns error if key is too short (less than 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, HmacKeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(HmacKeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        let mac = Hmac::<Sha256>::new_from_slice(key_bytes)
            .map_err(|_| HmacKeyError::Rejected)?;
        Ok(Self {
            mac,
            key_length: key_bytes.len(),
        })
    }

    /// Sign data and return the MAC bytes
    pub fn sign(&self, data: &[u8]) -> [u8; 32] {
        let mut mac = self.mac.clone();
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("key_length", &self.key_length)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating an HMAC key
#[derive(Debug, Clone, thiserror::Error)]
pub enum HmacKeyError {
    #[error("HMAC key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },

    #[error("HMAC key rejected")]
    Rejected,
}

/// Constant-time byte slice comparison.
///
/// Length is not secret: slices of different length compare unequal
/// immediately. Equal-length slices are compared without early exit.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq_equal() {
        assert!(constant_time_eq(b"hello world", b"hello world"));
    }

    #[test]
    fn test_constant_time_eq_different() {
        assert!(!constant_time_eq(b"hello world", b"hello worle"));
    }

    #[test]
    fn test_constant_time_eq_different_lengths() {
        assert!(!constant_time_eq(b"hello", b"hello world"));
    }

    #[test]
    fn test_constant_time_eq_empty() {
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_hmac_key_too_short() {
        let result = HmacKey::new("short");
        assert!(matches!(
            result,
            Err(HmacKeyError::KeyTooShort { actual: 5, minimum: 32 })
        ));
    }

    #[test]
    fn test_hmac_signature_depends_on_data() {
        let key = HmacKey::new("k".repeat(32)).unwrap();
        let signature = key.sign(b"test data to sign");
        assert!(constant_time_eq(&signature, &key.sign(b"test data to sign")));
        assert!(!constant_time_eq(&signature, &key.sign(b"wrong data")));
        assert!(!constant_time_eq(&signature, &signature[..31]));
    }

    #[test]
    fn test_signing_is_deterministic_per_key() {
        let a = HmacKey::new("a".repeat(32)).unwrap();
        let b = HmacKey::new("b".repeat(32)).unwrap();
        assert_eq!(a.sign(b"payload"), a.sign(b"payload"));
        assert_ne!(a.sign(b"payload"), b.sign(b"payload"));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = HmacKey::new("z".repeat(40)).unwrap();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("key_length: 40"));
        assert!(!rendered.contains("zzzz"));
    }
}
