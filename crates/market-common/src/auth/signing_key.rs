//! Symmetric signing key for session tokens

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

use crate::config::ConfigError;

/// Decoded HMAC secret
///
/// Loaded once at startup; construction fails if the secret is absent,
/// not valid base64, or shorter than [`SigningKey::MIN_BYTES`].
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Minimum key length for HS512
    pub const MIN_BYTES: usize = 64;

    /// Decode a base64 (standard alphabet) secret
    ///
    /// # Errors
    /// `MissingVar` for a blank secret, `InvalidValue` for bad encoding,
    /// `WeakSecret` for a key shorter than 64 bytes
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }

        let bytes = STANDARD.decode(encoded).map_err(|e| {
            ConfigError::InvalidValue("JWT_SECRET", format!("not valid base64: {e}"))
        })?;

        Self::from_bytes(bytes)
    }

    /// Wrap raw key bytes
    ///
    /// # Errors
    /// `WeakSecret` for a key shorter than 64 bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ConfigError> {
        if bytes.len() < Self::MIN_BYTES {
            return Err(ConfigError::WeakSecret {
                min: Self::MIN_BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&self.0.len()).finish()
    }
}
