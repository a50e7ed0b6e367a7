//! Password hashing and verification
//!
//! Argon2id with a random per-password salt, stored as a PHC string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Password hasher injected into the session layer
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a raw password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Verify a raw password against a stored hash
    ///
    /// # Errors
    /// An unparsable stored hash is an internal error, not a credential mismatch
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            AppError::internal(anyhow::anyhow!("Invalid password hash format: {e}"))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Burn one hash computation for a login whose account does not exist
    ///
    /// Always `false`. Keeps unknown emails as slow as wrong passwords.
    pub fn verify_unknown(&self, password: &str) -> bool {
        if let Err(e) = self.hash(password) {
            tracing::debug!(error = %e, "Hash for unknown account failed");
        }
        false
    }
}
