//! Credential store port
//!
//! The session core only needs principal lookup and refresh-token persistence
//! from the marketplace's data layer. Implementations live in `market-db`.

use async_trait::async_trait;

use crate::entities::{NewPrincipal, Principal, RefreshTokenRecord};
use crate::error::DomainError;
use crate::value_objects::PrincipalId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find principal by login email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Principal>>;

    /// Find principal by ID
    async fn find_by_id(&self, id: PrincipalId) -> RepoResult<Option<Principal>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert a new principal and return it with its assigned id
    ///
    /// Fails with `DomainError::EmailAlreadyExists` on a duplicate email.
    async fn insert(&self, principal: NewPrincipal) -> RepoResult<Principal>;

    /// Overwrite an existing principal's mutable fields
    async fn save(&self, principal: &Principal) -> RepoResult<Principal>;

    /// Replace the stored refresh token only if it still equals `expected`
    ///
    /// Returns `false` when the stored value changed (or the principal is gone).
    async fn swap_refresh_token(
        &self,
        id: PrincipalId,
        expected: &str,
        next: &RefreshTokenRecord,
    ) -> RepoResult<bool>;

    /// Readiness check
    async fn ping(&self) -> RepoResult<()>;
}
