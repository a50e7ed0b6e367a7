//! In-memory CredentialStore
//!
//! Backs tests and local runs without PostgreSQL. All mutations happen under a
//! single write guard, so `swap_refresh_token` is atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use market_core::entities::{NewPrincipal, Principal, RefreshTokenRecord};
use market_core::error::DomainError;
use market_core::traits::{CredentialStore, RepoResult};
use market_core::value_objects::PrincipalId;

use super::error::principal_not_found;

#[derive(Default)]
struct Inner {
    principals: HashMap<PrincipalId, Principal>,
    by_email: HashMap<String, PrincipalId>,
    last_id: i64,
}

/// Thread-safe in-memory implementation of CredentialStore
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored principals
    pub fn len(&self) -> usize {
        self.inner.read().principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Principal>> {
        let inner = self.inner.read();
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.principals.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: PrincipalId) -> RepoResult<Option<Principal>> {
        Ok(self.inner.read().principals.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.inner.read().by_email.contains_key(email))
    }

    async fn insert(&self, principal: NewPrincipal) -> RepoResult<Principal> {
        let mut inner = self.inner.write();
        if inner.by_email.contains_key(&principal.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        inner.last_id += 1;
        let id = PrincipalId::new(inner.last_id);
        let principal = principal.into_principal(id, Utc::now());

        inner.by_email.insert(principal.email.clone(), id);
        inner.principals.insert(id, principal.clone());
        Ok(principal)
    }

    async fn save(&self, principal: &Principal) -> RepoResult<Principal> {
        let mut inner = self.inner.write();
        let stored = inner
            .principals
            .get_mut(&principal.id)
            .ok_or_else(|| principal_not_found(principal.id))?;

        stored.password_hash.clone_from(&principal.password_hash);
        stored.first_name.clone_from(&principal.first_name);
        stored.last_name.clone_from(&principal.last_name);
        stored.role = principal.role;
        stored.refresh_token.clone_from(&principal.refresh_token);
        stored.refresh_token_expires_at = principal.refresh_token_expires_at;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn swap_refresh_token(
        &self,
        id: PrincipalId,
        expected: &str,
        next: &RefreshTokenRecord,
    ) -> RepoResult<bool> {
        let mut inner = self.inner.write();
        match inner.principals.get_mut(&id) {
            Some(stored) if stored.holds_refresh_token(expected) => {
                stored.set_refresh_token(next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
