//! PostgreSQL implementation of CredentialStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use market_core::entities::{NewPrincipal, Principal, RefreshTokenRecord};
use market_core::error::DomainError;
use market_core::traits::{CredentialStore, RepoResult};
use market_core::value_objects::PrincipalId;

use crate::mappers::principal_from_row;
use crate::models::PrincipalModel;

use super::error::{map_db_error, map_unique_violation, principal_not_found};

const PRINCIPAL_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, \
     refresh_token, refresh_token_expires_at, created_at, updated_at";

/// PostgreSQL implementation of CredentialStore
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new PgCredentialStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalModel>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM auth_principals WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        principal_from_row(row)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PrincipalId) -> RepoResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalModel>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM auth_principals WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        principal_from_row(row)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM auth_principals WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, principal), fields(email = %principal.email))]
    async fn insert(&self, principal: NewPrincipal) -> RepoResult<Principal> {
        let (refresh_token, refresh_token_expires_at) = match principal.refresh_token {
            Some(record) => (Some(record.token), Some(record.expires_at)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            INSERT INTO auth_principals
                (email, password_hash, first_name, last_name, role,
                 refresh_token, refresh_token_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRINCIPAL_COLUMNS}
            "
        ))
        .bind(&principal.email)
        .bind(&principal.password_hash)
        .bind(&principal.first_name)
        .bind(&principal.last_name)
        .bind(principal.role.as_str())
        .bind(refresh_token)
        .bind(refresh_token_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Principal::try_from(row)
    }

    #[instrument(skip(self, principal), fields(id = %principal.id))]
    async fn save(&self, principal: &Principal) -> RepoResult<Principal> {
        let row = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            UPDATE auth_principals
            SET password_hash = $2, first_name = $3, last_name = $4, role = $5,
                refresh_token = $6, refresh_token_expires_at = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRINCIPAL_COLUMNS}
            "
        ))
        .bind(principal.id.into_inner())
        .bind(&principal.password_hash)
        .bind(&principal.first_name)
        .bind(&principal.last_name)
        .bind(principal.role.as_str())
        .bind(&principal.refresh_token)
        .bind(principal.refresh_token_expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match row {
            Some(row) => Principal::try_from(row),
            None => Err(principal_not_found(principal.id)),
        }
    }

    #[instrument(skip(self, expected, next))]
    async fn swap_refresh_token(
        &self,
        id: PrincipalId,
        expected: &str,
        next: &RefreshTokenRecord,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE auth_principals
            SET refresh_token = $3, refresh_token_expires_at = $4, updated_at = NOW()
            WHERE id = $1 AND refresh_token = $2
            ",
        )
        .bind(id.into_inner())
        .bind(expected)
        .bind(&next.token)
        .bind(next.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
