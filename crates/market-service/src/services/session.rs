//! Session manager
//!
//! Registration, login, and refresh-token rotation against the single
//! refresh token persisted on each principal. Every mutation is one store
//! call issued after all checks passed.

use chrono::Utc;
use market_common::{AppError, Claims};
use market_core::entities::{NewPrincipal, Principal};
use market_core::DomainError;
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    AuthenticationResult, LoginRequest, PrincipalResponse, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session manager
pub struct SessionManager<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionManager<'a> {
    /// Create a new SessionManager
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new principal and open its first session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthenticationResult> {
        let first_name = required("firstname", &request.firstname)?;
        let last_name = required("lastname", &request.lastname)?;
        let email = required("email", &request.email)?;
        if request.password.trim().is_empty() {
            return Err(blank("password"));
        }

        let store = self.ctx.credential_store();
        if store.email_exists(email).await? {
            warn!("Registration rejected: email already registered");
            return Err(email_taken());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let mut new_principal = NewPrincipal {
            email: email.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: self.ctx.default_role(),
            refresh_token: None,
        };

        let codec = self.ctx.token_codec();
        let tokens = codec.issue_token_pair(&new_principal)?;
        new_principal.refresh_token = Some(tokens.refresh.to_record());

        let principal = store.insert(new_principal).await.map_err(|e| match e {
            DomainError::EmailAlreadyExists => email_taken(),
            other => ServiceError::from(other),
        })?;

        info!(principal_id = %principal.id, role = %principal.role, "Principal registered");

        Ok(AuthenticationResult::new(
            &principal,
            &tokens,
            codec.access_token_expiry(),
        ))
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn authenticate(&self, request: LoginRequest) -> ServiceResult<AuthenticationResult> {
        let store = self.ctx.credential_store();
        let passwords = self.ctx.password_service();

        let Some(mut principal) = store.find_by_email(request.email.trim()).await? else {
            passwords.verify_unknown(&request.password);
            warn!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        if !passwords.verify(&request.password, &principal.password_hash)? {
            warn!(principal_id = %principal.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials.into());
        }

        let codec = self.ctx.token_codec();
        let tokens = codec.issue_token_pair(&principal)?;

        // Login is a rotation point: the previous refresh token dies here
        principal.set_refresh_token(&tokens.refresh.to_record());
        let principal = store.save(&principal).await?;

        info!(principal_id = %principal.id, "Principal logged in");

        Ok(AuthenticationResult::new(
            &principal,
            &tokens,
            codec.access_token_expiry(),
        ))
    }

    /// Exchange a refresh token for a new token pair (strict rotation)
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthenticationResult> {
        let presented = request.refresh_token.trim();
        if presented.is_empty() {
            return Err(AppError::InvalidToken.into());
        }

        let codec = self.ctx.token_codec();
        let claims = codec.decode_refresh_token(presented).map_err(|e| {
            warn!(reason = %e, "Refresh rejected by token codec");
            AppError::InvalidToken
        })?;

        let store = self.ctx.credential_store();
        let Some(mut principal) = store.find_by_email(&claims.sub).await? else {
            warn!("Refresh rejected: subject does not resolve to a principal");
            return Err(AppError::UnknownPrincipal.into());
        };

        if !principal.holds_refresh_token(presented) {
            warn!(principal_id = %principal.id, "Refresh rejected: superseded token");
            return Err(AppError::TokenMismatch.into());
        }

        if principal.refresh_token_expired(Utc::now()) {
            warn!(principal_id = %principal.id, "Refresh rejected: stored token expired");
            return Err(AppError::TokenExpired.into());
        }

        let tokens = codec.issue_token_pair(&principal)?;
        let next = tokens.refresh.to_record();

        if !store.swap_refresh_token(principal.id, presented, &next).await? {
            warn!(principal_id = %principal.id, "Refresh lost a concurrent rotation");
            return Err(AppError::TokenMismatch.into());
        }
        principal.set_refresh_token(&next);

        info!(principal_id = %principal.id, "Session refreshed");

        Ok(AuthenticationResult::new(
            &principal,
            &tokens,
            codec.access_token_expiry(),
        ))
    }

    /// Resolve a decoded access token to its principal
    ///
    /// A subject that no longer exists is `NotFound`. `Ok(None)` when the
    /// token does not verify against the stored principal.
    #[instrument(skip(self, token, claims), fields(subject = %claims.sub))]
    pub async fn resolve_access_token(
        &self,
        token: &str,
        claims: &Claims,
    ) -> ServiceResult<Option<Principal>> {
        let Some(principal) = self.ctx.credential_store().find_by_email(&claims.sub).await? else {
            debug!("Access token subject not found");
            return Err(ServiceError::not_found("Principal", &claims.sub));
        };

        if !self.ctx.token_codec().is_valid(token, &principal) {
            return Ok(None);
        }

        Ok(Some(principal))
    }

    /// Profile of the principal behind an authenticated request
    #[instrument(skip(self))]
    pub async fn current_principal(&self, email: &str) -> ServiceResult<PrincipalResponse> {
        self.ctx
            .credential_store()
            .find_by_email(email)
            .await?
            .map(|principal| PrincipalResponse::from(&principal))
            .ok_or_else(|| ServiceError::not_found("Principal", email))
    }
}

fn required<'r>(field: &'static str, value: &'r str) -> ServiceResult<&'r str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank(field));
    }
    Ok(trimmed)
}

fn blank(field: &'static str) -> ServiceError {
    ServiceError::invalid_field(field, format!("{field} must not be blank"))
}

fn email_taken() -> ServiceError {
    ServiceError::invalid_field("email", "Email is already registered")
}
