//! Authenticated principal extractor
//!
//! Reads the identity the authentication middleware attached to the request.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use market_common::AppError;

use crate::middleware::AuthenticatedPrincipal;
use crate::response::ApiError;

/// Authenticated principal of the current request
///
/// Rejects with 401 `MISSING_AUTH` when no identity was attached.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or_else(|| ApiError::App(AppError::MissingAuth))
    }
}
