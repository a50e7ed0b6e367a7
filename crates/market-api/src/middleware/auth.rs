//! Bearer token authentication and route authorization
//!
//! `authenticate` attaches an [`AuthenticatedPrincipal`] to the request when a
//! valid access token is presented. `authorize` then enforces the route policy.
//! Both consult the same [`RoutePolicyTable`](crate::security::RoutePolicyTable).

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use market_common::AppError;
use market_core::{Principal, PrincipalId, Role};
use market_service::SessionManager;
use tracing::{debug, warn};

use crate::response::ApiError;
use crate::security::Access;
use crate::state::AppState;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub id: PrincipalId,
    pub email: String,
    pub role: Role,
}

impl From<&Principal> for AuthenticatedPrincipal {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email.clone(),
            role: principal.role,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// Returns `None` for a missing header, another scheme, or an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the bearer token into an authenticated principal
///
/// Public routes and requests without a bearer token pass through untouched.
/// A presented token is always decoded, and one that fails is rejected with
/// 401 right here. An identity attached by an earlier stage is kept. A token
/// whose subject no longer exists is rejected with 404.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if state.policies().is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    let claims = match state.token_codec().decode_access_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(reason = %e, path = %request.uri().path(), "Bearer token rejected");
            return ApiError::from(e).into_response();
        }
    };

    if request.extensions().get::<AuthenticatedPrincipal>().is_some() {
        return next.run(request).await;
    }

    let sessions = SessionManager::new(state.service_context());
    match sessions.resolve_access_token(&token, &claims).await {
        Ok(Some(principal)) => {
            debug!(principal_id = %principal.id, "Request authenticated");
            request
                .extensions_mut()
                .insert(AuthenticatedPrincipal::from(&principal));
        }
        Ok(None) => debug!("Bearer token does not verify against its principal"),
        Err(e) => {
            warn!(reason = %e, path = %request.uri().path(), "Bearer token subject unresolved");
            return ApiError::from(e).into_response();
        }
    }

    next.run(request).await
}

/// Enforce the route policy against the attached identity
pub async fn authorize(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let access = state.policies().access_for(request.uri().path());
    if access == Access::Public {
        return next.run(request).await;
    }

    let Some(principal) = request.extensions().get::<AuthenticatedPrincipal>() else {
        return ApiError::from(AppError::MissingAuth).into_response();
    };

    if !access.permits(principal.role) {
        warn!(
            principal_id = %principal.id,
            path = %request.uri().path(),
            "Route denied: insufficient permissions"
        );
        return ApiError::from(AppError::InsufficientPermissions).into_response();
    }

    next.run(request).await
}
