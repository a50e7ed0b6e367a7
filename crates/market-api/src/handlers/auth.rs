//! Authentication handlers
//!
//! Registration, login, token refresh, and the current principal's profile.

use axum::{extract::State, Json};
use market_service::{
    AuthenticationResult, LoginRequest, PrincipalResponse, RefreshTokenRequest, RegisterRequest,
    SessionManager,
};

use crate::extractors::{AuthPrincipal, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Register a new principal
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<AuthenticationResult>> {
    let sessions = SessionManager::new(state.service_context());
    Ok(Json(sessions.register(request).await?))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthenticationResult>> {
    let sessions = SessionManager::new(state.service_context());
    Ok(Json(sessions.authenticate(request).await?))
}

/// Rotate the refresh token
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthenticationResult>> {
    let sessions = SessionManager::new(state.service_context());
    Ok(Json(sessions.refresh(request).await?))
}

/// Profile of the authenticated principal
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> ApiResult<Json<PrincipalResponse>> {
    let sessions = SessionManager::new(state.service_context());
    Ok(Json(sessions.current_principal(&principal.email).await?))
}
