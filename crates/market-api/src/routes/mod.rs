//! Route definitions
//!
//! Business routes live under /api; health checks are mounted separately.

use axum::{routing::get, routing::post, Router};

use crate::handlers::{admin, auth, health};
use crate::state::AppState;

/// Create the /api router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
}

/// Administrative routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/principals/:id", get(admin::get_principal))
}
