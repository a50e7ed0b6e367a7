//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use market_common::{AppConfig, AppError, TokenCodec};
use market_core::{CredentialStore, Role};
use market_db::{create_pool, run_migrations, InMemoryCredentialStore, PgCredentialStore, PoolConfig};
use market_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_auth, apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        apply_auth(create_router(), &state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Uses PostgreSQL when a database is configured, the in-memory store
/// otherwise.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let store: Arc<dyn CredentialStore> = match &config.database {
        Some(database) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");
            Arc::new(PgCredentialStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; principals are kept in memory and lost on restart");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    create_app_state_with_store(config, store)
}

/// Create AppState on top of an existing credential store
pub fn create_app_state_with_store(
    config: AppConfig,
    store: Arc<dyn CredentialStore>,
) -> Result<AppState, AppError> {
    let token_codec = Arc::new(TokenCodec::from_config(&config.jwt)?);

    let default_role = config.auth.default_role;
    if default_role == Role::Admin {
        warn!("AUTH_DEFAULT_ROLE is admin: every registered principal gets full access");
    }

    let service_context = ServiceContext::builder()
        .credential_store(store)
        .token_codec(token_codec)
        .default_role(default_role)
        .build()?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .context("Server error")
        .map_err(AppError::Internal)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))
        .map_err(AppError::Internal)?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app(state), &addr).await
}
