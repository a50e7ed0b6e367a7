//! Application state
//!
//! Holds the shared state for the Axum application: the service context, the
//! route policy table and the configuration.

use std::sync::Arc;

use market_common::{AppConfig, TokenCodec};
use market_service::ServiceContext;

use crate::security::RoutePolicyTable;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    policies: Arc<RoutePolicyTable>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState with the default route policies
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            policies: Arc::new(RoutePolicyTable::default()),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the route policy table
    pub fn policies(&self) -> &RoutePolicyTable {
        &self.policies
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the token codec from the service context
    pub fn token_codec(&self) -> &TokenCodec {
        self.service_context.token_codec()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("policies", &self.policies)
            .field("config", &"AppConfig")
            .finish()
    }
}
