//! Service context - dependency container for services
//!
//! Holds the credential store, token codec, password hasher, and session policy.

use std::sync::Arc;

use market_common::auth::{PasswordService, TokenCodec};
use market_core::traits::CredentialStore;
use market_core::Role;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency is shared behind an `Arc` or is stateless.
#[derive(Clone)]
pub struct ServiceContext {
    credential_store: Arc<dyn CredentialStore>,
    token_codec: Arc<TokenCodec>,
    password_service: PasswordService,
    default_role: Role,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        token_codec: Arc<TokenCodec>,
        password_service: PasswordService,
        default_role: Role,
    ) -> Self {
        Self {
            credential_store,
            token_codec,
            password_service,
            default_role,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the credential store
    pub fn credential_store(&self) -> &dyn CredentialStore {
        self.credential_store.as_ref()
    }

    /// Get the token codec
    pub fn token_codec(&self) -> &TokenCodec {
        self.token_codec.as_ref()
    }

    /// Get the password hasher
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Role assigned to newly registered principals
    pub fn default_role(&self) -> Role {
        self.default_role
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("credential_store", &"dyn CredentialStore")
            .field("token_codec", &self.token_codec)
            .field("default_role", &self.default_role)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    credential_store: Option<Arc<dyn CredentialStore>>,
    token_codec: Option<Arc<TokenCodec>>,
    password_service: Option<PasswordService>,
    default_role: Option<Role>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    pub fn token_codec(mut self, codec: Arc<TokenCodec>) -> Self {
        self.token_codec = Some(codec);
        self
    }

    pub fn password_service(mut self, service: PasswordService) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn default_role(mut self, role: Role) -> Self {
        self.default_role = Some(role);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the store or codec is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.credential_store
                .ok_or_else(|| ServiceError::validation("credential_store is required"))?,
            self.token_codec
                .ok_or_else(|| ServiceError::validation("token_codec is required"))?,
            self.password_service.unwrap_or_default(),
            self.default_role.unwrap_or_default(),
        ))
    }
}
