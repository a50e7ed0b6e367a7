//! # market-core
//!
//! Domain layer for the marketplace authentication core: the principal record,
//! roles and their capabilities, and the credential store port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewPrincipal, Principal, RefreshTokenRecord};
pub use error::DomainError;
pub use traits::{CredentialStore, RepoResult};
pub use value_objects::{Capabilities, PrincipalId, PrincipalIdParseError, Role, RoleParseError};
