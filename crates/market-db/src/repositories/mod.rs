//! Credential store implementations
//!
//! PostgreSQL and in-memory implementations of the `CredentialStore` port
//! defined in market-core.

mod error;
mod memory;
mod principal;

pub use memory::InMemoryCredentialStore;
pub use principal::PgCredentialStore;
