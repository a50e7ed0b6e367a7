//! # market-db
//!
//! Credential store implementations for the session core.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup
//! - Database models with SQLx `FromRow` derives
//! - Row ↔ entity mappers
//! - `PgCredentialStore` (PostgreSQL) and `InMemoryCredentialStore`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_db::pool::{create_pool, run_migrations, PoolConfig};
//! use market_db::PgCredentialStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/market")).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgCredentialStore::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{InMemoryCredentialStore, PgCredentialStore};
