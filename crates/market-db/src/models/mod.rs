//! Database models - SQLx-compatible structs for PostgreSQL tables

mod principal;

pub use principal::PrincipalModel;
