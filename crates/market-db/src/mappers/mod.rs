//! Entity to model mappers
//!
//! Conversions between domain entities (market-core) and database rows.

mod principal;

pub use principal::principal_from_row;
