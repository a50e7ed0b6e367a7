//! Integration test utilities for the marketplace auth server
//!
//! Spawns the real application on an ephemeral port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
