//! Route security policy

pub mod policy;

pub use policy::{Access, RoutePolicyTable, DEFAULT_ROUTE_POLICIES};
