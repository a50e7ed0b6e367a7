//! Route access policy
//!
//! A single declarative table decides which paths skip authentication, which
//! need any authenticated principal, and which need a capability. Both the
//! authentication and the authorization middleware read the same table.

use market_core::{Capabilities, Role};

/// Access requirement for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No identity needed; authentication is skipped entirely
    Public,
    /// Any authenticated principal
    Authenticated,
    /// Authenticated principal whose role grants these capabilities
    Requires(Capabilities),
}

impl Access {
    /// Whether `role` satisfies this requirement
    pub fn permits(self, role: Role) -> bool {
        match self {
            Self::Public | Self::Authenticated => true,
            Self::Requires(required) => role.grants(required),
        }
    }
}

/// Policy entries, first match wins
///
/// A pattern ending in `/**` matches the prefix itself and everything below
/// it. Any other pattern is an exact match.
pub const DEFAULT_ROUTE_POLICIES: &[(&str, Access)] = &[
    ("/health", Access::Public),
    ("/health/ready", Access::Public),
    ("/api/auth/login", Access::Public),
    ("/api/auth/register", Access::Public),
    ("/api/auth/refresh", Access::Public),
    ("/api/users", Access::Public),
    ("/api/orders/**", Access::Public),
    ("/api/orderItems/**", Access::Public),
    ("/api/auth/me", Access::Requires(Capabilities::READ_OWN_PROFILE)),
    ("/api/admin/**", Access::Requires(Capabilities::MANAGE_PRINCIPALS)),
];

#[derive(Debug, Clone)]
enum Pattern {
    Exact(String),
    Prefix(String),
}

impl Pattern {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/**") {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Prefix(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

/// Compiled route policy table
#[derive(Debug, Clone)]
pub struct RoutePolicyTable {
    entries: Vec<(Pattern, Access)>,
    fallback: Access,
}

impl RoutePolicyTable {
    /// Build a table from `(pattern, access)` entries
    ///
    /// Paths that match no entry require authentication.
    pub fn new(entries: &[(&str, Access)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(pattern, access)| (Pattern::parse(pattern), *access))
                .collect(),
            fallback: Access::Authenticated,
        }
    }

    /// Access requirement for a request path
    pub fn access_for(&self, path: &str) -> Access {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map_or(self.fallback, |(_, access)| *access)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.access_for(path) == Access::Public
    }
}

impl Default for RoutePolicyTable {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_POLICIES)
    }
}
