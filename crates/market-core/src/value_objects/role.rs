//! Role - closed set of marketplace roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Capabilities;

/// Role held by a principal
///
/// Serialized with the `ROLE_` prefix the marketplace clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
}

impl Role {
    /// Wire and storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
        }
    }

    /// Capabilities granted by this role
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Self::Admin => Capabilities::ADMINISTRATOR,
            Self::User => Capabilities::CUSTOMER,
        }
    }

    /// Shorthand for `self.capabilities().has(required)`
    #[inline]
    pub fn grants(&self, required: Capabilities) -> bool {
        self.capabilities().has(required)
    }
}

/// Error when parsing a Role from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("ROLE_")
            .or_else(|| trimmed.strip_prefix("role_"))
            .unwrap_or(trimmed);

        match name.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
