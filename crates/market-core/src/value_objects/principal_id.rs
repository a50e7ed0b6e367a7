//! Principal ID - stable numeric identity assigned by the credential store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric principal identifier (BIGSERIAL in PostgreSQL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(i64);

impl PrincipalId {
    /// Create a new PrincipalId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, PrincipalIdParseError> {
        s.parse::<i64>()
            .map(PrincipalId)
            .map_err(|_| PrincipalIdParseError::InvalidFormat)
    }
}

/// Error when parsing a PrincipalId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PrincipalIdParseError {
    #[error("invalid principal id format")]
    InvalidFormat,
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PrincipalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<PrincipalId> for i64 {
    fn from(id: PrincipalId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PrincipalId {
    type Err = PrincipalIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
