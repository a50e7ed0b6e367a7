//! Principal entity - an authenticatable marketplace identity

use chrono::{DateTime, Utc};

use crate::value_objects::{PrincipalId, Role};

/// Persisted refresh token value and its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }
}

/// Principal entity
///
/// Holds at most one refresh token; issuing a new one overwrites the previous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Replace the stored refresh token
    pub fn set_refresh_token(&mut self, record: &RefreshTokenRecord) {
        self.refresh_token = Some(record.token.clone());
        self.refresh_token_expires_at = Some(record.expires_at);
        self.updated_at = Utc::now();
    }

    /// Byte-for-byte comparison against the stored refresh token
    pub fn holds_refresh_token(&self, presented: &str) -> bool {
        self.refresh_token.as_deref() == Some(presented)
    }

    /// Whether the stored refresh token is expired at `now`
    ///
    /// A missing expiry counts as expired.
    pub fn refresh_token_expired(&self, now: DateTime<Utc>) -> bool {
        match self.refresh_token_expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }
}

/// Input for creating a principal; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub refresh_token: Option<RefreshTokenRecord>,
}

impl NewPrincipal {
    /// Materialize the principal once the store has assigned an id
    pub fn into_principal(self, id: PrincipalId, now: DateTime<Utc>) -> Principal {
        let (refresh_token, refresh_token_expires_at) = match self.refresh_token {
            Some(record) => (Some(record.token), Some(record.expires_at)),
            None => (None, None),
        };

        Principal {
            id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            refresh_token,
            refresh_token_expires_at,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_principal() -> NewPrincipal {
        NewPrincipal {
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::User,
            refresh_token: None,
        }
    }

    #[test]
    fn test_into_principal_without_token() {
        let now = Utc::now();
        let principal = new_principal().into_principal(PrincipalId::new(1), now);
        assert_eq!(principal.id, PrincipalId::new(1));
        assert!(principal.refresh_token.is_none());
        assert!(principal.refresh_token_expired(now));
    }

    #[test]
    fn test_refresh_token_overwrite() {
        let now = Utc::now();
        let mut principal = new_principal().into_principal(PrincipalId::new(1), now);

        principal.set_refresh_token(&RefreshTokenRecord::new("t1", now + Duration::days(7)));
        assert!(principal.holds_refresh_token("t1"));

        principal.set_refresh_token(&RefreshTokenRecord::new("t2", now + Duration::days(7)));
        assert!(!principal.holds_refresh_token("t1"));
        assert!(principal.holds_refresh_token("t2"));
    }

    #[test]
    fn test_refresh_token_expiry() {
        let now = Utc::now();
        let mut principal = new_principal().into_principal(PrincipalId::new(1), now);
        principal.set_refresh_token(&RefreshTokenRecord::new("t1", now + Duration::seconds(10)));

        assert!(!principal.refresh_token_expired(now));
        assert!(principal.refresh_token_expired(now + Duration::seconds(11)));
    }
}
