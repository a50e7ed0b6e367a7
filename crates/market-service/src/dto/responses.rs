//! Response DTOs for the auth and health endpoints
//!
//! Field names follow the JSON shape the marketplace clients already consume.

use chrono::{DateTime, Utc};
use market_common::auth::TokenPair;
use market_core::{Principal, PrincipalId, Role};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Tokens plus principal summary returned by register, login, and refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResult {
    pub token: String,
    pub refresh_token: String,
    pub authuser_id: PrincipalId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub role: Role,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl AuthenticationResult {
    pub fn new(principal: &Principal, tokens: &TokenPair, expires_in: i64) -> Self {
        Self {
            token: tokens.access.token.clone(),
            refresh_token: tokens.refresh.token.clone(),
            authuser_id: principal.id,
            email: principal.email.clone(),
            firstname: principal.first_name.clone(),
            lastname: principal.last_name.clone(),
            role: principal.role,
            token_type: "Bearer",
            expires_in,
        }
    }
}

/// Principal profile without credentials
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub id: PrincipalId,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            firstname: principal.first_name.clone(),
            lastname: principal.last_name.clone(),
            email: principal.email.clone(),
            role: principal.role,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub credential_store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                credential_store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_common::auth::IssuedToken;
    use market_core::NewPrincipal;

    fn principal() -> Principal {
        NewPrincipal {
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::User,
            refresh_token: None,
        }
        .into_principal(PrincipalId::new(5), Utc::now())
    }

    fn issued(token: &str) -> IssuedToken {
        IssuedToken {
            token: token.to_string(),
            issued_at: Utc::now(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_authentication_result_wire_names() {
        let tokens = TokenPair {
            access: issued("access"),
            refresh: issued("refresh"),
        };
        let json = serde_json::to_value(AuthenticationResult::new(&principal(), &tokens, 7200))
            .unwrap();

        assert_eq!(json["token"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert_eq!(json["authuserId"], 5);
        assert_eq!(json["firstname"], "Ada");
        assert_eq!(json["role"], "ROLE_USER");
        assert_eq!(json["tokenType"], "Bearer");
        assert_eq!(json["expiresIn"], 7200);
    }

    #[test]
    fn test_principal_response_has_no_credentials() {
        let json = serde_json::to_value(PrincipalResponse::from(&principal())).unwrap();
        let body = json.to_string();

        assert_eq!(json["id"], 5);
        assert_eq!(json["lastname"], "Lovelace");
        assert!(!body.contains("argon2"));
        assert!(json.get("password").is_none());
        assert!(json.get("refreshToken").is_none());
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.credential_store, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
    }
}
