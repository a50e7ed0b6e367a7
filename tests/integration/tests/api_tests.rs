//! API Integration Tests
//!
//! Each test spawns its own server on an ephemeral port with the in-memory
//! credential store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{assert_error, assert_json, fixtures::*, TestServer};
use market_common::TokenSubject;
use market_core::Role;
use reqwest::StatusCode;

async fn register(server: &TestServer, request: &RegisterRequest) -> AuthenticationResult {
    let response = server.post("/api/auth/register", request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn login(server: &TestServer, request: &RegisterRequest) -> AuthenticationResult {
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(request))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_tokens_with_default_role() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "a@x.com".to_string(),
        password: "pw123".to_string(),
    };

    let auth = register(&server, &request).await;

    assert!(!auth.token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert_eq!(auth.role, "ROLE_USER");
    assert_eq!(auth.email, "a@x.com");
    assert_eq!(auth.firstname, "Ada");
    assert_eq!(auth.lastname, "Lovelace");
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.expires_in, 7200);
}

#[tokio::test]
async fn test_register_uses_configured_default_role() {
    let server = TestServer::start_with(&[("AUTH_DEFAULT_ROLE", "ROLE_ADMIN")])
        .await
        .expect("Failed to start server");

    let auth = register(&server, &RegisterRequest::unique()).await;
    assert_eq!(auth.role, "ROLE_ADMIN");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    register(&server, &request).await;

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_register_missing_field() {
    let server = TestServer::start().await.expect("Failed to start server");
    let body = serde_json::json!({"firstname": "A", "email": "b@x.com", "password": "pw"});

    let response = server.post("/api/auth/register", &body).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"]["details"]["lastname"].is_array());
}

#[tokio::test]
async fn test_register_malformed_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());

    // Nothing was stored, so the address cannot log in
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let registered = register(&server, &request).await;

    let auth = login(&server, &request).await;
    assert_eq!(auth.authuser_id, registered.authuser_id);
    assert_ne!(auth.refresh_token, registered.refresh_token);
}

#[tokio::test]
async fn test_login_failures_share_one_answer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    register(&server, &request).await;

    let wrong_password = LoginRequest {
        email: request.email.clone(),
        password: "nope".to_string(),
    };
    let unknown_email = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: request.password.clone(),
    };

    let first: serde_json::Value = assert_json(
        server.post("/api/auth/login", &wrong_password).await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    let second: serde_json::Value = assert_json(
        server.post("/api/auth/login", &unknown_email).await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();

    assert_eq!(first["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_wrong_password_keeps_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let registered = register(&server, &request).await;

    let wrong = LoginRequest {
        email: request.email.clone(),
        password: "nope".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // The refresh token issued at registration is still the live one
    let response = server
        .post("/api/auth/refresh", &RefreshRequest::new(&registered.refresh_token))
        .await
        .unwrap();
    assert_json::<AuthenticationResult>(response, StatusCode::OK)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_overwrites_previous_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    register(&server, &request).await;

    let first = login(&server, &request).await;
    let second = login(&server, &request).await;

    let response = server
        .post("/api/auth/refresh", &RefreshRequest::new(&first.refresh_token))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "TOKEN_MISMATCH");

    let response = server
        .post("/api/auth/refresh", &RefreshRequest::new(&second.refresh_token))
        .await
        .unwrap();
    assert_json::<AuthenticationResult>(response, StatusCode::OK)
        .await
        .unwrap();
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_and_is_single_use() {
    let server = TestServer::start().await.expect("Failed to start server");
    let registered = register(&server, &RegisterRequest::unique()).await;

    let response = server
        .post("/api/auth/refresh", &RefreshRequest::new(&registered.refresh_token))
        .await
        .unwrap();
    let refreshed: AuthenticationResult = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(refreshed.refresh_token, registered.refresh_token);

    let response = server
        .post("/api/auth/refresh", &RefreshRequest::new(&registered.refresh_token))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "TOKEN_MISMATCH");
}

#[tokio::test]
async fn test_refresh_accepts_snake_case_field() {
    let server = TestServer::start().await.expect("Failed to start server");
    let registered = register(&server, &RegisterRequest::unique()).await;

    let body = serde_json::json!({"refresh_token": registered.refresh_token});
    let response = server.post("/api/auth/refresh", &body).await.unwrap();
    assert_json::<AuthenticationResult>(response, StatusCode::OK)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_rejects_garbage_and_access_tokens() {
    let server = TestServer::start().await.expect("Failed to start server");
    let registered = register(&server, &RegisterRequest::unique()).await;

    for token in ["", "garbage", registered.token.as_str()] {
        let response = server
            .post("/api/auth/refresh", &RefreshRequest::new(token))
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "INVALID_REFRESH_TOKEN");
    }
}

#[tokio::test]
async fn test_concurrent_refresh_has_one_winner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let registered = register(&server, &RegisterRequest::unique()).await;
    let body = RefreshRequest::new(&registered.refresh_token);

    let (first, second) = tokio::join!(
        server.post("/api/auth/refresh", &body),
        server.post("/api/auth/refresh", &body),
    );
    let statuses = [first.unwrap(), second.unwrap()];

    let winners = statuses.iter().filter(|r| r.status() == StatusCode::OK).count();
    assert_eq!(winners, 1);

    for response in statuses {
        if response.status() != StatusCode::OK {
            let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
            assert_eq!(code, "TOKEN_MISMATCH");
        }
    }
}

// ============================================================================
// Current principal
// ============================================================================

#[tokio::test]
async fn test_me() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let registered = register(&server, &request).await;

    let response = server.get_auth("/api/auth/me", &registered.token).await.unwrap();
    let me: PrincipalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, registered.authuser_id);
    assert_eq!(me.email, request.email);
    assert_eq!(me.firstname, request.firstname);
    assert_eq!(me.lastname, request.lastname);
    assert_eq!(me.role, "ROLE_USER");
}

#[tokio::test]
async fn test_me_without_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/auth/me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTH");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    register(&server, &request).await;

    let codec = server.token_codec().unwrap();
    let subject = TokenSubject {
        email: &request.email,
        role: Role::User,
    };
    let expired = codec
        .issue_access_token_at(subject, Utc::now() - Duration::hours(3))
        .unwrap();

    let response = server.get_auth("/api/auth/me", &expired.token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_me_with_token_for_unknown_subject() {
    let server = TestServer::start().await.expect("Failed to start server");
    let codec = server.token_codec().unwrap();
    let orphan = codec
        .issue_access_token(TokenSubject {
            email: "ghost@example.com",
            role: Role::Admin,
        })
        .unwrap();

    let response = server.get_auth("/api/auth/me", &orphan.token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_FOUND");
}

// ============================================================================
// Route policy
// ============================================================================

#[tokio::test]
async fn test_admin_routes_need_admin_role() {
    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server, &RegisterRequest::unique()).await;
    let path = format!("/api/admin/principals/{}", user.authuser_id);

    let response = server.get_auth(&path, &user.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_admin_looks_up_principal() {
    let server = TestServer::start_with(&[("AUTH_DEFAULT_ROLE", "admin")])
        .await
        .expect("Failed to start server");
    let admin = register(&server, &RegisterRequest::unique()).await;
    let other = register(&server, &RegisterRequest::unique()).await;

    let path = format!("/api/admin/principals/{}", other.authuser_id);
    let response = server.get_auth(&path, &admin.token).await.unwrap();
    let found: PrincipalResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, other.authuser_id);
    assert_eq!(found.email, other.email);
}
