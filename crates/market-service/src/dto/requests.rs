//! Request DTOs for the auth endpoints
//!
//! Missing fields deserialize as empty strings so that blank-field handling
//! produces a field-level 400 instead of a JSON rejection.

use serde::Deserialize;
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub firstname: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub lastname: String,

    #[serde(default)]
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken", alias = "refresh_token", default)]
    #[validate(length(max = 4096, message = "Refresh token is too long"))]
    pub refresh_token: String,
}
