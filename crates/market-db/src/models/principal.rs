//! Principal database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the auth_principals table
#[derive(Debug, Clone, FromRow)]
pub struct PrincipalModel {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
