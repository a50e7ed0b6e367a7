//! JWT utilities for authentication
//!
//! Provides token issuance, decoding, and validation using the `jsonwebtoken` crate.
//! Tokens are HS512-signed; expiry is checked with zero leeway.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use market_core::{NewPrincipal, Principal, RefreshTokenRecord, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SigningKey;
use crate::config::{ConfigError, JwtConfig};
use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal email)
    pub sub: String,
    /// Role claim, only present on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Token type (access or refresh)
    pub typ: TokenType,
    /// Unique token id
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Check if this is an access token
    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.typ == TokenType::Access
    }

    /// Check if this is a refresh token
    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.typ == TokenType::Refresh
    }
}

/// Identity a token is issued for
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub email: &'a str,
    pub role: Role,
}

impl<'a> From<&'a Principal> for TokenSubject<'a> {
    fn from(principal: &'a Principal) -> Self {
        Self {
            email: &principal.email,
            role: principal.role,
        }
    }
}

impl<'a> From<&'a NewPrincipal> for TokenSubject<'a> {
    fn from(principal: &'a NewPrincipal) -> Self {
        Self {
            email: &principal.email,
            role: principal.role,
        }
    }
}

/// A signed token with its validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Persistable form of a refresh token
    #[must_use]
    pub fn to_record(&self) -> RefreshTokenRecord {
        RefreshTokenRecord::new(self.token.clone(), self.expires_at)
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Token codec: issues and verifies signed, time-bounded tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenCodec {
    /// Create a codec from a validated signing key and expiry windows (seconds)
    #[must_use]
    pub fn new(key: &SigningKey, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Build the codec from configuration
    ///
    /// # Errors
    /// Returns an error if the configured secret is missing, malformed, or too short
    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        let key = SigningKey::from_base64(&config.secret)?;
        Ok(Self::new(
            &key,
            config.access_token_expiry,
            config.refresh_token_expiry,
        ))
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Issue an access token carrying the subject's role
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token<'a>(
        &self,
        subject: impl Into<TokenSubject<'a>>,
    ) -> Result<IssuedToken, AppError> {
        self.issue_access_token_at(subject, Utc::now())
    }

    /// Issue an access token as of `now`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token_at<'a>(
        &self,
        subject: impl Into<TokenSubject<'a>>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let subject = subject.into();
        self.encode_token(subject.email, Some(subject.role), TokenType::Access, now)
    }

    /// Issue a refresh token (no role claim)
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_refresh_token<'a>(
        &self,
        subject: impl Into<TokenSubject<'a>>,
    ) -> Result<IssuedToken, AppError> {
        self.issue_refresh_token_at(subject, Utc::now())
    }

    /// Issue a refresh token as of `now`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_refresh_token_at<'a>(
        &self,
        subject: impl Into<TokenSubject<'a>>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let subject = subject.into();
        self.encode_token(subject.email, None, TokenType::Refresh, now)
    }

    /// Issue an access and refresh token together
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token_pair<'a>(
        &self,
        subject: impl Into<TokenSubject<'a>>,
    ) -> Result<TokenPair, AppError> {
        let subject = subject.into();
        let now = Utc::now();

        Ok(TokenPair {
            access: self.issue_access_token_at(subject, now)?,
            refresh: self.issue_refresh_token_at(subject, now)?,
        })
    }

    fn encode_token(
        &self,
        email: &str,
        role: Option<Role>,
        typ: TokenType,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expiry = match typ {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };

        let issued_at = now.timestamp();
        let expires_at = (now + Duration::seconds(expiry)).timestamp();

        let claims = Claims {
            sub: email.to_string(),
            role,
            typ,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(IssuedToken {
            token,
            issued_at: timestamp_to_datetime(issued_at)?,
            expires_at: timestamp_to_datetime(expires_at)?,
        })
    }

    /// Decode and validate a token of either type
    ///
    /// # Errors
    /// `TokenExpired` past expiry, `TokenMalformed` for any structural or signature failure
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::TokenMalformed,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token and require it to be an access token
    ///
    /// # Errors
    /// Same as [`TokenCodec::decode`]; a refresh token is `TokenMalformed`
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;

        if !claims.is_access_token() {
            return Err(AppError::TokenMalformed);
        }

        Ok(claims)
    }

    /// Decode a token and require it to be a refresh token
    ///
    /// # Errors
    /// Same as [`TokenCodec::decode`]; an access token is `TokenMalformed`
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;

        if !claims.is_refresh_token() {
            return Err(AppError::TokenMalformed);
        }

        Ok(claims)
    }

    /// Extract the subject (email) from a valid token
    ///
    /// # Errors
    /// Same as [`TokenCodec::decode`]
    pub fn extract_subject(&self, token: &str) -> Result<String, AppError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// True iff the token verifies, is unexpired, and names `principal`
    ///
    /// Does not check revocation.
    #[must_use]
    pub fn is_valid(&self, token: &str, principal: &Principal) -> bool {
        self.decode(token)
            .map(|claims| claims.sub == principal.email)
            .unwrap_or(false)
    }
}

fn timestamp_to_datetime(secs: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("timestamp out of range: {secs}")))
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
