//! # market-common
//!
//! Shared utilities including configuration, error handling, token and
//! password primitives, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    Claims, IssuedToken, PasswordService, SigningKey, TokenCodec, TokenPair, TokenSubject,
    TokenType,
};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing_for, try_init_tracing_with_config, TracingConfig, TracingError};
