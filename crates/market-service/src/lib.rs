//! # market-service
//!
//! Application layer: the session manager, its dependency context, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthenticationResult, HealthChecks, HealthResponse, LoginRequest, PrincipalResponse,
    ReadinessResponse, RefreshTokenRequest, RegisterRequest,
};
pub use services::{
    PrincipalDirectory, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SessionManager,
};
