//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use responses::{
    AuthenticationResult, HealthChecks, HealthResponse, PrincipalResponse, ReadinessResponse,
};
