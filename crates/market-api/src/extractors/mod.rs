//! Axum extractors for request handling

mod auth;
mod validated;

pub use auth::AuthPrincipal;
pub use validated::ValidatedJson;
