//! # market-api
//!
//! REST API server for the marketplace session core, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod security;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_state_with_store, run, serve};
pub use state::AppState;
