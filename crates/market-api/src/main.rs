//! Marketplace auth API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p market-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env`.

use market_common::{try_init_tracing_for, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_for(config.app.env) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        persistent = config.database.is_some(),
        "Configuration loaded"
    );

    if let Err(e) = market_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
