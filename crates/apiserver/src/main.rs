//! Demonstration API server entry point.
//!
//! Exposes three fixed endpoints (`/`, `/v1/hello`, `/v1/echo`) that answer
//! in JSON or plain text depending on the request's `Accept` header, with
//! optional HTML chrome and a deterministic error-injection counter for
//! exercising client failure handling.
//!
//! # Architecture
//!
//! ```text
//! LISTEN/HTML/ERROR env --> AppConfig --> AppState --> Axum router --> serve
//! ```
//!
//! All behavior is fixed at startup; nothing is reloaded at runtime.

mod config;

use std::num::NonZeroU32;
use std::sync::Arc;

use apiserver_http::{start_server, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// then binds the listen address and serves requests until terminated.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server
/// loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "apiserver starting");

    let config = AppConfig::from_env();
    info!(
        listen = %config.listen,
        html = config.html,
        error_rate = config.error_rate.map_or(0, NonZeroU32::get),
        "configuration loaded"
    );

    let state = Arc::new(AppState::new(config.html, config.error_rate));
    let server_config = ServerConfig {
        listen: config.listen,
    };

    if let Err(err) = start_server(&server_config, state).await {
        error!(listen = %server_config.listen, error = %err, "apiserver failed");
        return Err(err.into());
    }

    Ok(())
}
