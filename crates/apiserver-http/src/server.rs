//! apiserver HTTP server lifecycle management.
//!
//! Provides [`start_server`] which binds the configured listen address,
//! builds the router, and serves requests until the process terminates.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Configuration for the apiserver HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind, either `host:port` or the `:port` shorthand
    /// for all interfaces. Hostnames are resolved at bind time.
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: String::from(":3000"),
        }
    }
}

/// Start the apiserver HTTP server.
///
/// Binds the configured address, builds the router, and serves requests
/// until the process is terminated. Each connection's peer address is
/// recorded so handlers can log it.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = normalize_listen_addr(&config.listen);

    let router = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("local address on {addr}: {e}")))?;

    info!(addr = %local, listen = %config.listen, "apiserver listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Errors that can occur when starting or running the apiserver.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind the listen address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Expand the `:port` shorthand into an all-interfaces bind address.
fn normalize_listen_addr(listen: &str) -> String {
    if listen.starts_with(':') {
        format!("0.0.0.0{listen}")
    } else {
        listen.to_owned()
    }
}
