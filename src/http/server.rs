//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {addr:?}: {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Parse the configured host and port into a socket address.
pub fn listen_addr(config: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    addr.parse()
        .map_err(|source| ServerError::Address { addr, source })
}

/// Start the HTTP server.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;
    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(
        handle.clone(),
        Duration::from_secs(config.shutdown_timeout_seconds),
    );

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
