//! Query service HTTP server lifecycle.
//!
//! Provides [`start_server`] which binds to a TCP port and runs the Axum
//! server until the task is aborted or serving fails.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use worldview_core::config::ServerConfig;

use crate::dispatch::ServiceWorld;
use crate::router::build_router;
use crate::state::AppState;

/// Start the query service HTTP server.
///
/// Binds to the configured address, builds the router, and serves
/// requests until the process is terminated.
///
/// # Errors
///
/// Returns an error if the address is invalid, the TCP listener cannot
/// bind, or the server encounters a fatal I/O error.
pub async fn start_server<W: ServiceWorld>(
    config: &ServerConfig,
    state: Arc<AppState<W>>,
) -> Result<(), ServerError> {
    let addr = parse_addr(config)?;
    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Query service listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Socket address of a listener configuration.
///
/// # Errors
///
/// [`ServerError::Bind`] if host and port do not form a socket address.
pub fn parse_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
    let addr_str = format!("{}:{}", config.host, config.port);
    addr_str
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address {addr_str}: {e}")))
}

/// Errors that can occur when starting or running the query service.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let addr = parse_addr(&ServerConfig::default());
        assert!(addr.is_ok_and(|a| a.port() == 3060));
    }

    #[test]
    fn bad_host_is_a_bind_error() {
        let config = ServerConfig {
            host: String::from("not a host"),
            port: 1,
        };
        assert!(matches!(parse_addr(&config), Err(ServerError::Bind(_))));
    }
}
