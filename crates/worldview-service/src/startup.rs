//! Query service startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_service`] which launches the HTTP server on a
//! background Tokio task so it runs alongside the step loop.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};
use worldview_core::config::ServerConfig;

use crate::dispatch::ServiceWorld;
use crate::server::{ServerError, parse_addr, start_server};
use crate::state::AppState;

/// Errors that can occur when spawning the query service.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the query service on a background Tokio task.
///
/// The address is validated before the task is spawned; binding happens
/// inside the task and a failure there is logged. The caller should hold
/// the returned handle and abort or await it during shutdown.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured host and port do
/// not form a socket address.
pub fn spawn_service<W: ServiceWorld>(
    config: ServerConfig,
    state: Arc<AppState<W>>,
) -> Result<JoinHandle<()>, StartupError> {
    let addr = parse_addr(&config)?;

    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            error!(error = %e, "Query service exited with error");
        }
    });

    info!(%addr, "Query service spawned on background task");

    Ok(handle)
}
