//! Axum router construction for the query service.
//!
//! Assembles every route into a single [`Router`] with CORS middleware
//! enabled for cross-origin viewer access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::dispatch::ServiceWorld;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query service.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/methods` -- operation table
/// - `POST /rpc/{method}` -- run one operation
///
/// CORS is configured to allow any origin.
pub fn build_router<W: ServiceWorld>(state: Arc<AppState<W>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index::<W>))
        // Operations
        .route("/api/methods", get(handlers::list_methods))
        .route("/rpc/{method}", post(handlers::call_method::<W>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
