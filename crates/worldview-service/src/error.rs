//! Error types for the query service.
//!
//! [`RpcError`] covers every way a call can fail, from dispatch down to the
//! operation bodies, and converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors returned by a query call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The operation needs world or map data that is not loaded.
    #[error("world not loaded")]
    WorldNotLoaded,

    /// The query window is inverted or larger than the service accepts.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// No operation has this name.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// The request body could not be decoded for the operation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RpcError {
    /// HTTP status the error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::WorldNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRegion(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnknownMethod(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
