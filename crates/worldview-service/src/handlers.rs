//! HTTP endpoint handlers for the query service.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/methods` | Operation table |
//! | `POST` | `/rpc/{method}` | Run one operation |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use worldview_types::Method;

use crate::dispatch::{METHOD_TABLE, ServiceWorld, decode_request, method_spec};
use crate::error::RpcError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with gate counters and the operation list.
pub async fn index<W: ServiceWorld>(State(state): State<Arc<AppState<W>>>) -> impl IntoResponse {
    let dispatcher = &state.dispatcher;
    let gate = dispatcher.gate();
    let steps = gate.steps();
    let suspensions = gate.suspensions();
    let calls = dispatcher.calls();
    let tracked = dispatcher.tracked_cells().await;
    let started_at = state.started_at.format("%Y-%m-%d %H:%M:%S UTC");
    let loop_status = match &state.control {
        Some(control) if control.is_stop_requested() => "STOPPING",
        Some(_) => "RUNNING",
        None => "DETACHED",
    };
    let methods: String = Method::ALL
        .iter()
        .map(|m| format!("        <li>/rpc/{m}</li>\n"))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Worldview</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "POST "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Worldview</h1>
    <p class="subtitle">Incremental world sync service, up since {started_at}</p>

    <p>Step loop: <span class="status">{loop_status}</span></p>

    <div>
        <div class="metric">
            <div class="label">Steps</div>
            <div class="value">{steps}</div>
        </div>
        <div class="metric">
            <div class="label">Suspensions</div>
            <div class="value">{suspensions}</div>
        </div>
        <div class="metric">
            <div class="label">Calls</div>
            <div class="value">{calls}</div>
        </div>
        <div class="metric">
            <div class="label">Tracked cells</div>
            <div class="value">{tracked}</div>
        </div>
    </div>

    <hr>

    <h2>Operations</h2>
    <p><a href="/api/methods">/api/methods</a> -- operation table</p>
    <ul>
{methods}    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/methods -- operation table
// ---------------------------------------------------------------------------

/// Return the operation table: name, input kind, and liveness class of
/// every operation.
#[allow(clippy::unused_async)]
pub async fn list_methods() -> impl IntoResponse {
    Json(METHOD_TABLE)
}

// ---------------------------------------------------------------------------
// POST /rpc/{method} -- run one operation
// ---------------------------------------------------------------------------

/// Decode the body for the named operation, run it, and return its reply.
pub async fn call_method<W: ServiceWorld>(
    State(state): State<Arc<AppState<W>>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, RpcError> {
    let method = Method::from_name(&name).ok_or(RpcError::UnknownMethod(name))?;
    let spec = method_spec(method).ok_or_else(|| RpcError::UnknownMethod(method.to_string()))?;
    let request = decode_request(spec.input, &body)?;
    let response = state.dispatcher.call(method, request).await?;
    Ok(Json(response))
}
