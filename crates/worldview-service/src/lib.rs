//! Query service for Worldview.
//!
//! This crate answers the fixed set of remote operations against a shared
//! world. Each call runs inside one exclusive suspension of the
//! simulation, so a reply always reflects a single consistent state.
//! Change detection state (the dirty tracker) and the building definition
//! cache live in the service instance and persist between calls.
//!
//! The HTTP transport is an Axum server exposing `POST /rpc/{method}` with
//! JSON bodies, an operation listing, and a status page.
//!
//! # Modules
//!
//! - [`dispatch`] -- Operation table, request decoding, the call path
//! - [`ops`] -- Operation bodies
//! - [`state`] -- Service caches and router state
//! - [`error`] -- Call errors and their HTTP mapping
//! - [`handlers`] -- HTTP endpoint handlers
//! - [`router`] -- Route assembly
//! - [`server`] -- Listener lifecycle
//! - [`startup`] -- Background spawn helper for the engine binary

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod ops;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

pub use dispatch::{Dispatcher, InputKind, Liveness, METHOD_TABLE, MethodSpec, ServiceWorld};
pub use error::RpcError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use startup::{StartupError, spawn_service};
pub use state::{AppState, ServiceCaches};
