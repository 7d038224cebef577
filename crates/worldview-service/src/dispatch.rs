//! Operation table and call dispatch.
//!
//! Every operation is described by a [`MethodSpec`]: what input it takes
//! and what it needs loaded to run. [`Dispatcher::call`] is the single
//! entry point for a call. It takes the call gate (which serializes calls
//! and guards the service caches), then the simulation suspension, checks
//! liveness, runs the operation body, and releases both on every path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;
use worldview_core::SimulationGate;
use worldview_core::config::SyncConfig;
use worldview_types::{Method, RpcRequest, RpcResponse};
use worldview_world::{InputSink, WorldAccess};

use crate::error::RpcError;
use crate::ops;
use crate::state::ServiceCaches;

/// A world the service can serve: readable, accepts input, shareable
/// across the runtime.
pub trait ServiceWorld: WorldAccess + InputSink + Send + Sync + 'static {}

impl<T: WorldAccess + InputSink + Send + Sync + 'static> ServiceWorld for T {}

// ---------------------------------------------------------------------------
// Operation table
// ---------------------------------------------------------------------------

/// Input an operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    /// No input; any body is ignored.
    Empty,
    /// A query window.
    Window,
    /// A keyboard event.
    Keyboard,
}

/// What an operation needs loaded to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Liveness {
    /// Never fails; returns empty data when the world is absent.
    Static,
    /// Needs a loaded local map.
    Map,
    /// Needs macro-region data.
    WorldData,
}

impl Liveness {
    /// Check the requirement against a world.
    pub fn check<W: WorldAccess>(self, world: &W) -> Result<(), RpcError> {
        let live = match self {
            Self::Static => true,
            Self::Map => world.is_loaded(),
            Self::WorldData => world.world_data().is_some(),
        };
        if live {
            Ok(())
        } else {
            Err(RpcError::WorldNotLoaded)
        }
    }
}

/// One row of the operation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    /// The operation.
    pub method: Method,
    /// Its input.
    pub input: InputKind,
    /// Its liveness class.
    pub liveness: Liveness,
}

const fn row(method: Method, input: InputKind, liveness: Liveness) -> MethodSpec {
    MethodSpec {
        method,
        input,
        liveness,
    }
}

/// Every operation the service answers.
pub const METHOD_TABLE: [MethodSpec; 20] = [
    row(Method::GetMaterialList, InputKind::Empty, Liveness::Static),
    row(Method::GetItemList, InputKind::Empty, Liveness::Static),
    row(Method::GetGrowthList, InputKind::Empty, Liveness::Static),
    row(Method::GetTiletypeList, InputKind::Empty, Liveness::Static),
    row(Method::GetBuildingDefList, InputKind::Empty, Liveness::Static),
    row(Method::GetBlockList, InputKind::Window, Liveness::Map),
    row(Method::GetPlantList, InputKind::Window, Liveness::Map),
    row(Method::GetUnitList, InputKind::Empty, Liveness::Map),
    row(Method::CheckHashes, InputKind::Empty, Liveness::Map),
    row(Method::ResetMapHashes, InputKind::Empty, Liveness::Static),
    row(Method::GetViewInfo, InputKind::Empty, Liveness::Static),
    row(Method::GetMapInfo, InputKind::Empty, Liveness::Map),
    row(Method::GetWorldMap, InputKind::Empty, Liveness::WorldData),
    row(Method::GetWorldMapCenter, InputKind::Empty, Liveness::WorldData),
    row(Method::GetRegionMaps, InputKind::Empty, Liveness::WorldData),
    row(Method::GetRegionMapsNew, InputKind::Empty, Liveness::WorldData),
    row(Method::GetCreatureRaws, InputKind::Empty, Liveness::Static),
    row(Method::GetPlantRaws, InputKind::Empty, Liveness::Static),
    row(Method::CopyScreen, InputKind::Empty, Liveness::Static),
    row(Method::PassKeyboardEvent, InputKind::Keyboard, Liveness::Static),
];

/// Table row of an operation.
pub fn method_spec(method: Method) -> Option<&'static MethodSpec> {
    METHOD_TABLE.iter().find(|spec| spec.method == method)
}

/// Decode a JSON request body for an operation's input kind.
pub fn decode_request(input: InputKind, body: &[u8]) -> Result<RpcRequest, RpcError> {
    match input {
        InputKind::Empty => Ok(RpcRequest::Empty),
        InputKind::Window => serde_json::from_slice(body)
            .map(RpcRequest::Window)
            .map_err(|e| RpcError::InvalidRequest(format!("expected a query window: {e}"))),
        InputKind::Keyboard => serde_json::from_slice(body)
            .map(RpcRequest::Keyboard)
            .map_err(|e| RpcError::InvalidRequest(format!("expected a keyboard event: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Runs calls one at a time against the shared world.
#[derive(Debug)]
pub struct Dispatcher<W> {
    gate: Arc<SimulationGate<W>>,
    caches: Mutex<ServiceCaches>,
    sync: SyncConfig,
    calls: AtomicU64,
}

impl<W: ServiceWorld> Dispatcher<W> {
    /// Create a dispatcher over a shared gate.
    pub fn new(gate: Arc<SimulationGate<W>>, sync: SyncConfig) -> Self {
        Self {
            gate,
            caches: Mutex::new(ServiceCaches::new()),
            sync,
            calls: AtomicU64::new(0),
        }
    }

    /// The gate this dispatcher suspends.
    pub const fn gate(&self) -> &Arc<SimulationGate<W>> {
        &self.gate
    }

    /// Calls that reached an operation body or its liveness check.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Cells with stored checksums.
    pub async fn tracked_cells(&self) -> usize {
        self.caches.lock().await.tracker.len()
    }

    /// Run one call.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::WorldNotLoaded`] when the operation's liveness
    /// requirement is not met, or whatever the operation body reports.
    pub async fn call(&self, method: Method, request: RpcRequest) -> Result<RpcResponse, RpcError> {
        let spec =
            method_spec(method).ok_or_else(|| RpcError::UnknownMethod(method.to_string()))?;
        let started = Instant::now();

        let mut caches = self.caches.lock().await;
        let mut world = self.gate.suspend().await;
        self.calls.fetch_add(1, Ordering::Relaxed);

        let result = spec
            .liveness
            .check(&*world)
            .and_then(|()| ops::run(&mut *world, &mut caches, &self.sync, method, request));

        drop(world);
        drop(caches);

        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        match &result {
            Ok(_) => debug!(%method, elapsed_us, "Call complete"),
            Err(e) => debug!(%method, elapsed_us, error = %e, "Call failed"),
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::time::Duration;

    use worldview_types::{CellCoord, KeyboardEvent, RegionQueryWindow};
    use worldview_world::{MapExtent, MemoryWorld, Raws};

    use super::*;

    fn dispatcher(world: MemoryWorld) -> Dispatcher<MemoryWorld> {
        Dispatcher::new(Arc::new(SimulationGate::new(world)), SyncConfig::default())
    }

    fn loaded() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.load(
            MapExtent {
                size_x: 2,
                size_y: 2,
                size_z: 1,
                ..MapExtent::default()
            },
            Raws::default(),
        );
        world
    }

    #[test]
    fn table_covers_every_method_once() {
        for method in Method::ALL {
            let rows = METHOD_TABLE.iter().filter(|s| s.method == method).count();
            assert_eq!(rows, 1, "{method}");
        }
    }

    #[test]
    fn liveness_classes() {
        let spec = |m| method_spec(m).unwrap().liveness;
        assert_eq!(spec(Method::GetBlockList), Liveness::Map);
        assert_eq!(spec(Method::GetRegionMapsNew), Liveness::WorldData);
        assert_eq!(spec(Method::ResetMapHashes), Liveness::Static);
        assert_eq!(spec(Method::CopyScreen), Liveness::Static);
    }

    #[test]
    fn decode_window_and_reject_garbage() {
        let body = br#"{"min_x":0,"min_y":0,"min_z":0,"max_x":2,"max_y":2,"max_z":1}"#;
        let request = decode_request(InputKind::Window, body).unwrap();
        assert_eq!(
            request,
            RpcRequest::Window(RegionQueryWindow::new(
                CellCoord::new(0, 0, 0),
                CellCoord::new(2, 2, 1)
            ))
        );
        assert!(matches!(
            decode_request(InputKind::Window, b"{"),
            Err(RpcError::InvalidRequest(_))
        ));
        assert_eq!(
            decode_request(InputKind::Empty, b"garbage").unwrap(),
            RpcRequest::Empty
        );
    }

    #[tokio::test]
    async fn map_operations_fail_without_a_map() {
        let service = dispatcher(MemoryWorld::new());
        for method in [
            Method::GetBlockList,
            Method::GetPlantList,
            Method::GetUnitList,
            Method::GetMapInfo,
            Method::CheckHashes,
        ] {
            let request = RpcRequest::Window(RegionQueryWindow::default());
            let result = service.call(method, request).await;
            assert_eq!(result, Err(RpcError::WorldNotLoaded), "{method}");
        }
    }

    #[tokio::test]
    async fn world_data_operations_fail_without_world_data() {
        let service = dispatcher(loaded());
        for method in [
            Method::GetWorldMap,
            Method::GetWorldMapCenter,
            Method::GetRegionMaps,
            Method::GetRegionMapsNew,
        ] {
            let result = service.call(method, RpcRequest::Empty).await;
            assert_eq!(result, Err(RpcError::WorldNotLoaded), "{method}");
        }
    }

    #[tokio::test]
    async fn static_operations_succeed_without_a_world() {
        let service = dispatcher(MemoryWorld::new());
        let result = service
            .call(Method::GetMaterialList, RpcRequest::Empty)
            .await
            .unwrap();
        assert!(matches!(result, RpcResponse::Materials(list) if list.material_list.is_empty()));
        assert!(
            service
                .call(Method::ResetMapHashes, RpcRequest::Empty)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn gate_is_released_after_errors() {
        let service = dispatcher(MemoryWorld::new());
        let failed = service.call(Method::GetUnitList, RpcRequest::Empty).await;
        assert!(failed.is_err());
        assert!(!service.gate().is_held());

        let stepped = service.gate().step(|w| w.is_loaded()).await;
        assert!(!stepped);
        assert_eq!(service.gate().suspensions(), 1);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn window_operation_without_window_is_rejected() {
        let service = dispatcher(loaded());
        let result = service.call(Method::GetBlockList, RpcRequest::Empty).await;
        assert!(matches!(result, Err(RpcError::InvalidRequest(_))));
        assert!(!service.gate().is_held());
    }

    #[tokio::test]
    async fn calls_hold_off_steps() {
        let service = Arc::new(dispatcher(loaded()));
        let held = service.gate().suspend().await;

        let caller = Arc::clone(&service);
        let call = tokio::spawn(async move {
            caller
                .call(
                    Method::PassKeyboardEvent,
                    RpcRequest::Keyboard(KeyboardEvent::default()),
                )
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!call.is_finished());

        drop(held);
        assert!(call.await.unwrap().is_ok());
        assert_eq!(service.calls(), 1);
    }
}
