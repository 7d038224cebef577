//! State owned by the query service.
//!
//! [`ServiceCaches`] lives behind the dispatcher's call gate and is only
//! touched from inside a call. [`AppState`] is what the HTTP router shares
//! between handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use worldview_core::config::SyncConfig;
use worldview_core::{DirtyTracker, SimulationGate, StepControl};
use worldview_types::BuildingList;
use worldview_world::WorldAccess;

use crate::dispatch::{Dispatcher, ServiceWorld};
use crate::ops::defs::building_def_list;

/// Caches that persist across calls.
#[derive(Debug, Default)]
pub struct ServiceCaches {
    /// Last-sent checksums per cell.
    pub tracker: DirtyTracker,
    /// Building definitions and the load generation they were built for.
    building_defs: Option<(u64, BuildingList)>,
}

impl ServiceCaches {
    /// Empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Building definitions for the world's current load generation,
    /// rebuilt when the world was loaded or unloaded since the last call.
    pub fn building_defs<W: WorldAccess>(&mut self, world: &W) -> BuildingList {
        let generation = world.load_generation();
        match &self.building_defs {
            Some((cached, list)) if *cached == generation => list.clone(),
            _ => {
                let list = building_def_list(world);
                self.building_defs = Some((generation, list.clone()));
                list
            }
        }
    }

    /// Load generation the building definitions were built for, if any.
    pub fn building_defs_generation(&self) -> Option<u64> {
        self.building_defs.as_ref().map(|(generation, _)| *generation)
    }
}

/// Shared state behind the HTTP router.
#[derive(Debug)]
pub struct AppState<W> {
    /// Call dispatcher.
    pub dispatcher: Dispatcher<W>,
    /// Step loop control, when a step loop is attached.
    pub control: Option<Arc<StepControl>>,
    /// When the service was created.
    pub started_at: DateTime<Utc>,
}

impl<W: ServiceWorld> AppState<W> {
    /// Create state over a shared gate.
    pub fn new(gate: Arc<SimulationGate<W>>, sync: SyncConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(gate, sync),
            control: None,
            started_at: Utc::now(),
        }
    }

    /// Attach step loop control for the status page.
    #[must_use]
    pub fn with_control(mut self, control: Arc<StepControl>) -> Self {
        self.control = Some(control);
        self
    }
}
