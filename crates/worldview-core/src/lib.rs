//! Change detection, cell enumeration, translation, and the simulation
//! gate for Worldview.
//!
//! This crate holds everything between the raw world and the query
//! operations: which cells changed, which cells to look at first, how raw
//! codes become wire codes, and how the step loop and the query service
//! share one world.
//!
//! # Modules
//!
//! - [`checksum`] -- Fletcher-16 digest over raw cell buffers
//! - [`dirty`] -- Per-cell last-sent checksums
//! - [`spiral`] -- Budget-bounded spiral enumeration of a query window
//! - [`translate`] -- Internal code spaces to wire vocabulary, colours
//! - [`direction`] -- Building facing lookup table
//! - [`stitch`] -- Seamless region grids from detail records
//! - [`cell`] -- Raw cell to wire record
//! - [`gate`] -- The single exclusive suspension of the world
//! - [`control`] -- Stop flag and run limits of the step loop
//! - [`runner`] -- The step loop
//! - [`config`] -- Configuration loading from `worldview-config.yaml`

pub mod cell;
pub mod checksum;
pub mod config;
pub mod control;
pub mod direction;
pub mod dirty;
pub mod gate;
pub mod runner;
pub mod spiral;
pub mod stitch;
pub mod translate;

pub use cell::{Sections, building_snapshot, cell_record};
pub use checksum::fletcher16;
pub use config::{ConfigError, WorldviewConfig};
pub use control::{StepControl, StepEndReason};
pub use direction::building_direction;
pub use dirty::{CellMarks, DirtyTracker};
pub use gate::{SimulationGate, Suspension};
pub use runner::{
    NoOpCallback, RunnerError, SimulationResult, SimulationStep, StepCallback, StepSummary,
    log_simulation_end, run_simulation,
};
pub use spiral::{SpiralEnumerator, default_budget, points_per_level};
pub use stitch::{stitch_all, stitch_region};
