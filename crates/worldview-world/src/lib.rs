//! World model and read-only accessor interface for Worldview.
//!
//! This crate defines the simulation's internal code spaces and raw data
//! layout, the [`WorldAccess`] trait every query goes through, and an
//! in-memory implementation ([`MemoryWorld`]) with a deterministic demo
//! world generator.
//!
//! # Modules
//!
//! - [`tiles`] -- Tile shape/material/special/variant codes and the tile type table
//! - [`designation`] -- Packed designation and occupancy words
//! - [`block`] -- Raw per-cell storage
//! - [`building`] -- Buildings, kinds, and kind-specific detail
//! - [`raws`] -- Materials, creatures, plants, item types, colours
//! - [`unit`] -- Units on the map
//! - [`region`] -- Macro-region map and detail records
//! - [`view`] -- Game mode, camera, map extents, screen buffer
//! - [`access`] -- The `WorldAccess` and `InputSink` traits
//! - [`memory`] -- In-memory world store
//! - [`demo`] -- Deterministic demo world
//! - [`error`] -- World mutation errors

pub mod access;
pub mod block;
pub mod building;
pub mod demo;
pub mod designation;
pub mod error;
pub mod memory;
pub mod raws;
pub mod region;
pub mod tiles;
pub mod unit;
pub mod view;

pub use access::{InputSink, WorldAccess};
pub use block::{MapBlock, Plant, TileMaterials};
pub use building::{
    BridgeDirection, Building, BuildingDetail, BuildingKind, Construction, PumpDirection, Room,
    SiegeFacing,
};
pub use demo::{DemoParams, create_demo_world};
pub use designation::{DigDesignation, Designation, LiquidType, Occupancy};
pub use error::WorldError;
pub use memory::MemoryWorld;
pub use raws::{Material, MatterState, PaletteColor, REFERENCE_TEMPERATURE, Raws};
pub use region::{Grid, RegionDetails, RegionSummary, WorldData};
pub use tiles::{ShapeBasic, TileMaterial, TileShape, TileSpecial, TileVariant, TiletypeTable};
pub use unit::Unit;
pub use view::{DEFAULT_PALETTE, GameMode, MapExtent, Palette, Screen, ScreenCell, ViewState};
