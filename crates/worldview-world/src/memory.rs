//! In-memory world store.
//!
//! [`MemoryWorld`] implements [`WorldAccess`] and [`InputSink`] over plain
//! owned collections, and exposes a mutation API used by world builders and
//! the simulation step. Loading or unloading bumps the load generation.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info};
use worldview_types::{CellCoord, KeyboardEvent, TileCoord};

use crate::access::{InputSink, WorldAccess};
use crate::block::MapBlock;
use crate::building::{Building, Construction};
use crate::error::WorldError;
use crate::raws::Raws;
use crate::region::WorldData;
use crate::tiles::TiletypeTable;
use crate::unit::Unit;
use crate::view::{GameMode, MapExtent, Screen, ViewState};

/// Maximum queued key events; older events are dropped first.
const KEY_QUEUE_LIMIT: usize = 256;

/// An owned, mutable world.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    generation: u64,
    mode: GameMode,
    map: Option<MapExtent>,
    raws: Option<Raws>,
    world: Option<WorldData>,
    blocks: BTreeMap<CellCoord, MapBlock>,
    tiletypes: TiletypeTable,
    buildings: Vec<Building>,
    constructions: BTreeMap<TileCoord, Construction>,
    units: Vec<Unit>,
    view: ViewState,
    screen: Screen,
    keys: VecDeque<KeyboardEvent>,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorld {
    /// An empty store with nothing loaded and the standard tile type table.
    pub fn new() -> Self {
        Self {
            generation: 0,
            mode: GameMode::Fortress,
            map: None,
            raws: None,
            world: None,
            blocks: BTreeMap::new(),
            tiletypes: TiletypeTable::standard(),
            buildings: Vec::new(),
            constructions: BTreeMap::new(),
            units: Vec::new(),
            view: ViewState::default(),
            screen: Screen::new(80, 25),
            keys: VecDeque::new(),
        }
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Load a map and its raws, discarding any previous map content.
    pub fn load(&mut self, map: MapExtent, raws: Raws) {
        self.clear_map();
        info!(
            size_x = map.size_x,
            size_y = map.size_y,
            size_z = map.size_z,
            save = %map.save_name,
            "Map loaded"
        );
        self.map = Some(map);
        self.raws = Some(raws);
        self.generation = self.generation.saturating_add(1);
    }

    /// Unload the map, raws, and world data.
    pub fn unload(&mut self) {
        self.clear_map();
        self.map = None;
        self.raws = None;
        self.world = None;
        self.generation = self.generation.saturating_add(1);
        info!(generation = self.generation, "World unloaded");
    }

    fn clear_map(&mut self) {
        self.blocks.clear();
        self.buildings.clear();
        self.constructions.clear();
        self.units.clear();
    }

    /// Install or remove macro-region data.
    pub fn set_world_data(&mut self, world: Option<WorldData>) {
        self.world = world;
    }

    /// Switch game mode.
    pub const fn set_game_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Replace the tile type table.
    pub fn set_tiletypes(&mut self, table: TiletypeTable) {
        self.tiletypes = table;
    }

    // -------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------

    /// Allocate a cell. The map must be loaded and contain the coordinate.
    pub fn insert_block(&mut self, block: MapBlock) -> Result<(), WorldError> {
        let coord = block.coord();
        let map = self.map.as_ref().ok_or(WorldError::MapNotLoaded)?;
        if !map.contains(coord) {
            return Err(WorldError::OutsideMap(coord));
        }
        if self.blocks.contains_key(&coord) {
            return Err(WorldError::DuplicateBlock(coord));
        }
        self.blocks.insert(coord, block);
        Ok(())
    }

    /// Mutable access to an allocated cell.
    pub fn block_mut(&mut self, coord: CellCoord) -> Result<&mut MapBlock, WorldError> {
        self.blocks
            .get_mut(&coord)
            .ok_or(WorldError::BlockNotFound(coord))
    }

    /// Coordinates of every allocated cell, in key order.
    pub fn block_coords(&self) -> Vec<CellCoord> {
        self.blocks.keys().copied().collect()
    }

    /// Set one tile's type by token.
    pub fn set_tile(&mut self, pos: TileCoord, token: &str) -> Result<(), WorldError> {
        let id = self
            .tiletypes
            .id_of(token)
            .ok_or_else(|| WorldError::UnknownTiletype(token.to_owned()))?;
        let (x, y) = pos.local();
        self.block_mut(pos.cell())?.set_tiletype(x, y, id)
    }

    // -------------------------------------------------------------------
    // Map objects
    // -------------------------------------------------------------------

    /// Place a building.
    pub fn add_building(&mut self, building: Building) -> Result<(), WorldError> {
        if self.map.is_none() {
            return Err(WorldError::MapNotLoaded);
        }
        debug!(id = building.id, kind = building.kind.token(), "Building placed");
        self.buildings.push(building);
        Ok(())
    }

    /// Remove a building by id, returning it.
    pub fn remove_building(&mut self, id: i32) -> Option<Building> {
        let index = self.buildings.iter().position(|b| b.id == id)?;
        Some(self.buildings.remove(index))
    }

    /// Record a construction.
    pub fn add_construction(&mut self, construction: Construction) {
        self.constructions.insert(construction.pos, construction);
    }

    /// Add a unit.
    pub fn add_unit(&mut self, unit: Unit) -> Result<(), WorldError> {
        if self.map.is_none() {
            return Err(WorldError::MapNotLoaded);
        }
        self.units.push(unit);
        Ok(())
    }

    /// Mutable access to the units.
    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    // -------------------------------------------------------------------
    // Interface
    // -------------------------------------------------------------------

    /// Mutable camera state.
    pub const fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Mutable screen.
    pub const fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Key events not yet consumed.
    pub fn pending_keys(&self) -> impl Iterator<Item = &KeyboardEvent> {
        self.keys.iter()
    }

    /// Consume all queued key events.
    pub fn drain_keys(&mut self) -> Vec<KeyboardEvent> {
        self.keys.drain(..).collect()
    }
}

impl WorldAccess for MemoryWorld {
    fn load_generation(&self) -> u64 {
        self.generation
    }

    fn game_mode(&self) -> GameMode {
        self.mode
    }

    fn map(&self) -> Option<&MapExtent> {
        self.map.as_ref()
    }

    fn raws(&self) -> Option<&Raws> {
        self.raws.as_ref()
    }

    fn world_data(&self) -> Option<&WorldData> {
        self.world.as_ref()
    }

    fn block(&self, coord: CellCoord) -> Option<&MapBlock> {
        self.blocks.get(&coord)
    }

    fn blocks(&self) -> impl Iterator<Item = &MapBlock> {
        self.blocks.values()
    }

    fn tiletypes(&self) -> &TiletypeTable {
        &self.tiletypes
    }

    fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    fn construction_at(&self, pos: TileCoord) -> Option<&Construction> {
        self.constructions.get(&pos)
    }

    fn units(&self) -> &[Unit] {
        &self.units
    }

    fn view(&self) -> ViewState {
        self.view
    }

    fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl InputSink for MemoryWorld {
    fn push_key(&mut self, event: KeyboardEvent) {
        if self.keys.len() >= KEY_QUEUE_LIMIT {
            self.keys.pop_front();
        }
        self.keys.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designation::{Designation, Occupancy};

    fn make_loaded() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.load(
            MapExtent {
                size_x: 2,
                size_y: 2,
                size_z: 2,
                ..MapExtent::default()
            },
            Raws::default(),
        );
        world
    }

    #[test]
    fn load_bumps_generation() {
        let mut world = MemoryWorld::new();
        assert!(!world.is_loaded());
        let before = world.load_generation();
        world = make_loaded();
        assert!(world.is_loaded());
        assert!(world.load_generation() > before);
        let loaded = world.load_generation();
        world.unload();
        assert!(!world.is_loaded());
        assert!(world.load_generation() > loaded);
    }

    #[test]
    fn insert_requires_map() {
        let mut world = MemoryWorld::new();
        let result = world.insert_block(MapBlock::new(CellCoord::new(0, 0, 0), 1));
        assert!(matches!(result, Err(WorldError::MapNotLoaded)));
    }

    #[test]
    fn insert_rejects_outside_and_duplicates() {
        let mut world = make_loaded();
        assert!(world.insert_block(MapBlock::new(CellCoord::new(0, 0, 0), 1)).is_ok());
        assert!(matches!(
            world.insert_block(MapBlock::new(CellCoord::new(0, 0, 0), 1)),
            Err(WorldError::DuplicateBlock(_))
        ));
        assert!(matches!(
            world.insert_block(MapBlock::new(CellCoord::new(5, 0, 0), 1)),
            Err(WorldError::OutsideMap(_))
        ));
    }

    #[test]
    fn set_tile_resolves_token() {
        let mut world = make_loaded();
        assert!(world.insert_block(MapBlock::new(CellCoord::new(1, 0, 0), 1)).is_ok());
        assert!(world.set_tile(TileCoord::new(17, 2, 0), "StoneWall").is_ok());
        let wall = world.tiletypes().id_of("StoneWall");
        let stored = world.block(CellCoord::new(1, 0, 0)).and_then(|b| b.tiletype(1, 2));
        assert_eq!(stored, wall);
        assert!(matches!(
            world.set_tile(TileCoord::new(17, 2, 0), "NoSuchTile"),
            Err(WorldError::UnknownTiletype(_))
        ));
    }

    #[test]
    fn content_test_sees_walls_liquid_and_buildings() {
        let mut world = make_loaded();
        let open = world.tiletypes().id_of("OpenSpace").unwrap_or_default();
        for x in 0..2 {
            assert!(world.insert_block(MapBlock::new(CellCoord::new(x, 0, 0), open)).is_ok());
        }
        assert!(world.insert_block(MapBlock::new(CellCoord::new(0, 1, 0), open)).is_ok());
        assert!(!world.cell_has_content(CellCoord::new(0, 0, 0)));
        assert!(!world.cell_has_content(CellCoord::new(1, 1, 1)));

        assert!(world.set_tile(TileCoord::new(3, 3, 0), "StoneFloor1").is_ok());
        assert!(world.cell_has_content(CellCoord::new(0, 0, 0)));

        if let Ok(block) = world.block_mut(CellCoord::new(1, 0, 0)) {
            assert!(block.set_designation(0, 0, Designation::EMPTY.with_flow_size(3)).is_ok());
        }
        assert!(world.cell_has_content(CellCoord::new(1, 0, 0)));

        if let Ok(block) = world.block_mut(CellCoord::new(0, 1, 0)) {
            assert!(block.set_occupancy(4, 4, Occupancy::EMPTY.with_building(1)).is_ok());
        }
        assert!(world.cell_has_content(CellCoord::new(0, 1, 0)));
    }

    #[test]
    fn key_queue_is_bounded() {
        let mut world = MemoryWorld::new();
        for i in 0..300_u32 {
            world.push_key(KeyboardEvent {
                sym: i,
                ..KeyboardEvent::default()
            });
        }
        assert_eq!(world.pending_keys().count(), KEY_QUEUE_LIMIT);
        let drained = world.drain_keys();
        assert_eq!(drained.first().map(|k| k.sym), Some(44));
        assert_eq!(world.pending_keys().count(), 0);
    }
}
