//! Raw per-cell storage: tile types, designations, occupancy, materials.
//!
//! A [`MapBlock`] holds the state of one 16x16 cell at one level. Per-tile
//! arrays are row-major (`y * 16 + x`) and always exactly 256 long; the
//! constructor is the only way to build one.

use worldview_types::{CELL_EDGE, CellCoord, MatPair, TILES_PER_CELL, TileCoord};

use crate::designation::{Designation, Occupancy};
use crate::error::WorldError;

/// Materials of one tile as the simulation resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileMaterials {
    /// Effective material after constructions, veins, and features.
    pub static_mat: MatPair,
    /// Material of the underlying layer before veins.
    pub base_mat: MatPair,
    /// Geological layer inorganic index.
    pub layer: i32,
    /// Vein inorganic index, `-1` for none.
    pub vein: i32,
}

/// A plant rooted in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plant {
    /// Tile position.
    pub pos: TileCoord,
    /// Index into the plant raws.
    pub raw_index: i32,
}

/// Raw state of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapBlock {
    coord: CellCoord,
    tiletypes: Vec<u16>,
    designations: Vec<Designation>,
    occupancy: Vec<Occupancy>,
    materials: Vec<TileMaterials>,
    plants: Vec<Plant>,
}

/// Row-major index of a tile inside a cell, `None` outside `0..16`.
pub fn tile_index(x: usize, y: usize) -> Option<usize> {
    let edge = CELL_EDGE.unsigned_abs() as usize;
    if x >= edge || y >= edge {
        return None;
    }
    y.checked_mul(edge)?.checked_add(x)
}

impl MapBlock {
    /// Create a cell filled with one tile type and empty flags.
    pub fn new(coord: CellCoord, fill: u16) -> Self {
        Self {
            coord,
            tiletypes: vec![fill; TILES_PER_CELL],
            designations: vec![Designation::EMPTY; TILES_PER_CELL],
            occupancy: vec![Occupancy::EMPTY; TILES_PER_CELL],
            materials: vec![TileMaterials::default(); TILES_PER_CELL],
            plants: Vec::new(),
        }
    }

    /// Address of this cell.
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Tile coordinate of the tile at local `(x, y)`.
    pub fn tile_pos(&self, x: usize, y: usize) -> TileCoord {
        let origin = self.coord.origin();
        let dx = i32::try_from(x).unwrap_or(0);
        let dy = i32::try_from(y).unwrap_or(0);
        TileCoord::new(
            origin.x.saturating_add(dx),
            origin.y.saturating_add(dy),
            origin.z,
        )
    }

    // -------------------------------------------------------------------
    // Whole-buffer access (checksums, copies)
    // -------------------------------------------------------------------

    /// All tile type ids.
    pub fn tiletypes(&self) -> &[u16] {
        &self.tiletypes
    }

    /// All designation words.
    pub fn designations(&self) -> &[Designation] {
        &self.designations
    }

    /// All occupancy words.
    pub fn occupancies(&self) -> &[Occupancy] {
        &self.occupancy
    }

    /// All tile materials.
    pub fn materials(&self) -> &[TileMaterials] {
        &self.materials
    }

    /// Plants rooted in this cell.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Little-endian bytes of the tile type buffer.
    pub fn tiletype_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.tiletypes.iter().flat_map(|t| t.to_le_bytes())
    }

    /// Little-endian bytes of the designation buffer.
    pub fn designation_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.designations.iter().flat_map(|d| d.0.to_le_bytes())
    }

    /// Little-endian bytes of the occupancy buffer.
    pub fn occupancy_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.occupancy.iter().flat_map(|o| o.0.to_le_bytes())
    }

    // -------------------------------------------------------------------
    // Per-tile access
    // -------------------------------------------------------------------

    /// Tile type at local `(x, y)`.
    pub fn tiletype(&self, x: usize, y: usize) -> Option<u16> {
        tile_index(x, y).and_then(|i| self.tiletypes.get(i).copied())
    }

    /// Designation at local `(x, y)`.
    pub fn designation(&self, x: usize, y: usize) -> Option<Designation> {
        tile_index(x, y).and_then(|i| self.designations.get(i).copied())
    }

    /// Occupancy at local `(x, y)`.
    pub fn occupancy(&self, x: usize, y: usize) -> Option<Occupancy> {
        tile_index(x, y).and_then(|i| self.occupancy.get(i).copied())
    }

    /// Set the tile type at local `(x, y)`.
    pub fn set_tiletype(&mut self, x: usize, y: usize, id: u16) -> Result<(), WorldError> {
        let slot = tile_index(x, y)
            .and_then(|i| self.tiletypes.get_mut(i))
            .ok_or(WorldError::TileOutOfCell { x, y })?;
        *slot = id;
        Ok(())
    }

    /// Set the designation word at local `(x, y)`.
    pub fn set_designation(
        &mut self,
        x: usize,
        y: usize,
        designation: Designation,
    ) -> Result<(), WorldError> {
        let slot = tile_index(x, y)
            .and_then(|i| self.designations.get_mut(i))
            .ok_or(WorldError::TileOutOfCell { x, y })?;
        *slot = designation;
        Ok(())
    }

    /// Set the occupancy word at local `(x, y)`.
    pub fn set_occupancy(
        &mut self,
        x: usize,
        y: usize,
        occupancy: Occupancy,
    ) -> Result<(), WorldError> {
        let slot = tile_index(x, y)
            .and_then(|i| self.occupancy.get_mut(i))
            .ok_or(WorldError::TileOutOfCell { x, y })?;
        *slot = occupancy;
        Ok(())
    }

    /// Set the materials at local `(x, y)`.
    pub fn set_materials(
        &mut self,
        x: usize,
        y: usize,
        materials: TileMaterials,
    ) -> Result<(), WorldError> {
        let slot = tile_index(x, y)
            .and_then(|i| self.materials.get_mut(i))
            .ok_or(WorldError::TileOutOfCell { x, y })?;
        *slot = materials;
        Ok(())
    }

    /// Apply a designation edit to every tile.
    pub fn map_designations(&mut self, f: impl Fn(Designation) -> Designation) {
        for d in &mut self.designations {
            *d = f(*d);
        }
    }

    /// Fill every tile's materials.
    pub fn fill_materials(&mut self, materials: TileMaterials) {
        self.materials.fill(materials);
    }

    /// Root a plant in this cell. The plant must lie inside the cell.
    pub fn add_plant(&mut self, plant: Plant) -> Result<(), WorldError> {
        if plant.pos.cell() != self.coord {
            return Err(WorldError::PlantOutsideCell {
                cell: self.coord,
                pos: plant.pos,
            });
        }
        self.plants.push(plant);
        Ok(())
    }

    /// Remove any plant rooted at a tile.
    pub fn remove_plant_at(&mut self, pos: TileCoord) {
        self.plants.retain(|p| p.pos != pos);
    }
}
