//! Spatial addressing for cells, tiles, and query windows.
//!
//! The world is a 3D grid of tiles grouped into 16x16 cells per vertical
//! level. Cells are the unit of change detection and transmission; tiles
//! are the unit of every per-tile array inside a wire record.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of tiles along one horizontal edge of a cell.
pub const CELL_EDGE: i32 = 16;

/// Number of tiles in one cell (`CELL_EDGE * CELL_EDGE`).
pub const TILES_PER_CELL: usize = 256;

// ---------------------------------------------------------------------------
// CellCoord
// ---------------------------------------------------------------------------

/// Address of one cell: a 16x16 tile column slice at a single z-level.
///
/// Coordinates are in cell units. Two coordinates are the same cell iff
/// all three components are equal, so the type is used directly as a map
/// key by the dirty tracker and the world store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct CellCoord {
    /// Cell column (west to east).
    pub x: i32,
    /// Cell row (north to south).
    pub y: i32,
    /// Vertical level.
    pub z: i32,
}

impl CellCoord {
    /// Create a cell coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Tile coordinate of this cell's north-west corner.
    pub const fn origin(self) -> TileCoord {
        TileCoord {
            x: self.x.saturating_mul(CELL_EDGE),
            y: self.y.saturating_mul(CELL_EDGE),
            z: self.z,
        }
    }

    /// Chebyshev distance (ring index) between two cells on the same plane.
    pub const fn ring_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

impl core::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// TileCoord
// ---------------------------------------------------------------------------

/// Address of one tile in world tile units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct TileCoord {
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
    /// Vertical level.
    pub z: i32,
}

impl TileCoord {
    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing this tile.
    pub const fn cell(self) -> CellCoord {
        CellCoord {
            x: self.x.div_euclid(CELL_EDGE),
            y: self.y.div_euclid(CELL_EDGE),
            z: self.z,
        }
    }

    /// Offset of this tile inside its cell, each component in `0..16`.
    pub const fn local(self) -> (usize, usize) {
        (
            self.x.rem_euclid(CELL_EDGE).unsigned_abs() as usize,
            self.y.rem_euclid(CELL_EDGE).unsigned_abs() as usize,
        )
    }
}

// ---------------------------------------------------------------------------
// RegionQueryWindow
// ---------------------------------------------------------------------------

/// Half-open box of cells a client asks about, plus an optional budget.
///
/// Ranges are `[min, max)` on every axis, in cell units. When
/// `blocks_needed` is absent the enumerator derives a default budget from
/// the window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionQueryWindow {
    /// Inclusive lower cell column.
    pub min_x: i32,
    /// Inclusive lower cell row.
    pub min_y: i32,
    /// Inclusive lower level.
    pub min_z: i32,
    /// Exclusive upper cell column.
    pub max_x: i32,
    /// Exclusive upper cell row.
    pub max_y: i32,
    /// Exclusive upper level.
    pub max_z: i32,
    /// Explicit cell budget for this call, if any.
    #[serde(default)]
    pub blocks_needed: Option<u32>,
}

impl RegionQueryWindow {
    /// Create a window without an explicit budget.
    pub const fn new(min: CellCoord, max: CellCoord) -> Self {
        Self {
            min_x: min.x,
            min_y: min.y,
            min_z: min.z,
            max_x: max.x,
            max_y: max.y,
            max_z: max.z,
            blocks_needed: None,
        }
    }

    /// Return a copy of this window carrying an explicit budget.
    #[must_use]
    pub const fn with_budget(mut self, blocks: u32) -> Self {
        self.blocks_needed = Some(blocks);
        self
    }

    /// `true` if any axis has `min > max`.
    pub const fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }

    /// `true` if the window contains no cell.
    pub const fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y || self.min_z >= self.max_z
    }

    /// Number of columns covered (zero when inverted).
    pub const fn width(&self) -> u32 {
        span(self.min_x, self.max_x)
    }

    /// Number of rows covered (zero when inverted).
    pub const fn height(&self) -> u32 {
        span(self.min_y, self.max_y)
    }

    /// Number of levels covered (zero when inverted).
    pub const fn depth(&self) -> u32 {
        span(self.min_z, self.max_z)
    }

    /// `true` if the cell column/row lies inside the horizontal rectangle.
    pub const fn contains_xy(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

const fn span(min: i32, max: i32) -> u32 {
    if max > min { max.abs_diff(min) } else { 0 }
}
