//! Error types for the `worldview-world` crate.
//!
//! Only the mutation side of the world store can fail. The read-only
//! accessor interface returns `Option` for absent data instead.

use worldview_types::{CellCoord, TileCoord};

/// Errors raised while building or mutating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No cell is stored at the coordinate.
    #[error("no cell at {0}")]
    BlockNotFound(CellCoord),

    /// A cell was inserted twice.
    #[error("duplicate cell at {0}")]
    DuplicateBlock(CellCoord),

    /// A cell lies outside the loaded map extents.
    #[error("cell {0} is outside the map")]
    OutsideMap(CellCoord),

    /// A mutation was attempted with no map loaded.
    #[error("no map loaded")]
    MapNotLoaded,

    /// A local tile offset is outside `0..16`.
    #[error("tile ({x}, {y}) is outside the cell")]
    TileOutOfCell {
        /// Local column.
        x: usize,
        /// Local row.
        y: usize,
    },

    /// A plant was added to a cell that does not contain it.
    #[error("plant at {pos:?} is not inside cell {cell}")]
    PlantOutsideCell {
        /// The receiving cell.
        cell: CellCoord,
        /// The plant's tile.
        pos: TileCoord,
    },

    /// A tile type token is not in the tile type table.
    #[error("unknown tile type token: {0}")]
    UnknownTiletype(String),

    /// A demo world parameter is out of range.
    #[error("invalid demo world parameter: {0}")]
    InvalidParameter(String),
}
