//! The read-only world accessor interface.
//!
//! Everything above this crate reads the world only through
//! [`WorldAccess`]. Absent data is `None` or empty, never an error: the
//! caller decides whether absence is a failure.

use worldview_types::{CellCoord, KeyboardEvent, TileCoord};

use crate::block::MapBlock;
use crate::building::{Building, Construction};
use crate::raws::Raws;
use crate::region::WorldData;
use crate::tiles::{ShapeBasic, TiletypeTable};
use crate::unit::Unit;
use crate::view::{GameMode, MapExtent, Screen, ViewState};

/// Read-only access to a (possibly absent) loaded world.
pub trait WorldAccess {
    /// Counter bumped each time a world is loaded or unloaded.
    fn load_generation(&self) -> u64;

    /// Active game mode.
    fn game_mode(&self) -> GameMode;

    /// Loaded local map, `None` when no map is loaded.
    fn map(&self) -> Option<&MapExtent>;

    /// Static definitions, `None` when no world is loaded.
    fn raws(&self) -> Option<&Raws>;

    /// Macro-region data, `None` when not available.
    fn world_data(&self) -> Option<&WorldData>;

    /// Raw cell at a coordinate.
    fn block(&self, coord: CellCoord) -> Option<&MapBlock>;

    /// Every allocated cell.
    fn blocks(&self) -> impl Iterator<Item = &MapBlock>;

    /// Tile type table.
    fn tiletypes(&self) -> &TiletypeTable;

    /// Placed buildings.
    fn buildings(&self) -> &[Building];

    /// Construction record for a tile, if one was built there.
    fn construction_at(&self, pos: TileCoord) -> Option<&Construction>;

    /// Active units.
    fn units(&self) -> &[Unit];

    /// Camera and cursor.
    fn view(&self) -> ViewState;

    /// Interface screen.
    fn screen(&self) -> &Screen;

    /// `true` when a local map is loaded.
    fn is_loaded(&self) -> bool {
        self.map().is_some()
    }

    /// Whether a cell holds anything worth sending: a tile that is not open
    /// space, any liquid, or a building marker.
    fn cell_has_content(&self, coord: CellCoord) -> bool {
        let Some(block) = self.block(coord) else {
            return false;
        };
        let table = self.tiletypes();
        let solid = block.tiletypes().iter().any(|&id| {
            table
                .get(id)
                .is_some_and(|t| !matches!(t.shape.basic(), ShapeBasic::None | ShapeBasic::Open))
        });
        solid
            || block.designations().iter().any(|d| d.flow_size() > 0)
            || block.occupancies().iter().any(|o| o.building() > 0)
    }
}

/// Receiver for interface input forwarded by observers.
pub trait InputSink {
    /// Queue one key event.
    fn push_key(&mut self, event: KeyboardEvent);
}
