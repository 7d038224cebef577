//! Camera, map metadata, screen capture, and keyboard forwarding.

use tracing::debug;
use worldview_types::{KeyboardEvent, MapInfo, ScreenCapture, ScreenTile, ViewInfo};
use worldview_world::{InputSink, WorldAccess};

use crate::error::RpcError;

/// Coordinate reported for each axis of a hidden cursor.
pub const HIDDEN_CURSOR: i32 = -30000;

/// Camera position, size, cursor, and followed unit or item.
///
/// While the embark screen is up the reported level is the elevation of
/// the macro-region under the embark cursor.
pub fn view_info<W: WorldAccess>(world: &W) -> ViewInfo {
    let view = world.view();
    let embark_z = view.embark_region.and_then(|(x, y)| {
        world
            .world_data()
            .and_then(|w| w.summary(x, y))
            .map(|s| i32::from(s.elevation))
    });
    let cursor = view.cursor;
    ViewInfo {
        view_pos_x: view.pos.x,
        view_pos_y: view.pos.y,
        view_pos_z: embark_z.unwrap_or(view.pos.z),
        view_size_x: view.size_x,
        view_size_y: view.size_y,
        cursor_pos_x: cursor.map_or(HIDDEN_CURSOR, |c| c.x),
        cursor_pos_y: cursor.map_or(HIDDEN_CURSOR, |c| c.y),
        cursor_pos_z: cursor.map_or(HIDDEN_CURSOR, |c| c.z),
        follow_unit_id: view.follow_unit,
        follow_item_id: view.follow_item,
    }
}

/// Size and position of the loaded map, with world and save names.
///
/// # Errors
///
/// [`RpcError::WorldNotLoaded`] if no map is loaded.
pub fn map_info<W: WorldAccess>(world: &W) -> Result<MapInfo, RpcError> {
    let map = world.map().ok_or(RpcError::WorldNotLoaded)?;
    let (world_name, world_name_english) = world
        .world_data()
        .map(|w| (w.name.clone(), w.name_english.clone()))
        .unwrap_or_default();
    Ok(MapInfo {
        block_size_x: map.size_x,
        block_size_y: map.size_y,
        block_size_z: map.size_z,
        block_pos_x: map.origin.x,
        block_pos_y: map.origin.y,
        block_pos_z: map.origin.z,
        world_name,
        world_name_english,
        save_name: map.save_name.clone(),
    })
}

/// Copy of the interface screen in storage order (column-major).
pub fn copy_screen<W: WorldAccess>(world: &W) -> ScreenCapture {
    let screen = world.screen();
    ScreenCapture {
        width: screen.width(),
        height: screen.height(),
        tiles: screen
            .cells()
            .iter()
            .map(|cell| ScreenTile {
                character: cell.ch,
                foreground: u8::try_from(cell.color.index()).unwrap_or(0),
                background: cell.color.bg,
            })
            .collect(),
    }
}

/// Queue a key event for the interface.
pub fn pass_keyboard_event<W: InputSink>(world: &mut W, event: KeyboardEvent) {
    debug!(sym = event.sym, scancode = event.scancode, "Key event forwarded");
    world.push_key(event);
}
