//! Macro-region map and stitched region grids.

use worldview_core::stitch::{stitch_all, water_elevation};
use worldview_types::{CloudCover, RegionMaps, WorldMap, WorldPoles};
use worldview_world::{RegionSummary, WorldAccess, WorldData};

use super::wire_index;
use crate::error::RpcError;

/// Level reported for the embark center when no world data is present.
const EMBARK_DEFAULT_Z: i32 = 100;

/// Edge of a macro-region in region tiles.
const REGION_TILES: i32 = 16;

const HALF_REGION: i32 = REGION_TILES / 2;

fn world_data<W: WorldAccess>(world: &W) -> Result<&WorldData, RpcError> {
    world.world_data().ok_or(RpcError::WorldNotLoaded)
}

/// Point the client should center on: the middle of the macro-region
/// under the embark cursor, otherwise the map origin.
fn map_center<W: WorldAccess>(world: &W) -> (i32, i32, i32) {
    if let Some((rx, ry)) = world.view().embark_region {
        let z = world
            .world_data()
            .and_then(|w| w.summary(rx, ry))
            .map_or(EMBARK_DEFAULT_Z, |s| i32::from(s.elevation));
        return (
            rx.saturating_mul(REGION_TILES).saturating_add(HALF_REGION),
            ry.saturating_mul(REGION_TILES).saturating_add(HALF_REGION),
            z,
        );
    }
    world
        .map()
        .map_or((0, 0, 0), |m| (m.origin.x, m.origin.y, m.origin.z))
}

/// Header shared by the full map and the center-only reply.
fn header<W: WorldAccess>(world: &W, data: &WorldData) -> WorldMap {
    let (center_x, center_y, center_z) = map_center(world);
    WorldMap {
        world_width: wire_index(data.width()),
        world_height: wire_index(data.height()),
        name: data.name.clone(),
        name_english: data.name_english.clone(),
        center_x,
        center_y,
        center_z,
        cur_year: data.cur_year,
        cur_year_tick: data.cur_year_tick,
        ..WorldMap::default()
    }
}

fn layer(data: &WorldData, f: impl Fn(&RegionSummary) -> i16) -> Vec<i32> {
    data.region_map.iter().map(|s| i32::from(f(s))).collect()
}

/// Every macro-region attribute as row-major arrays, with pole flags and
/// the current date.
///
/// # Errors
///
/// [`RpcError::WorldNotLoaded`] without world data.
pub fn world_map<W: WorldAccess>(world: &W) -> Result<WorldMap, RpcError> {
    let data = world_data(world)?;
    Ok(WorldMap {
        elevation: layer(data, |s| s.elevation),
        rainfall: layer(data, |s| s.rainfall),
        vegetation: layer(data, |s| s.vegetation),
        temperature: layer(data, |s| s.temperature),
        evilness: layer(data, |s| s.evilness),
        drainage: layer(data, |s| s.drainage),
        volcanism: layer(data, |s| s.volcanism),
        savagery: layer(data, |s| s.savagery),
        salinity: layer(data, |s| s.salinity),
        clouds: data
            .region_map
            .iter()
            .map(|s| CloudCover {
                front: i32::from(s.clouds.front),
                cumulus: i32::from(s.clouds.cumulus),
                cirrus: s.clouds.cirrus,
                stratus: i32::from(s.clouds.stratus),
                fog: i32::from(s.clouds.fog),
            })
            .collect(),
        water_elevation: data
            .region_map
            .iter()
            .map(|s| water_elevation(data, s))
            .collect(),
        world_poles: WorldPoles::from_edges(data.north_pole, data.south_pole),
        ..header(world, data)
    })
}

/// World size, names, center, and date without the attribute arrays.
///
/// # Errors
///
/// [`RpcError::WorldNotLoaded`] without world data.
pub fn world_map_center<W: WorldAccess>(world: &W) -> Result<WorldMap, RpcError> {
    let data = world_data(world)?;
    Ok(header(world, data))
}

/// Stitched grids for every loaded detail record.
///
/// # Errors
///
/// [`RpcError::WorldNotLoaded`] without world data.
pub fn region_maps<W: WorldAccess>(world: &W) -> Result<RegionMaps, RpcError> {
    let data = world_data(world)?;
    Ok(RegionMaps {
        region_maps: stitch_all(data),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use worldview_world::{DemoParams, MemoryWorld, create_demo_world};

    use super::*;

    fn demo() -> MemoryWorld {
        create_demo_world(&DemoParams::default()).unwrap()
    }

    #[test]
    fn full_map_has_one_entry_per_region() {
        let world = demo();
        let map = world_map(&world).unwrap();
        assert_eq!((map.world_width, map.world_height), (17, 17));
        assert_eq!(map.elevation.len(), 289);
        assert_eq!(map.clouds.len(), 289);
        assert_eq!(map.water_elevation.len(), 289);
        assert_eq!(map.world_poles, WorldPoles::from_edges(false, true));
        assert_eq!(map.name, "Kogan Demo");

        let data = world.world_data().unwrap();
        let second = data.summary(1, 0).unwrap();
        assert_eq!(map.elevation.get(1), Some(&i32::from(second.elevation)));
    }

    #[test]
    fn center_only_reply_has_no_arrays() {
        let world = demo();
        let map = world_map_center(&world).unwrap();
        assert!(map.elevation.is_empty());
        assert_eq!((map.center_x, map.center_y, map.center_z), (24, 24, 100));
        assert_eq!(map.world_width, 17);
    }

    #[test]
    fn embark_cursor_moves_the_center() {
        let mut world = demo();
        world.view_mut().embark_region = Some((2, 3));
        let elevation = world
            .world_data()
            .and_then(|w| w.summary(2, 3))
            .map(|s| i32::from(s.elevation))
            .unwrap();
        let map = world_map_center(&world).unwrap();
        assert_eq!(
            (map.center_x, map.center_y, map.center_z),
            (40, 56, elevation)
        );
    }

    #[test]
    fn regions_are_stitched_for_every_record() {
        let maps = region_maps(&demo()).unwrap();
        assert_eq!(maps.region_maps.len(), 4);
        assert!(maps.region_maps.iter().all(|g| g.tiles.len() == 289));
    }

    #[test]
    fn no_world_data_fails() {
        let world = MemoryWorld::new();
        assert_eq!(world_map(&world), Err(RpcError::WorldNotLoaded));
        assert_eq!(world_map_center(&world), Err(RpcError::WorldNotLoaded));
        assert_eq!(region_maps(&world), Err(RpcError::WorldNotLoaded));
    }
}
