//! Changed-cell streaming, plants, and checksum maintenance.

use std::time::Instant;

use tracing::debug;
use worldview_core::config::SyncConfig;
use worldview_core::{DirtyTracker, Sections, SpiralEnumerator, cell_record, fletcher16, points_per_level};
use worldview_types::{
    BlockList, CELL_EDGE, HashReport, MatPair, PlantDetail, PlantList, RegionQueryWindow,
};
use worldview_world::WorldAccess;

use crate::error::RpcError;

fn check_window(window: &RegionQueryWindow, sync: Option<&SyncConfig>) -> Result<(), RpcError> {
    if window.is_inverted() {
        return Err(RpcError::InvalidRegion(format!(
            "inverted window ({}, {}, {})..({}, {}, {})",
            window.min_x, window.min_y, window.min_z, window.max_x, window.max_y, window.max_z
        )));
    }
    if let Some(sync) = sync {
        let points = points_per_level(window);
        if points > sync.max_window_points {
            return Err(RpcError::InvalidRegion(format!(
                "window spans {points} points per level, limit is {}",
                sync.max_window_points
            )));
        }
    }
    Ok(())
}

/// Cells inside `window` whose tiles, designations, or building occupancy
/// changed since they were last sent, nearest the window center first.
///
/// Only cells that produce a record charge budget, so unchanged cells near
/// the center never starve the rest of the window. Sent sections are
/// recorded in `tracker`.
///
/// # Errors
///
/// [`RpcError::InvalidRegion`] if the window is inverted or its spiral is
/// larger than `sync.max_window_points`.
pub fn block_list<W: WorldAccess>(
    world: &W,
    tracker: &mut DirtyTracker,
    window: &RegionQueryWindow,
    sync: &SyncConfig,
) -> Result<BlockList, RpcError> {
    check_window(window, Some(sync))?;
    let origin = world.map().map(|m| m.origin).unwrap_or_default();

    let mut map_blocks = Vec::new();
    let mut visited: u32 = 0;
    let mut cells = SpiralEnumerator::new(*window, |c| world.cell_has_content(c));
    while let Some(coord) = cells.next_candidate() {
        visited = visited.saturating_add(1);
        let block = world.block(coord);
        let sections = Sections {
            tiles: tracker.is_tile_data_changed(coord, block),
            designations: tracker.is_designation_data_changed(coord, block),
            buildings: tracker.is_occupancy_changed(coord, block),
        };
        let Some(block) = block else {
            continue;
        };
        if !sections.is_empty() {
            map_blocks.push(cell_record(world, block, sections));
            cells.charge();
        }
    }

    debug!(
        visited,
        sent = map_blocks.len(),
        tracked = tracker.len(),
        "Block list assembled"
    );
    Ok(BlockList {
        map_blocks,
        map_x: origin.x,
        map_y: origin.y,
    })
}

/// Plants rooted inside `window`.
///
/// # Errors
///
/// [`RpcError::InvalidRegion`] if the window is inverted.
pub fn plant_list<W: WorldAccess>(
    world: &W,
    window: &RegionQueryWindow,
) -> Result<PlantList, RpcError> {
    check_window(window, None)?;
    let min_x = window.min_x.saturating_mul(CELL_EDGE);
    let max_x = window.max_x.saturating_mul(CELL_EDGE);
    let min_y = window.min_y.saturating_mul(CELL_EDGE);
    let max_y = window.max_y.saturating_mul(CELL_EDGE);
    let z_range = window.min_z..window.max_z;

    let plant_list = world
        .blocks()
        .filter(|b| {
            let c = b.coord();
            window.contains_xy(c.x, c.y) && z_range.contains(&c.z)
        })
        .flat_map(|b| b.plants().iter())
        .filter(|p| {
            (min_x..max_x).contains(&p.pos.x)
                && (min_y..max_y).contains(&p.pos.y)
                && z_range.contains(&p.pos.z)
        })
        .map(|p| PlantDetail {
            pos_x: p.pos.x,
            pos_y: p.pos.y,
            pos_z: p.pos.z,
            material: MatPair::new(-1, p.raw_index),
        })
        .collect();
    Ok(PlantList { plant_list })
}

/// Checksum every allocated cell's tile buffer and report the count and
/// time taken. The tracker is not touched.
pub fn check_hashes<W: WorldAccess>(world: &W) -> HashReport {
    let started = Instant::now();
    let mut blocks_hashed: u32 = 0;
    let mut digest: u16 = 0;
    for block in world.blocks() {
        digest ^= fletcher16(block.tiletype_bytes());
        blocks_hashed = blocks_hashed.saturating_add(1);
    }
    let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    debug!(blocks_hashed, elapsed_us, digest, "Map hashed");
    HashReport {
        blocks_hashed,
        elapsed_us,
    }
}

/// Forget every sent checksum so the next block list resends everything.
pub fn reset_hashes(tracker: &mut DirtyTracker) {
    let forgotten = tracker.len();
    tracker.reset();
    debug!(forgotten, "Map hashes reset");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::collections::BTreeSet;

    use worldview_types::{CellCoord, TileCoord};
    use worldview_world::{
        Building, BuildingKind, DemoParams, MapBlock, MapExtent, MemoryWorld, Occupancy, Plant,
        Raws, create_demo_world,
    };

    use super::*;

    /// A 16x16x1 map with `walls` cells filled with stone wall, the rest
    /// open space.
    fn sparse_world(walls: i32) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.load(
            MapExtent {
                size_x: 16,
                size_y: 16,
                size_z: 1,
                ..MapExtent::default()
            },
            Raws::default(),
        );
        let wall = world.tiletypes().id_of("StoneWall").unwrap();
        let open = world.tiletypes().id_of("OpenSpace").unwrap();
        for i in 0..16 * 16 {
            let coord = CellCoord::new(i % 16, i / 16, 0);
            let fill = if i < walls { wall } else { open };
            world.insert_block(MapBlock::new(coord, fill)).unwrap();
        }
        world
    }

    fn full_window() -> RegionQueryWindow {
        RegionQueryWindow::new(CellCoord::new(0, 0, 0), CellCoord::new(16, 16, 1))
    }

    #[test]
    fn scenario_sends_then_idles_then_resends() {
        let world = sparse_world(10);
        let mut tracker = DirtyTracker::new();
        let sync = SyncConfig::default();
        let window = full_window();

        let first = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert_eq!(first.map_blocks.len(), 10);
        assert!(first.map_blocks.iter().all(|b| !b.tiles.is_empty()));

        let second = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert!(second.map_blocks.is_empty());

        reset_hashes(&mut tracker);
        let third = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert_eq!(third.map_blocks.len(), 10);
    }

    #[test]
    fn only_changed_sections_are_filled() {
        let mut world = sparse_world(1);
        let mut tracker = DirtyTracker::new();
        let sync = SyncConfig::default();
        let window = full_window();
        let _ = block_list(&world, &mut tracker, &window, &sync).unwrap();

        world.set_tile(TileCoord::new(3, 3, 0), "StoneFloor1").unwrap();
        let list = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert_eq!(list.map_blocks.len(), 1);
        let record = list.map_blocks.first().unwrap();
        assert!(!record.tiles.is_empty());
        assert!(record.water.is_empty());
        assert!(record.buildings.is_empty());
    }

    #[test]
    fn new_building_resends_cell_without_tiles() {
        let mut world = sparse_world(1);
        let mut tracker = DirtyTracker::new();
        let sync = SyncConfig::default();
        let window = full_window();
        let _ = block_list(&world, &mut tracker, &window, &sync).unwrap();

        world
            .add_building(Building::new(3, BuildingKind::Table, (4, 4), (4, 4), 0))
            .unwrap();
        world
            .block_mut(CellCoord::new(0, 0, 0))
            .unwrap()
            .set_occupancy(4, 4, Occupancy::EMPTY.with_building(2))
            .unwrap();

        let list = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert_eq!(list.map_blocks.len(), 1);
        let record = list.map_blocks.first().unwrap();
        assert!(record.tiles.is_empty());
        assert_eq!(record.buildings.len(), 1);

        let idle = block_list(&world, &mut tracker, &window, &sync).unwrap();
        assert!(idle.map_blocks.is_empty());
    }

    #[test]
    fn explicit_budget_bounds_records() {
        let world = sparse_world(40);
        let mut tracker = DirtyTracker::new();
        let window = full_window().with_budget(7);
        let list = block_list(&world, &mut tracker, &window, &SyncConfig::default()).unwrap();
        assert_eq!(list.map_blocks.len(), 7);
    }

    #[test]
    fn small_budget_eventually_delivers_every_cell() {
        let world = sparse_world(256);
        let mut tracker = DirtyTracker::new();
        let sync = SyncConfig::default();
        let window = full_window().with_budget(7);

        let mut delivered = BTreeSet::new();
        for call in 0..40 {
            let list = block_list(&world, &mut tracker, &window, &sync).unwrap();
            if call == 0 {
                assert_eq!(list.map_blocks.len(), 7);
            }
            for record in &list.map_blocks {
                assert!(delivered.insert((record.map_x, record.map_y, record.map_z)));
            }
        }
        assert_eq!(delivered.len(), 256);
        assert_eq!(tracker.len(), 256);
    }

    #[test]
    fn rejects_inverted_and_oversized_windows() {
        let world = sparse_world(1);
        let mut tracker = DirtyTracker::new();
        let inverted = RegionQueryWindow::new(CellCoord::new(4, 0, 0), CellCoord::new(2, 4, 1));
        assert!(matches!(
            block_list(&world, &mut tracker, &inverted, &SyncConfig::default()),
            Err(RpcError::InvalidRegion(_))
        ));

        let tight = SyncConfig {
            max_window_points: 16,
        };
        assert!(matches!(
            block_list(&world, &mut tracker, &full_window(), &tight),
            Err(RpcError::InvalidRegion(_))
        ));
        assert!(tracker.is_empty());
    }

    #[test]
    fn demo_map_reports_origin() {
        let world = create_demo_world(&DemoParams::default()).unwrap();
        let mut tracker = DirtyTracker::new();
        let window = RegionQueryWindow::new(CellCoord::new(0, 0, 0), CellCoord::new(4, 4, 8));
        let list = block_list(&world, &mut tracker, &window, &SyncConfig::default()).unwrap();
        assert_eq!((list.map_x, list.map_y), (24, 24));
        assert!(!list.map_blocks.is_empty());
    }

    #[test]
    fn plants_are_filtered_by_window() {
        let mut world = sparse_world(0);
        for (pos, raw_index) in [
            (TileCoord::new(5, 5, 0), 0),
            (TileCoord::new(20, 5, 0), 1),
            (TileCoord::new(40, 40, 0), 0),
        ] {
            world
                .block_mut(pos.cell())
                .unwrap()
                .add_plant(Plant { pos, raw_index })
                .unwrap();
        }
        let window = RegionQueryWindow::new(CellCoord::new(0, 0, 0), CellCoord::new(2, 2, 1));
        let list = plant_list(&world, &window).unwrap();
        assert_eq!(list.plant_list.len(), 2);
        assert!(list.plant_list.iter().any(|p| p.material == MatPair::new(-1, 1)));
        assert!(list.plant_list.iter().all(|p| p.pos_x < 32 && p.pos_y < 32));
    }

    #[test]
    fn hashing_counts_blocks_and_leaves_tracker_alone() {
        let world = sparse_world(3);
        let report = check_hashes(&world);
        assert_eq!(report.blocks_hashed, 256);
    }
}
