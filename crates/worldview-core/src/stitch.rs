//! Seamless region grids from independent detail records.
//!
//! A detail record is 17x17 so that adjacent grids share an edge, but each
//! record is generated on its own and its last row and column do not match
//! the neighbour's first. Stitching replaces the boundary with the
//! neighbour's values when the neighbour is loaded, which makes the last
//! column of one grid equal to the first column of the grid to its east.
//!
//! Only elevation comes from the detail record itself. Climate attributes
//! are read from the macro-region the tile's biome code points at.

use worldview_types::{RegionDetailGrid, RegionTile, RiverEdge, RiverTile};
use worldview_world::region::{REGION_DETAIL_SIZE, REGION_GRID_EDGE, RegionKind, RiverSpan};
use worldview_world::{Grid, RegionDetails, RegionSummary, WorldData};

/// Water elevation reported for macro-regions that are not lakes.
pub const DRY_WATER_ELEVATION: i32 = 99;

/// Macro-region `(x, y)` shifted one step in a numpad direction.
///
/// `5` and unknown codes are the region itself; `8` is north (`y - 1`),
/// `2` south, `4` west, `6` east, and the corners combine them.
pub const fn shift_by_biome(x: i32, y: i32, biome: u8) -> (i32, i32) {
    let (dx, dy) = match biome {
        1 => (-1, 1),
        2 => (0, 1),
        3 => (1, 1),
        4 => (-1, 0),
        6 => (1, 0),
        7 => (-1, -1),
        8 => (0, -1),
        9 => (1, -1),
        _ => (0, 0),
    };
    (x.saturating_add(dx), y.saturating_add(dy))
}

fn clamp_axis(v: i32, len: usize) -> i32 {
    let last = i32::try_from(len.saturating_sub(1)).unwrap_or(i32::MAX);
    v.clamp(0, last.max(0))
}

/// Water surface of the macro-region an entry belongs to.
pub fn water_elevation(world: &WorldData, summary: &RegionSummary) -> i32 {
    world
        .region_of(summary)
        .filter(|region| region.kind == RegionKind::Lake)
        .map_or(DRY_WATER_ELEVATION, |region| region.lake_surface)
}

/// Climate attributes of the macro-region at `(x, y)`, clamped into the world.
pub fn macro_attributes(world: &WorldData, x: i32, y: i32) -> RegionTile {
    let cx = clamp_axis(x, world.width());
    let cy = clamp_axis(y, world.height());
    world.summary(cx, cy).map_or(
        RegionTile {
            water_elevation: DRY_WATER_ELEVATION,
            ..RegionTile::default()
        },
        |s| RegionTile {
            elevation: i32::from(s.elevation),
            water_elevation: water_elevation(world, s),
            rainfall: i32::from(s.rainfall),
            vegetation: i32::from(s.vegetation),
            temperature: i32::from(s.temperature),
            evilness: i32::from(s.evilness),
            drainage: i32::from(s.drainage),
            volcanism: i32::from(s.volcanism),
            savagery: i32::from(s.savagery),
            salinity: i32::from(s.salinity),
            river_tiles: RiverTile::default(),
        },
    )
}

fn river_edge(grid: &Grid<RiverSpan>, x: usize, y: usize) -> RiverEdge {
    grid.get(x, y).map_or_else(RiverEdge::default, |span| RiverEdge {
        active: i32::from(span.active),
        elevation: i32::from(span.elevation),
        min_pos: i32::from(span.min),
        max_pos: i32::from(span.max),
    })
}

/// Which record and position supply a tile of the stitched grid.
fn source<'a>(
    local: &'a RegionDetails,
    neighbours: Neighbours<'a>,
    x: usize,
    y: usize,
) -> (&'a RegionDetails, usize, usize) {
    let edge = REGION_DETAIL_SIZE;
    match (x == edge, y == edge, neighbours) {
        (true, true, Neighbours { south_east: Some(se), .. }) => (se, 0, 0),
        (true, _, Neighbours { east: Some(e), .. }) => (e, 0, y),
        (_, true, Neighbours { south: Some(s), .. }) => (s, x, 0),
        _ => (local, x, y),
    }
}

#[derive(Clone, Copy)]
struct Neighbours<'a> {
    east: Option<&'a RegionDetails>,
    south: Option<&'a RegionDetails>,
    south_east: Option<&'a RegionDetails>,
}

/// Stitch one detail record against its east, south, and south-east
/// neighbours as found by `lookup`.
pub fn stitch_region<'a>(
    world: &WorldData,
    details: &'a RegionDetails,
    lookup: impl Fn(i32, i32) -> Option<&'a RegionDetails>,
) -> RegionDetailGrid {
    let (px, py) = (details.pos_x, details.pos_y);
    let neighbours = Neighbours {
        east: lookup(px.saturating_add(1), py),
        south: lookup(px, py.saturating_add(1)),
        south_east: lookup(px.saturating_add(1), py.saturating_add(1)),
    };

    let mut tiles = Vec::with_capacity(REGION_GRID_EDGE.saturating_mul(REGION_GRID_EDGE));
    for y in 0..REGION_GRID_EDGE {
        for x in 0..REGION_GRID_EDGE {
            let (record, sx, sy) = source(details, neighbours, x, y);
            let biome = record.biome.get(sx, sy).copied().unwrap_or(5);
            let (mx, my) = shift_by_biome(record.pos_x, record.pos_y, biome);
            let mut tile = macro_attributes(world, mx, my);
            tile.elevation = record
                .elevation
                .get(sx, sy)
                .copied()
                .map_or(0, i32::from);
            tile.river_tiles = RiverTile {
                north: river_edge(&details.rivers_vertical, x, y),
                south: river_edge(&details.rivers_vertical, x, y.saturating_add(1)),
                west: river_edge(&details.rivers_horizontal, x, y),
                east: river_edge(&details.rivers_horizontal, x.saturating_add(1), y),
            };
            tiles.push(tile);
        }
    }

    let edge = i32::try_from(REGION_GRID_EDGE).unwrap_or(i32::MAX);
    RegionDetailGrid {
        map_x: px,
        map_y: py,
        name: format!("Region {px}, {py}"),
        width: edge,
        height: edge,
        tiles,
    }
}

/// Stitched grids for every loaded detail record, in load order.
pub fn stitch_all(world: &WorldData) -> Vec<RegionDetailGrid> {
    world
        .details
        .iter()
        .map(|d| stitch_region(world, d, |x, y| world.details_at(x, y)))
        .collect()
}
