//! World-scale data: the macro-region map and per-region detail records.
//!
//! The world is a grid of macro-regions, each summarised by climate and
//! terrain attributes. A subset of macro-regions have detail records: a
//! 17x17 elevation/biome grid (16 tiles plus one shared boundary row and
//! column) and river edge arrays. Detail records are independent, so the
//! boundary row of one record does not necessarily agree with the first
//! row of its neighbour; stitching resolves that.

use serde::{Deserialize, Serialize};

/// Tiles per detail record edge, excluding the shared boundary.
pub const REGION_DETAIL_SIZE: usize = 16;

/// Width of a detail grid including its shared boundary.
pub const REGION_GRID_EDGE: usize = REGION_DETAIL_SIZE + 1;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A dense 2D array addressed by `(x, y)`, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with one value.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        let len = width.saturating_mul(height);
        Self {
            width,
            height,
            cells: vec![value; len],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid from a generator called with every `(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Width.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height.
    pub const fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)
    }

    /// Value at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    /// Mutable value at `(x, y)`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y).and_then(|i| self.cells.get_mut(i))
    }

    /// Values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}

// ---------------------------------------------------------------------------
// Macro-regions
// ---------------------------------------------------------------------------

/// Cloud cover of a macro-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Clouds {
    /// Front intensity.
    pub front: u8,
    /// Cumulus coverage.
    pub cumulus: u8,
    /// Cirrus present.
    pub cirrus: bool,
    /// Stratus coverage.
    pub stratus: u8,
    /// Fog thickness.
    pub fog: u8,
}

/// Attributes of one macro-region map entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RegionSummary {
    /// Elevation.
    pub elevation: i16,
    /// Rainfall.
    pub rainfall: i16,
    /// Vegetation.
    pub vegetation: i16,
    /// Temperature.
    pub temperature: i16,
    /// Evilness.
    pub evilness: i16,
    /// Drainage.
    pub drainage: i16,
    /// Volcanism.
    pub volcanism: i16,
    /// Savagery.
    pub savagery: i16,
    /// Salinity.
    pub salinity: i16,
    /// Cloud cover.
    pub clouds: Clouds,
    /// Index into [`WorldData::regions`], `None` if unassigned.
    pub region_id: Option<usize>,
}

/// Broad type of a named world region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Swamp.
    Swamp,
    /// Desert.
    Desert,
    /// Jungle.
    Jungle,
    /// Mountains.
    Mountains,
    /// Ocean.
    Ocean,
    /// Lake.
    Lake,
    /// Glacier.
    Glacier,
    /// Tundra.
    Tundra,
    /// Steppe.
    Steppe,
    /// Hills.
    Hills,
}

/// A named world region spanning many macro-region entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldRegion {
    /// Kind.
    pub kind: RegionKind,
    /// Lake surface elevation (meaningful for lakes).
    pub lake_surface: i32,
}

/// One side of a river crossing in a detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RiverSpan {
    /// Flow activity, zero for no river.
    pub active: i16,
    /// Water elevation.
    pub elevation: i16,
    /// Lower crossing bound.
    pub min: i16,
    /// Upper crossing bound.
    pub max: i16,
}

/// Detail record of one macro-region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionDetails {
    /// Macro-region column.
    pub pos_x: i32,
    /// Macro-region row.
    pub pos_y: i32,
    /// Elevation, 17x17.
    pub elevation: Grid<i16>,
    /// Biome code (numpad direction `1..=9` towards the governing macro-region), 17x17.
    pub biome: Grid<u8>,
    /// Rivers crossing horizontal tile edges, 16 wide by 17 tall.
    pub rivers_vertical: Grid<RiverSpan>,
    /// Rivers crossing vertical tile edges, 17 wide by 16 tall.
    pub rivers_horizontal: Grid<RiverSpan>,
}

impl RegionDetails {
    /// Empty record for a macro-region.
    pub fn new(pos_x: i32, pos_y: i32) -> Self {
        Self {
            pos_x,
            pos_y,
            elevation: Grid::filled(REGION_GRID_EDGE, REGION_GRID_EDGE, 0),
            biome: Grid::filled(REGION_GRID_EDGE, REGION_GRID_EDGE, 5),
            rivers_vertical: Grid::filled(REGION_DETAIL_SIZE, REGION_GRID_EDGE, RiverSpan::default()),
            rivers_horizontal: Grid::filled(
                REGION_GRID_EDGE,
                REGION_DETAIL_SIZE,
                RiverSpan::default(),
            ),
        }
    }
}

/// Everything known about the world at macro scale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorldData {
    /// Native name.
    pub name: String,
    /// English name.
    pub name_english: String,
    /// Whether the north edge is polar.
    pub north_pole: bool,
    /// Whether the south edge is polar.
    pub south_pole: bool,
    /// Macro-region map.
    pub region_map: Grid<RegionSummary>,
    /// Named regions.
    pub regions: Vec<WorldRegion>,
    /// Loaded detail records.
    pub details: Vec<RegionDetails>,
    /// Current year.
    pub cur_year: i32,
    /// Tick within the year.
    pub cur_year_tick: i32,
}

impl WorldData {
    /// Width in macro-regions.
    pub const fn width(&self) -> usize {
        self.region_map.width()
    }

    /// Height in macro-regions.
    pub const fn height(&self) -> usize {
        self.region_map.height()
    }

    /// Macro-region entry at signed coordinates.
    pub fn summary(&self, x: i32, y: i32) -> Option<&RegionSummary> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.region_map.get(x, y)
    }

    /// Detail record for a macro-region, if loaded.
    pub fn details_at(&self, x: i32, y: i32) -> Option<&RegionDetails> {
        self.details.iter().find(|d| d.pos_x == x && d.pos_y == y)
    }

    /// Named region governing a macro-region entry.
    pub fn region_of(&self, summary: &RegionSummary) -> Option<&WorldRegion> {
        summary.region_id.and_then(|id| self.regions.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_row_major() {
        let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(grid.get(2, 1), Some(&12));
        assert_eq!(grid.get(3, 0), None);
        let order: Vec<usize> = grid.iter().copied().collect();
        assert_eq!(order, vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn detail_record_shapes() {
        let d = RegionDetails::new(1, 2);
        assert_eq!(d.elevation.width(), 17);
        assert_eq!(d.rivers_vertical.width(), 16);
        assert_eq!(d.rivers_vertical.height(), 17);
        assert_eq!(d.rivers_horizontal.width(), 17);
        assert_eq!(d.rivers_horizontal.height(), 16);
    }

    #[test]
    fn summary_rejects_negative_coordinates() {
        let world = WorldData {
            region_map: Grid::filled(2, 2, RegionSummary::default()),
            ..WorldData::default()
        };
        assert!(world.summary(-1, 0).is_none());
        assert!(world.summary(1, 1).is_some());
    }
}
