//! Per-cell change detection.
//!
//! [`DirtyTracker`] remembers, per cell, the checksum of the tile type,
//! designation, and occupancy buffers as they were when the cell was last
//! sent. Each `is_*_changed` call hashes the current buffer, compares it
//! with the stored mark, stores the new value, and reports whether it
//! differed. A cell with no stored mark is always reported as changed.
//!
//! The tracker must only be consulted for cells that are about to be
//! emitted; consulting it for a cell that is then not sent would mark the
//! cell as delivered.

use std::collections::BTreeMap;

use worldview_types::CellCoord;
use worldview_world::MapBlock;

use crate::checksum::fletcher16;

/// Checksum reserved for a cell that is not allocated.
pub const MISSING_CELL_CHECKSUM: u16 = 0;

/// Stored checksums of one cell. `None` means never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellMarks {
    /// Tile type buffer checksum.
    pub tiles: Option<u16>,
    /// Designation buffer checksum.
    pub designations: Option<u16>,
    /// Occupancy buffer checksum.
    pub occupancy: Option<u16>,
}

/// Which buffer of a cell a checksum covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Tiles,
    Designations,
    Occupancy,
}

impl Section {
    fn digest(self, block: Option<&MapBlock>) -> u16 {
        let Some(block) = block else {
            return MISSING_CELL_CHECKSUM;
        };
        match self {
            Self::Tiles => fletcher16(block.tiletype_bytes()),
            Self::Designations => fletcher16(block.designation_bytes()),
            Self::Occupancy => fletcher16(block.occupancy_bytes()),
        }
    }

    const fn slot(self, marks: &mut CellMarks) -> &mut Option<u16> {
        match self {
            Self::Tiles => &mut marks.tiles,
            Self::Designations => &mut marks.designations,
            Self::Occupancy => &mut marks.occupancy,
        }
    }
}

/// Last-sent checksums for every cell seen so far.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    marks: BTreeMap<CellCoord, CellMarks>,
}

impl DirtyTracker {
    /// An empty tracker: every cell counts as changed.
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, coord: CellCoord, block: Option<&MapBlock>, section: Section) -> bool {
        let digest = section.digest(block);
        let slot = section.slot(self.marks.entry(coord).or_default());
        if *slot == Some(digest) {
            return false;
        }
        *slot = Some(digest);
        true
    }

    /// Whether the cell's tile types changed since they were last sent.
    pub fn is_tile_data_changed(&mut self, coord: CellCoord, block: Option<&MapBlock>) -> bool {
        self.check(coord, block, Section::Tiles)
    }

    /// Whether the cell's designations changed since they were last sent.
    pub fn is_designation_data_changed(
        &mut self,
        coord: CellCoord,
        block: Option<&MapBlock>,
    ) -> bool {
        self.check(coord, block, Section::Designations)
    }

    /// Whether the cell's occupancy words changed since they were last sent.
    pub fn is_occupancy_changed(&mut self, coord: CellCoord, block: Option<&MapBlock>) -> bool {
        self.check(coord, block, Section::Occupancy)
    }

    /// Stored marks for a cell.
    pub fn marks(&self, coord: CellCoord) -> Option<&CellMarks> {
        self.marks.get(&coord)
    }

    /// Forget every mark so the next query resends everything.
    pub fn reset(&mut self) {
        self.marks.clear();
    }

    /// Number of cells with stored marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// `true` if no cell has been marked.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldview_world::{Designation, Occupancy};

    fn make_block() -> MapBlock {
        MapBlock::new(CellCoord::new(0, 0, 0), 2)
    }

    #[test]
    fn first_observation_is_changed() {
        let mut tracker = DirtyTracker::new();
        let block = make_block();
        let coord = block.coord();
        assert!(tracker.is_tile_data_changed(coord, Some(&block)));
        assert!(!tracker.is_tile_data_changed(coord, Some(&block)));
        assert!(tracker.is_designation_data_changed(coord, Some(&block)));
        assert!(!tracker.is_designation_data_changed(coord, Some(&block)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn mutation_is_detected_once() {
        let mut tracker = DirtyTracker::new();
        let mut block = make_block();
        let coord = block.coord();
        let _ = tracker.is_tile_data_changed(coord, Some(&block));
        assert!(block.set_tiletype(5, 5, 3).is_ok());
        assert!(tracker.is_tile_data_changed(coord, Some(&block)));
        assert!(!tracker.is_tile_data_changed(coord, Some(&block)));
    }

    #[test]
    fn sections_are_independent() {
        let mut tracker = DirtyTracker::new();
        let mut block = make_block();
        let coord = block.coord();
        let _ = tracker.is_tile_data_changed(coord, Some(&block));
        let _ = tracker.is_designation_data_changed(coord, Some(&block));
        let _ = tracker.is_occupancy_changed(coord, Some(&block));

        assert!(block.set_designation(0, 0, Designation::EMPTY.with_hidden(true)).is_ok());
        assert!(!tracker.is_tile_data_changed(coord, Some(&block)));
        assert!(tracker.is_designation_data_changed(coord, Some(&block)));
        assert!(!tracker.is_occupancy_changed(coord, Some(&block)));

        assert!(block.set_occupancy(1, 1, Occupancy::EMPTY.with_building(1)).is_ok());
        assert!(tracker.is_occupancy_changed(coord, Some(&block)));
    }

    #[test]
    fn missing_cell_hashes_to_zero() {
        let mut tracker = DirtyTracker::new();
        let coord = CellCoord::new(9, 9, 9);
        assert!(tracker.is_tile_data_changed(coord, None));
        assert_eq!(
            tracker.marks(coord).and_then(|m| m.tiles),
            Some(MISSING_CELL_CHECKSUM)
        );
        assert!(!tracker.is_tile_data_changed(coord, None));
    }

    #[test]
    fn reset_forces_resend() {
        let mut tracker = DirtyTracker::new();
        let block = make_block();
        let coord = block.coord();
        let _ = tracker.is_tile_data_changed(coord, Some(&block));
        tracker.reset();
        assert!(tracker.is_empty());
        assert!(tracker.is_tile_data_changed(coord, Some(&block)));
    }
}
