//! Raw cell to wire record.
//!
//! A record is assembled from up to three sections. The tile section holds
//! tile codes and every per-tile material array; the designation section
//! holds liquid depths, flags, and dig orders; the building section lists
//! every building whose box overlaps the cell. The caller decides which
//! sections to include.

use worldview_types::{
    BuildingSnapshot, BuildingType, CELL_EDGE, MatPair, RoomExtents, TileDigDesignation,
    WireCellRecord,
};
use worldview_world::block::tile_index;
use worldview_world::raws::WATER_MATERIAL_TYPE;
use worldview_world::{
    Building, GameMode, LiquidType, MapBlock, TileMaterial, TileMaterials, WorldAccess,
};

use crate::direction::building_direction;
use crate::translate::{tile_codes, translate_dig};

const EDGE: usize = CELL_EDGE.unsigned_abs() as usize;

/// Local tile positions in wire order (row-major).
fn tile_positions() -> impl Iterator<Item = (usize, usize)> {
    (0..EDGE).flat_map(|y| (0..EDGE).map(move |x| (x, y)))
}

/// Which sections of a record to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sections {
    /// Tile codes and materials.
    pub tiles: bool,
    /// Liquids, flags, dig designations.
    pub designations: bool,
    /// Overlapping buildings.
    pub buildings: bool,
}

impl Sections {
    /// `true` if nothing would be filled.
    pub const fn is_empty(self) -> bool {
        !self.tiles && !self.designations && !self.buildings
    }
}

/// Wire snapshot of the building at `index` in the world's list.
pub fn building_snapshot(index: usize, building: &Building) -> BuildingSnapshot {
    let room = building.has_extents().then(|| {
        building
            .room
            .as_ref()
            .map_or_else(
                || RoomExtents {
                    pos_x: 0,
                    pos_y: 0,
                    width: 0,
                    height: 0,
                    extents: Vec::new(),
                },
                |r| RoomExtents {
                    pos_x: r.x,
                    pos_y: r.y,
                    width: r.width,
                    height: r.height,
                    extents: r.extents.clone(),
                },
            )
    });
    BuildingSnapshot {
        index: i32::try_from(index).unwrap_or(i32::MAX),
        pos_x_min: building.x1,
        pos_y_min: building.y1,
        pos_z_min: building.z_min(),
        pos_x_max: building.x2,
        pos_y_max: building.y2,
        pos_z_max: building.z,
        building_type: BuildingType {
            building_type: building.kind.code(),
            building_subtype: building.subtype,
            building_custom: building.custom,
        },
        material: building.material,
        building_flags: building.flags,
        is_room: building.is_room,
        room,
        direction: building_direction(building),
    }
}

/// Fill the tile section: codes, static/layer/vein/base materials, and
/// construction items.
pub fn copy_tiles<W: WorldAccess>(world: &W, block: &MapBlock, record: &mut WireCellRecord) {
    let table = world.tiletypes();
    for (x, y) in tile_positions() {
        let id = block.tiletype(x, y).unwrap_or_default();
        let mats = tile_index(x, y)
            .and_then(|i| block.materials().get(i))
            .copied()
            .unwrap_or(TileMaterials {
                static_mat: MatPair::NONE,
                base_mat: MatPair::NONE,
                layer: -1,
                vein: -1,
            });
        let class = table.get(id).map(|info| info.material);

        let static_mat = if class == Some(TileMaterial::FrozenLiquid) {
            MatPair::new(WATER_MATERIAL_TYPE, -1)
        } else {
            mats.static_mat
        };
        let construction = if class == Some(TileMaterial::Construction) {
            world
                .construction_at(block.tile_pos(x, y))
                .map_or(MatPair::NONE, |c| c.item)
        } else {
            MatPair::NONE
        };

        record.tiles.push(tile_codes(table, id));
        record.materials.push(static_mat);
        record.layer_materials.push(MatPair::new(0, mats.layer));
        record.vein_materials.push(MatPair::new(0, mats.vein));
        record.base_materials.push(mats.base_mat);
        record.construction_items.push(construction);
    }
}

/// Fill the designation section.
///
/// In adventure mode a tile reports hidden when it has no dig order or its
/// hidden bit is set, and dig orders are not reported.
pub fn copy_designations(mode: GameMode, block: &MapBlock, record: &mut WireCellRecord) {
    for (x, y) in tile_positions() {
        let d = block.designation(x, y).unwrap_or_default();
        let (magma, water) = match d.liquid_type() {
            LiquidType::Magma => (d.flow_size(), 0),
            LiquidType::Water => (0, d.flow_size()),
        };
        record.magma.push(magma);
        record.water.push(water);
        record.aquifer.push(d.water_table());
        record.light.push(d.light());
        record.outside.push(d.outside());
        record.subterranean.push(d.subterranean());
        record.water_salt.push(d.water_salt());
        record.water_stagnant.push(d.water_stagnant());
        match mode {
            GameMode::Adventure => {
                let undug = matches!(translate_dig(d.dig()), TileDigDesignation::NoDig);
                record.hidden.push(undug || d.hidden());
                record.tile_dig_designation.push(TileDigDesignation::NoDig);
            }
            GameMode::Fortress => {
                record.hidden.push(d.hidden());
                record.tile_dig_designation.push(translate_dig(d.dig()));
            }
        }
    }
}

/// Attach every building overlapping the cell.
pub fn copy_buildings<W: WorldAccess>(world: &W, block: &MapBlock, record: &mut WireCellRecord) {
    let coord = block.coord();
    record.buildings.extend(
        world
            .buildings()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.overlaps_cell(coord))
            .map(|(i, b)| building_snapshot(i, b)),
    );
}

/// Build a record for a cell with the requested sections.
pub fn cell_record<W: WorldAccess>(world: &W, block: &MapBlock, sections: Sections) -> WireCellRecord {
    let origin = block.coord().origin();
    let mut record = WireCellRecord {
        map_x: origin.x,
        map_y: origin.y,
        map_z: origin.z,
        ..WireCellRecord::default()
    };
    if sections.tiles {
        copy_tiles(world, block, &mut record);
    }
    if sections.designations {
        copy_designations(world.game_mode(), block, &mut record);
    }
    if sections.buildings {
        copy_buildings(world, block, &mut record);
    }
    record
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use worldview_types::{CellCoord, TILES_PER_CELL, TiletypeShape, TileCoord};
    use worldview_world::{
        BuildingKind, Construction, DigDesignation, Designation, MapExtent, MemoryWorld, Raws,
    };

    fn loaded_world() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.load(
            MapExtent {
                size_x: 2,
                size_y: 2,
                size_z: 2,
                ..MapExtent::default()
            },
            Raws::default(),
        );
        world
    }

    fn block_at(world: &mut MemoryWorld, coord: CellCoord, token: &str) {
        let id = world.tiletypes().id_of(token).unwrap();
        world.insert_block(MapBlock::new(coord, id)).unwrap();
    }

    #[test]
    fn tile_section_is_full_length() {
        let mut world = loaded_world();
        let coord = CellCoord::new(1, 0, 0);
        block_at(&mut world, coord, "StoneWall");
        let record = cell_record(
            &world,
            world.block(coord).unwrap(),
            Sections {
                tiles: true,
                ..Sections::default()
            },
        );
        assert_eq!((record.map_x, record.map_y, record.map_z), (16, 0, 0));
        assert_eq!(record.tiles.len(), TILES_PER_CELL);
        assert_eq!(record.construction_items.len(), TILES_PER_CELL);
        assert_eq!(record.tiles.first().unwrap().shape, TiletypeShape::Wall);
        assert!(!record.has_designations());
        assert!(record.buildings.is_empty());
    }

    #[test]
    fn frozen_liquid_reports_water() {
        let mut world = loaded_world();
        let coord = CellCoord::new(0, 0, 0);
        block_at(&mut world, coord, "FrozenFloor1");
        let record = cell_record(
            &world,
            world.block(coord).unwrap(),
            Sections {
                tiles: true,
                ..Sections::default()
            },
        );
        assert!(
            record
                .materials
                .iter()
                .all(|m| *m == MatPair::new(WATER_MATERIAL_TYPE, -1))
        );
    }

    #[test]
    fn construction_items_are_looked_up() {
        let mut world = loaded_world();
        let coord = CellCoord::new(0, 0, 0);
        block_at(&mut world, coord, "ConstructedFloor");
        world.add_construction(Construction {
            pos: TileCoord::new(1, 0, 0),
            item: MatPair::new(2, -1),
        });
        let record = cell_record(
            &world,
            world.block(coord).unwrap(),
            Sections {
                tiles: true,
                ..Sections::default()
            },
        );
        assert_eq!(record.construction_items.get(1), Some(&MatPair::new(2, -1)));
        assert_eq!(record.construction_items.first(), Some(&MatPair::NONE));
    }

    #[test]
    fn liquids_split_by_type() {
        let mut world = loaded_world();
        let coord = CellCoord::new(0, 0, 0);
        block_at(&mut world, coord, "OpenSpace");
        let block = world.block_mut(coord).unwrap();
        block
            .set_designation(0, 0, Designation::EMPTY.with_flow_size(3))
            .unwrap();
        block
            .set_designation(
                1,
                0,
                Designation::EMPTY
                    .with_flow_size(7)
                    .with_liquid_type(LiquidType::Magma),
            )
            .unwrap();
        let mut record = WireCellRecord::default();
        copy_designations(GameMode::Fortress, world.block(coord).unwrap(), &mut record);
        assert_eq!(record.water.first(), Some(&3));
        assert_eq!(record.magma.first(), Some(&0));
        assert_eq!(record.magma.get(1), Some(&7));
        assert_eq!(record.water.get(1), Some(&0));
    }

    #[test]
    fn adventure_mode_hides_undug_tiles() {
        let mut block = MapBlock::new(CellCoord::new(0, 0, 0), 1);
        block
            .set_designation(0, 0, Designation::EMPTY.with_dig(DigDesignation::Channel))
            .unwrap();

        let mut fortress = WireCellRecord::default();
        copy_designations(GameMode::Fortress, &block, &mut fortress);
        assert_eq!(fortress.hidden.first(), Some(&false));
        assert_eq!(
            fortress.tile_dig_designation.first(),
            Some(&TileDigDesignation::ChannelDig)
        );
        assert_eq!(fortress.hidden.get(1), Some(&false));

        let mut adventure = WireCellRecord::default();
        copy_designations(GameMode::Adventure, &block, &mut adventure);
        assert_eq!(adventure.hidden.first(), Some(&false));
        assert_eq!(adventure.hidden.get(1), Some(&true));
        assert!(
            adventure
                .tile_dig_designation
                .iter()
                .all(|d| *d == TileDigDesignation::NoDig)
        );
    }

    #[test]
    fn overlapping_buildings_are_attached() {
        let mut world = loaded_world();
        let coord = CellCoord::new(0, 0, 1);
        block_at(&mut world, coord, "StoneFloor1");
        world
            .add_building(Building::new(7, BuildingKind::Table, (3, 3), (3, 3), 1))
            .unwrap();
        world
            .add_building(Building::new(8, BuildingKind::Chair, (20, 3), (20, 3), 1))
            .unwrap();
        let mut well = Building::new(9, BuildingKind::Well, (5, 5), (5, 5), 1);
        well.detail = worldview_world::BuildingDetail::Well { bucket_z: 0 };
        world.add_building(well).unwrap();

        let mut record = WireCellRecord::default();
        copy_buildings(&world, world.block(coord).unwrap(), &mut record);
        let indices: Vec<i32> = record.buildings.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(record.buildings.last().unwrap().pos_z_min, 0);
    }

    #[test]
    fn zones_carry_extents() {
        let mut zone = Building::new(1, BuildingKind::Civzone, (0, 0), (1, 0), 0);
        zone.room = Some(worldview_world::Room {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
            extents: vec![1, 1],
        });
        let snap = building_snapshot(4, &zone);
        assert_eq!(snap.index, 4);
        assert_eq!(snap.room.map(|r| r.extents), Some(vec![1, 1]));
        let table = building_snapshot(0, &Building::new(2, BuildingKind::Table, (0, 0), (0, 0), 0));
        assert!(table.room.is_none());
        assert!(table.direction.is_none());
    }
}
