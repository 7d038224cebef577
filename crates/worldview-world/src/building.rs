//! Buildings, their kinds, and kind-specific detail.
//!
//! A building's bounding box is inclusive on all sides. Kind-specific data
//! that affects how the building is presented (bridge direction, pump
//! intake, windmill orientation, well bucket depth) lives in
//! [`BuildingDetail`].

use worldview_types::{CELL_EDGE, CellCoord, MatPair, TileCoord};

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Building kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum BuildingKind {
    /// Chair.
    Chair,
    /// Bed.
    Bed,
    /// Table.
    Table,
    /// Coffin.
    Coffin,
    /// Farm plot.
    FarmPlot,
    /// Furnace.
    Furnace,
    /// Trade depot.
    TradeDepot,
    /// Shop.
    Shop,
    /// Door.
    Door,
    /// Floodgate.
    Floodgate,
    /// Box.
    Box,
    /// Weapon rack.
    Weaponrack,
    /// Armor stand.
    Armorstand,
    /// Workshop.
    Workshop,
    /// Cabinet.
    Cabinet,
    /// Statue.
    Statue,
    /// Glass window.
    WindowGlass,
    /// Gem window.
    WindowGem,
    /// Well.
    Well,
    /// Bridge.
    Bridge,
    /// Dirt road.
    RoadDirt,
    /// Paved road.
    RoadPaved,
    /// Siege engine.
    SiegeEngine,
    /// Trap.
    Trap,
    /// Animal trap.
    AnimalTrap,
    /// Support.
    Support,
    /// Archery target.
    ArcheryTarget,
    /// Chain.
    Chain,
    /// Cage.
    Cage,
    /// Stockpile.
    Stockpile,
    /// Activity zone.
    Civzone,
    /// Upright weapon.
    Weapon,
    /// Wagon.
    Wagon,
    /// Screw pump.
    ScrewPump,
    /// Construction in progress.
    Construction,
    /// Hatch.
    Hatch,
    /// Wall grate.
    GrateWall,
    /// Floor grate.
    GrateFloor,
    /// Vertical bars.
    BarsVertical,
    /// Floor bars.
    BarsFloor,
    /// Gear assembly.
    GearAssembly,
    /// Horizontal axle.
    AxleHorizontal,
    /// Vertical axle.
    AxleVertical,
    /// Water wheel.
    WaterWheel,
    /// Windmill.
    Windmill,
    /// Traction bench.
    TractionBench,
    /// Slab.
    Slab,
    /// Nest.
    Nest,
    /// Nest box.
    NestBox,
    /// Hive.
    Hive,
    /// Rollers.
    Rollers,
    /// Instrument.
    Instrument,
    /// Bookcase.
    Bookcase,
    /// Display furniture.
    DisplayFurniture,
}

impl BuildingKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 54] = [
        Self::Chair,
        Self::Bed,
        Self::Table,
        Self::Coffin,
        Self::FarmPlot,
        Self::Furnace,
        Self::TradeDepot,
        Self::Shop,
        Self::Door,
        Self::Floodgate,
        Self::Box,
        Self::Weaponrack,
        Self::Armorstand,
        Self::Workshop,
        Self::Cabinet,
        Self::Statue,
        Self::WindowGlass,
        Self::WindowGem,
        Self::Well,
        Self::Bridge,
        Self::RoadDirt,
        Self::RoadPaved,
        Self::SiegeEngine,
        Self::Trap,
        Self::AnimalTrap,
        Self::Support,
        Self::ArcheryTarget,
        Self::Chain,
        Self::Cage,
        Self::Stockpile,
        Self::Civzone,
        Self::Weapon,
        Self::Wagon,
        Self::ScrewPump,
        Self::Construction,
        Self::Hatch,
        Self::GrateWall,
        Self::GrateFloor,
        Self::BarsVertical,
        Self::BarsFloor,
        Self::GearAssembly,
        Self::AxleHorizontal,
        Self::AxleVertical,
        Self::WaterWheel,
        Self::Windmill,
        Self::TractionBench,
        Self::Slab,
        Self::Nest,
        Self::NestBox,
        Self::Hive,
        Self::Rollers,
        Self::Instrument,
        Self::Bookcase,
        Self::DisplayFurniture,
    ];

    /// Numeric kind code.
    pub fn code(self) -> i32 {
        Self::ALL
            .iter()
            .position(|&k| k == self)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Raw token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Chair => "Chair",
            Self::Bed => "Bed",
            Self::Table => "Table",
            Self::Coffin => "Coffin",
            Self::FarmPlot => "FarmPlot",
            Self::Furnace => "Furnace",
            Self::TradeDepot => "TradeDepot",
            Self::Shop => "Shop",
            Self::Door => "Door",
            Self::Floodgate => "Floodgate",
            Self::Box => "Box",
            Self::Weaponrack => "Weaponrack",
            Self::Armorstand => "Armorstand",
            Self::Workshop => "Workshop",
            Self::Cabinet => "Cabinet",
            Self::Statue => "Statue",
            Self::WindowGlass => "WindowGlass",
            Self::WindowGem => "WindowGem",
            Self::Well => "Well",
            Self::Bridge => "Bridge",
            Self::RoadDirt => "RoadDirt",
            Self::RoadPaved => "RoadPaved",
            Self::SiegeEngine => "SiegeEngine",
            Self::Trap => "Trap",
            Self::AnimalTrap => "AnimalTrap",
            Self::Support => "Support",
            Self::ArcheryTarget => "ArcheryTarget",
            Self::Chain => "Chain",
            Self::Cage => "Cage",
            Self::Stockpile => "Stockpile",
            Self::Civzone => "Civzone",
            Self::Weapon => "Weapon",
            Self::Wagon => "Wagon",
            Self::ScrewPump => "ScrewPump",
            Self::Construction => "Construction",
            Self::Hatch => "Hatch",
            Self::GrateWall => "GrateWall",
            Self::GrateFloor => "GrateFloor",
            Self::BarsVertical => "BarsVertical",
            Self::BarsFloor => "BarsFloor",
            Self::GearAssembly => "GearAssembly",
            Self::AxleHorizontal => "AxleHorizontal",
            Self::AxleVertical => "AxleVertical",
            Self::WaterWheel => "WaterWheel",
            Self::Windmill => "Windmill",
            Self::TractionBench => "TractionBench",
            Self::Slab => "Slab",
            Self::Nest => "Nest",
            Self::NestBox => "NestBox",
            Self::Hive => "Hive",
            Self::Rollers => "Rollers",
            Self::Instrument => "Instrument",
            Self::Bookcase => "Bookcase",
            Self::DisplayFurniture => "DisplayFurniture",
        }
    }

    /// Subtype tokens, indexed by subtype code. Empty for kinds without subtypes.
    pub const fn subtype_tokens(self) -> &'static [&'static str] {
        match self {
            Self::Furnace => FURNACE_SUBTYPES,
            Self::Workshop => WORKSHOP_SUBTYPES,
            Self::SiegeEngine => &["Catapult", "Ballista"],
            Self::Trap => &[
                "CageTrap",
                "StoneFallTrap",
                "WeaponTrap",
                "Lever",
                "PressurePlate",
                "TrackStop",
            ],
            Self::Civzone => &[
                "Home",
                "Depot",
                "Stockpile",
                "NobleQuarters",
                "MeadHall",
                "ThroneRoom",
                "ActivityZone",
                "Temple",
                "Library",
            ],
            Self::Construction => &[
                "Fortification",
                "Wall",
                "Floor",
                "UpStair",
                "DownStair",
                "UpDownStair",
                "Ramp",
                "TrackN",
                "TrackS",
                "TrackE",
                "TrackW",
            ],
            Self::Shop => &[
                "GeneralStore",
                "CraftsMarket",
                "ClothingShop",
                "ExoticClothingShop",
            ],
            _ => &[],
        }
    }

    /// Subtype code whose instances are described by custom raws, if any.
    pub fn custom_subtype(self) -> Option<i32> {
        let tokens = self.subtype_tokens();
        match self {
            Self::Furnace | Self::Workshop => tokens
                .iter()
                .position(|&t| t == "Custom")
                .and_then(|i| i32::try_from(i).ok()),
            _ => None,
        }
    }
}

const FURNACE_SUBTYPES: &[&str] = &[
    "WoodFurnace",
    "Smelter",
    "GlassFurnace",
    "Kiln",
    "MagmaSmelter",
    "MagmaGlassFurnace",
    "MagmaKiln",
    "Custom",
];

const WORKSHOP_SUBTYPES: &[&str] = &[
    "Carpenters",
    "Farmers",
    "Masons",
    "Craftsdwarfs",
    "Jewelers",
    "MetalsmithsForge",
    "MagmaForge",
    "Bowyers",
    "Mechanics",
    "Siege",
    "Butchers",
    "Leatherworks",
    "Tanners",
    "Clothiers",
    "Fishery",
    "Still",
    "Loom",
    "Quern",
    "Kennels",
    "Kitchen",
    "Ashery",
    "Dyers",
    "Millstone",
    "Custom",
    "Tool",
];

// ---------------------------------------------------------------------------
// Kind-specific detail
// ---------------------------------------------------------------------------

/// Which way a bridge raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeDirection {
    /// Retracts into the ground.
    Retracting,
    /// Raises to the west.
    Left,
    /// Raises to the east.
    Right,
    /// Raises to the north.
    Up,
    /// Raises to the south.
    Down,
}

/// Which way a siege engine aims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiegeFacing {
    /// West.
    Left,
    /// North.
    Up,
    /// East.
    Right,
    /// South.
    Down,
}

/// Which side a screw pump draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PumpDirection {
    /// Draws from the north.
    FromNorth,
    /// Draws from the east.
    FromEast,
    /// Draws from the south.
    FromSouth,
    /// Draws from the west.
    FromWest,
}

/// Kind-specific building data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildingDetail {
    /// Nothing kind-specific.
    #[default]
    None,
    /// Bridge raise direction.
    Bridge(BridgeDirection),
    /// Siege engine facing.
    SiegeEngine(SiegeFacing),
    /// Screw pump intake side.
    ScrewPump(PumpDirection),
    /// Axle or water wheel alignment.
    Axial {
        /// Aligned north-south.
        is_vertical: bool,
    },
    /// Windmill orientation vector.
    Windmill {
        /// East-west component.
        orient_x: i8,
        /// North-south component.
        orient_y: i8,
    },
    /// Well bucket depth.
    Well {
        /// Lowest level the bucket reaches.
        bucket_z: i32,
    },
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Extents of a room or zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Room {
    /// Corner tile column.
    pub x: i32,
    /// Corner tile row.
    pub y: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// Per-tile membership, row-major.
    pub extents: Vec<u8>,
}

/// A placed building.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Building {
    /// Building id.
    pub id: i32,
    /// Kind.
    pub kind: BuildingKind,
    /// Subtype code, `-1` for none.
    pub subtype: i32,
    /// Custom raw id, `-1` for none.
    pub custom: i32,
    /// Inclusive west edge.
    pub x1: i32,
    /// Inclusive north edge.
    pub y1: i32,
    /// Inclusive east edge.
    pub x2: i32,
    /// Inclusive south edge.
    pub y2: i32,
    /// Level.
    pub z: i32,
    /// Construction material.
    pub material: MatPair,
    /// Raw flag word.
    pub flags: u32,
    /// Whether the building defines a room.
    pub is_room: bool,
    /// Room or zone extents.
    pub room: Option<Room>,
    /// Kind-specific data.
    pub detail: BuildingDetail,
}

impl Building {
    /// Create a building covering `from..=to` on level `z`.
    pub const fn new(id: i32, kind: BuildingKind, from: (i32, i32), to: (i32, i32), z: i32) -> Self {
        Self {
            id,
            kind,
            subtype: -1,
            custom: -1,
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            z,
            material: MatPair::NONE,
            flags: 0,
            is_room: false,
            room: None,
            detail: BuildingDetail::None,
        }
    }

    /// Lowest level the building occupies (well buckets hang below).
    pub const fn z_min(&self) -> i32 {
        match self.detail {
            BuildingDetail::Well { bucket_z } if bucket_z < self.z => bucket_z,
            _ => self.z,
        }
    }

    /// `true` if the building's box overlaps the cell's 16x16 footprint at
    /// the cell's level.
    pub fn overlaps_cell(&self, cell: CellCoord) -> bool {
        let origin: TileCoord = cell.origin();
        let last_x = origin.x.saturating_add(CELL_EDGE.saturating_sub(1));
        let last_y = origin.y.saturating_add(CELL_EDGE.saturating_sub(1));
        let xy = self.x1 <= last_x && self.x2 >= origin.x && self.y1 <= last_y && self.y2 >= origin.y;
        xy && cell.z >= self.z_min() && cell.z <= self.z
    }

    /// Whether the building carries room extents on the wire.
    pub fn has_extents(&self) -> bool {
        self.is_room || matches!(self.kind, BuildingKind::Civzone | BuildingKind::Stockpile)
    }
}

/// A constructed tile and the item it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Construction {
    /// Tile.
    pub pos: TileCoord,
    /// Item type and subtype used.
    pub item: MatPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_table_order() {
        assert_eq!(BuildingKind::Chair.code(), 0);
        assert_eq!(BuildingKind::Workshop.code(), 13);
        assert_eq!(BuildingKind::Windmill.code(), 44);
        assert_eq!(BuildingKind::DisplayFurniture.code(), 53);
    }

    #[test]
    fn custom_subtypes() {
        assert_eq!(BuildingKind::Furnace.custom_subtype(), Some(7));
        assert_eq!(BuildingKind::Workshop.custom_subtype(), Some(23));
        assert_eq!(BuildingKind::Bridge.custom_subtype(), None);
    }

    #[test]
    fn overlap_respects_cell_edges() {
        let b = Building::new(0, BuildingKind::Table, (15, 15), (16, 16), 2);
        assert!(b.overlaps_cell(CellCoord::new(0, 0, 2)));
        assert!(b.overlaps_cell(CellCoord::new(1, 1, 2)));
        assert!(!b.overlaps_cell(CellCoord::new(2, 1, 2)));
        assert!(!b.overlaps_cell(CellCoord::new(0, 0, 1)));
    }

    #[test]
    fn well_reaches_down_to_bucket() {
        let mut well = Building::new(0, BuildingKind::Well, (5, 5), (5, 5), 10);
        well.detail = BuildingDetail::Well { bucket_z: 7 };
        assert_eq!(well.z_min(), 7);
        assert!(well.overlaps_cell(CellCoord::new(0, 0, 8)));
        assert!(!well.overlaps_cell(CellCoord::new(0, 0, 6)));
    }

    #[test]
    fn zones_always_have_extents() {
        let zone = Building::new(0, BuildingKind::Civzone, (0, 0), (3, 3), 0);
        assert!(zone.has_extents());
        let chair = Building::new(1, BuildingKind::Chair, (0, 0), (0, 0), 0);
        assert!(!chair.has_extents());
    }
}
