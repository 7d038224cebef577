//! Wire enumerations with stable, externally versioned codes.
//!
//! Clients index their own tables by these codes, so the numeric value of
//! an existing variant never changes. Every enum carries a "no value"
//! variant that internal values without a mapping collapse into.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Tile type vocabulary
// ---------------------------------------------------------------------------

/// Wire tile shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TiletypeShape {
    /// No shape known for this tile.
    NoShape,
    /// Open space.
    Empty,
    /// Walkable floor.
    Floor,
    /// Floor with a boulder.
    Boulder,
    /// Floor with pebbles.
    Pebbles,
    /// Solid wall.
    Wall,
    /// Wall with arrow slits.
    Fortification,
    /// Up staircase.
    StairUp,
    /// Down staircase.
    StairDown,
    /// Up/down staircase.
    StairUpdown,
    /// Ramp.
    Ramp,
    /// Open space above a ramp.
    RampTop,
    /// Bed of a brook.
    BrookBed,
    /// Surface of a brook.
    BrookTop,
    /// Young tree.
    Sapling,
    /// Shrub.
    Shrub,
}

impl TiletypeShape {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoShape => -1,
            Self::Empty => 0,
            Self::Floor => 1,
            Self::Boulder => 2,
            Self::Pebbles => 3,
            Self::Wall => 4,
            Self::Fortification => 5,
            Self::StairUp => 6,
            Self::StairDown => 7,
            Self::StairUpdown => 8,
            Self::Ramp => 9,
            Self::RampTop => 10,
            Self::BrookBed => 11,
            Self::BrookTop => 12,
            Self::Sapling => 14,
            Self::Shrub => 15,
        }
    }
}

/// Wire tile material class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TiletypeMaterial {
    /// No material class known for this tile.
    NoMaterial,
    /// Air.
    Air,
    /// Soil layer.
    Soil,
    /// Stone layer.
    Stone,
    /// Special feature stone.
    Feature,
    /// Obsidian and similar cooled lava.
    LavaStone,
    /// Mineral vein.
    Mineral,
    /// Ice.
    FrozenLiquid,
    /// Built construction.
    Construction,
    /// Light grass.
    GrassLight,
    /// Dark grass.
    GrassDark,
    /// Dry grass.
    GrassDry,
    /// Dead grass.
    GrassDead,
    /// Plant.
    Plant,
    /// Underworld rock.
    Hfs,
    /// Campfire.
    Campfire,
    /// Fire.
    Fire,
    /// Ashes.
    Ashes,
    /// Magma.
    Magma,
    /// Driftwood.
    Driftwood,
    /// Murky pool.
    Pool,
    /// Brook.
    Brook,
    /// River.
    River,
}

impl TiletypeMaterial {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoMaterial => -1,
            Self::Air => 0,
            Self::Soil => 1,
            Self::Stone => 2,
            Self::Feature => 3,
            Self::LavaStone => 4,
            Self::Mineral => 5,
            Self::FrozenLiquid => 6,
            Self::Construction => 7,
            Self::GrassLight => 8,
            Self::GrassDark => 9,
            Self::GrassDry => 10,
            Self::GrassDead => 11,
            Self::Plant => 12,
            Self::Hfs => 13,
            Self::Campfire => 14,
            Self::Fire => 15,
            Self::Ashes => 16,
            Self::Magma => 17,
            Self::Driftwood => 18,
            Self::Pool => 19,
            Self::Brook => 20,
            Self::River => 21,
        }
    }
}

/// Wire tile surface modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TiletypeSpecial {
    /// No special modifier known.
    NoSpecial,
    /// Plain surface.
    Normal,
    /// Source tile of a river.
    RiverSource,
    /// Waterfall.
    Waterfall,
    /// Smoothed stone.
    Smooth,
    /// Farm furrows.
    Furrowed,
    /// Wet surface.
    Wet,
    /// Dead vegetation.
    Dead,
    /// Lightly worn.
    #[serde(rename = "WORN_1")]
    Worn1,
    /// Worn.
    #[serde(rename = "WORN_2")]
    Worn2,
    /// Heavily worn.
    #[serde(rename = "WORN_3")]
    Worn3,
}

impl TiletypeSpecial {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoSpecial => -1,
            Self::Normal => 0,
            Self::RiverSource => 1,
            Self::Waterfall => 2,
            Self::Smooth => 3,
            Self::Furrowed => 4,
            Self::Wet => 5,
            Self::Dead => 6,
            Self::Worn1 => 7,
            Self::Worn2 => 8,
            Self::Worn3 => 9,
        }
    }
}

/// Wire graphical variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TiletypeVariant {
    /// No variant.
    #[serde(rename = "NO_VARIANT")]
    NoVariant,
    /// First variant.
    #[serde(rename = "VAR_1")]
    Var1,
    /// Second variant.
    #[serde(rename = "VAR_2")]
    Var2,
    /// Third variant.
    #[serde(rename = "VAR_3")]
    Var3,
    /// Fourth variant.
    #[serde(rename = "VAR_4")]
    Var4,
}

impl TiletypeVariant {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoVariant => -1,
            Self::Var1 => 0,
            Self::Var2 => 1,
            Self::Var3 => 2,
            Self::Var4 => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Designations and buildings
// ---------------------------------------------------------------------------

/// Wire dig designation for a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TileDigDesignation {
    /// Not designated.
    NoDig,
    /// Plain dig.
    DefaultDig,
    /// Carve an up/down staircase.
    UpDownStairDig,
    /// Dig a channel.
    ChannelDig,
    /// Carve a ramp.
    RampDig,
    /// Carve a down staircase.
    DownStairDig,
    /// Carve an up staircase.
    UpStairDig,
}

impl TileDigDesignation {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoDig => 0,
            Self::DefaultDig => 1,
            Self::UpDownStairDig => 2,
            Self::ChannelDig => 3,
            Self::RampDig => 4,
            Self::DownStairDig => 5,
            Self::UpStairDig => 6,
        }
    }
}

/// Cardinal direction a building faces or is aligned with.
///
/// Buildings without a meaningful direction omit the field entirely
/// rather than carrying a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum BuildingDirection {
    /// Towards lower y.
    North,
    /// Towards higher x.
    East,
    /// Towards higher y.
    South,
    /// Towards lower x.
    West,
}

impl BuildingDirection {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// World scale
// ---------------------------------------------------------------------------

/// Which edges of the world map are polar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum WorldPoles {
    /// No poles.
    #[default]
    NoPoles,
    /// Pole along the north edge.
    NorthPole,
    /// Pole along the south edge.
    SouthPole,
    /// Poles along both edges.
    BothPoles,
}

impl WorldPoles {
    /// Stable wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoPoles => 0,
            Self::NorthPole => 1,
            Self::SouthPole => 2,
            Self::BothPoles => 3,
        }
    }

    /// Combine per-edge flags into a pole value.
    pub const fn from_edges(north: bool, south: bool) -> Self {
        match (north, south) {
            (false, false) => Self::NoPoles,
            (true, false) => Self::NorthPole,
            (false, true) => Self::SouthPole,
            (true, true) => Self::BothPoles,
        }
    }
}
