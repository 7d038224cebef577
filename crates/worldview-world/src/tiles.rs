//! Internal tile type code spaces and the tile type table.
//!
//! Every tile stores a 16-bit tile type id. The [`TiletypeTable`] resolves
//! an id to its shape, material class, surface special, variant, and
//! connection string. The code spaces here are the simulation's own and
//! grow over time, which is why they are `#[non_exhaustive]`: consumers
//! must map unknown values to a default.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Code spaces
// ---------------------------------------------------------------------------

/// Physical shape of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TileShape {
    /// Unset.
    None,
    /// Open space.
    Empty,
    /// Floor.
    Floor,
    /// Boulder on a floor.
    Boulder,
    /// Pebbles on a floor.
    Pebbles,
    /// Wall.
    Wall,
    /// Fortification.
    Fortification,
    /// Up staircase.
    StairUp,
    /// Down staircase.
    StairDown,
    /// Up/down staircase.
    StairUpDown,
    /// Ramp.
    Ramp,
    /// Space above a ramp.
    RampTop,
    /// Brook bed.
    BrookBed,
    /// Brook surface.
    BrookTop,
    /// Tree branch.
    Branch,
    /// Trunk/branch junction.
    TrunkBranch,
    /// Twig.
    Twig,
    /// Sapling.
    Sapling,
    /// Shrub.
    Shrub,
    /// Bottomless pit.
    EndlessPit,
}

/// Coarse shape class used by content tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeBasic {
    /// Unset.
    None,
    /// Nothing to stand on or in.
    Open,
    /// Something to stand on.
    Floor,
    /// Solid.
    Wall,
    /// Ramp.
    Ramp,
    /// Staircase.
    Stair,
}

impl TileShape {
    /// Coarse class of the shape.
    pub const fn basic(self) -> ShapeBasic {
        match self {
            Self::None => ShapeBasic::None,
            Self::Empty | Self::RampTop | Self::EndlessPit | Self::Twig => ShapeBasic::Open,
            Self::Floor
            | Self::Boulder
            | Self::Pebbles
            | Self::BrookBed
            | Self::BrookTop
            | Self::Branch
            | Self::Sapling
            | Self::Shrub => ShapeBasic::Floor,
            Self::Wall | Self::Fortification | Self::TrunkBranch => ShapeBasic::Wall,
            Self::StairUp | Self::StairDown | Self::StairUpDown => ShapeBasic::Stair,
            Self::Ramp => ShapeBasic::Ramp,
        }
    }
}

/// Material class of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TileMaterial {
    /// Unset.
    None,
    /// Air.
    Air,
    /// Soil.
    Soil,
    /// Stone.
    Stone,
    /// Feature stone.
    Feature,
    /// Cooled lava.
    LavaStone,
    /// Mineral.
    Mineral,
    /// Ice.
    FrozenLiquid,
    /// Construction.
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
    /// Pool.
    Pool,
    /// Brook.
    Brook,
    /// River.
    River,
    /// Tree root.
    Root,
    /// Tree body.
    Tree,
    /// Giant mushroom.
    Mushroom,
    /// Underworld gate.
    UnderworldGate,
}

/// Surface modifier of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TileSpecial {
    /// Unset.
    None,
    /// Plain.
    Normal,
    /// River source.
    RiverSource,
    /// Waterfall.
    Waterfall,
    /// Smoothed.
    Smooth,
    /// Furrowed.
    Furrowed,
    /// Wet.
    Wet,
    /// Dead.
    Dead,
    /// Lightly worn.
    Worn1,
    /// Worn.
    Worn2,
    /// Heavily worn.
    Worn3,
    /// Minecart track.
    Track,
    /// Smoothed and dead.
    SmoothDead,
}

/// Graphical variant of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TileVariant {
    /// Unset.
    None,
    /// First variant.
    Var1,
    /// Second variant.
    Var2,
    /// Third variant.
    Var3,
    /// Fourth variant.
    Var4,
}

// ---------------------------------------------------------------------------
// Tile type table
// ---------------------------------------------------------------------------

/// Attributes of one tile type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiletypeInfo {
    /// Raw token.
    pub token: String,
    /// Caption, possibly empty.
    pub caption: String,
    /// Shape.
    pub shape: TileShape,
    /// Material class.
    pub material: TileMaterial,
    /// Surface modifier.
    pub special: TileSpecial,
    /// Variant.
    pub variant: TileVariant,
    /// Connection string, possibly empty.
    pub direction: String,
}

/// Lookup from tile type id to [`TiletypeInfo`]. Ids are dense from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TiletypeTable {
    entries: Vec<TiletypeInfo>,
}

/// Row of the built-in table: token, caption, shape, material, special, variant, direction.
type Row = (
    &'static str,
    &'static str,
    TileShape,
    TileMaterial,
    TileSpecial,
    TileVariant,
    &'static str,
);

const STANDARD_ROWS: &[Row] = &[
    ("Void", "", TileShape::None, TileMaterial::None, TileSpecial::None, TileVariant::None, ""),
    ("OpenSpace", "open space", TileShape::Empty, TileMaterial::Air, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneWall", "stone wall", TileShape::Wall, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneFloor1", "stone floor", TileShape::Floor, TileMaterial::Stone, TileSpecial::Normal, TileVariant::Var1, ""),
    ("StoneFloor2", "stone floor", TileShape::Floor, TileMaterial::Stone, TileSpecial::Normal, TileVariant::Var2, ""),
    ("StoneFloorSmooth", "smooth stone floor", TileShape::Floor, TileMaterial::Stone, TileSpecial::Smooth, TileVariant::None, ""),
    ("StoneWallSmoothNSEW", "smooth stone wall", TileShape::Wall, TileMaterial::Stone, TileSpecial::Smooth, TileVariant::None, "NSEW"),
    ("StoneRamp", "stone ramp", TileShape::Ramp, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("RampTop", "ramp top", TileShape::RampTop, TileMaterial::Air, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneStairU", "stone up stair", TileShape::StairUp, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneStairD", "stone down stair", TileShape::StairDown, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneStairUD", "stone up/down stair", TileShape::StairUpDown, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneFortification", "stone fortification", TileShape::Fortification, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneBoulder", "stone boulder", TileShape::Boulder, TileMaterial::Stone, TileSpecial::Normal, TileVariant::None, ""),
    ("StonePebbles1", "stone pebbles", TileShape::Pebbles, TileMaterial::Stone, TileSpecial::Normal, TileVariant::Var1, ""),
    ("SoilWall", "soil wall", TileShape::Wall, TileMaterial::Soil, TileSpecial::Normal, TileVariant::None, ""),
    ("SoilFloor1", "soil floor", TileShape::Floor, TileMaterial::Soil, TileSpecial::Normal, TileVariant::Var1, ""),
    ("SoilFloorFurrowed", "furrowed soil", TileShape::Floor, TileMaterial::Soil, TileSpecial::Furrowed, TileVariant::None, ""),
    ("SoilFloorWet", "wet soil", TileShape::Floor, TileMaterial::Soil, TileSpecial::Wet, TileVariant::None, ""),
    ("GrassLightFloor1", "grass", TileShape::Floor, TileMaterial::GrassLight, TileSpecial::Normal, TileVariant::Var1, ""),
    ("GrassDarkFloor2", "grass", TileShape::Floor, TileMaterial::GrassDark, TileSpecial::Normal, TileVariant::Var2, ""),
    ("GrassDryFloor3", "dry grass", TileShape::Floor, TileMaterial::GrassDry, TileSpecial::Normal, TileVariant::Var3, ""),
    ("GrassDeadFloor4", "dead grass", TileShape::Floor, TileMaterial::GrassDead, TileSpecial::Dead, TileVariant::Var4, ""),
    ("Shrub", "shrub", TileShape::Shrub, TileMaterial::Plant, TileSpecial::Normal, TileVariant::None, ""),
    ("Sapling", "sapling", TileShape::Sapling, TileMaterial::Plant, TileSpecial::Normal, TileVariant::None, ""),
    ("MineralWall", "mineral vein", TileShape::Wall, TileMaterial::Mineral, TileSpecial::Normal, TileVariant::None, ""),
    ("FeatureWall", "feature stone wall", TileShape::Wall, TileMaterial::Feature, TileSpecial::Normal, TileVariant::None, ""),
    ("LavaWall", "obsidian wall", TileShape::Wall, TileMaterial::LavaStone, TileSpecial::Normal, TileVariant::None, ""),
    ("FrozenFloor1", "ice floor", TileShape::Floor, TileMaterial::FrozenLiquid, TileSpecial::Normal, TileVariant::Var1, ""),
    ("FrozenWall", "ice wall", TileShape::Wall, TileMaterial::FrozenLiquid, TileSpecial::Normal, TileVariant::None, ""),
    ("ConstructedFloor", "constructed floor", TileShape::Floor, TileMaterial::Construction, TileSpecial::Normal, TileVariant::None, ""),
    ("ConstructedWallNSEW", "constructed wall", TileShape::Wall, TileMaterial::Construction, TileSpecial::Normal, TileVariant::None, "NSEW"),
    ("ConstructedFloorTrackEW", "track", TileShape::Floor, TileMaterial::Construction, TileSpecial::Track, TileVariant::None, "EW"),
    ("MurkyPool", "murky pool", TileShape::Floor, TileMaterial::Pool, TileSpecial::Normal, TileVariant::None, ""),
    ("BrookBed", "brook bed", TileShape::BrookBed, TileMaterial::Brook, TileSpecial::Normal, TileVariant::None, ""),
    ("BrookTop", "brook", TileShape::BrookTop, TileMaterial::Brook, TileSpecial::Normal, TileVariant::None, ""),
    ("RiverSource", "river source", TileShape::Floor, TileMaterial::River, TileSpecial::RiverSource, TileVariant::None, ""),
    ("Waterfall", "waterfall", TileShape::Floor, TileMaterial::River, TileSpecial::Waterfall, TileVariant::None, ""),
    ("Ashes1", "ashes", TileShape::Floor, TileMaterial::Ashes, TileSpecial::Normal, TileVariant::Var1, ""),
    ("Fire", "fire", TileShape::Floor, TileMaterial::Fire, TileSpecial::Normal, TileVariant::None, ""),
    ("Campfire", "campfire", TileShape::Floor, TileMaterial::Campfire, TileSpecial::Normal, TileVariant::None, ""),
    ("Driftwood", "driftwood", TileShape::Floor, TileMaterial::Driftwood, TileSpecial::Normal, TileVariant::None, ""),
    ("MagmaFlow", "magma", TileShape::Floor, TileMaterial::Magma, TileSpecial::Normal, TileVariant::None, ""),
    ("UnderworldFloor", "underworld floor", TileShape::Floor, TileMaterial::Hfs, TileSpecial::Normal, TileVariant::None, ""),
    ("EndlessPit", "endless pit", TileShape::EndlessPit, TileMaterial::Air, TileSpecial::Normal, TileVariant::None, ""),
    ("TreeBranches", "tree branches", TileShape::Branch, TileMaterial::Tree, TileSpecial::Normal, TileVariant::None, "NSEW"),
    ("TreeTrunkBranch", "tree trunk", TileShape::TrunkBranch, TileMaterial::Tree, TileSpecial::Normal, TileVariant::None, ""),
    ("TreeTwigs", "tree twigs", TileShape::Twig, TileMaterial::Tree, TileSpecial::Normal, TileVariant::None, ""),
    ("TreeRoots", "tree roots", TileShape::Wall, TileMaterial::Root, TileSpecial::Normal, TileVariant::None, ""),
    ("MushroomCap", "mushroom cap", TileShape::Floor, TileMaterial::Mushroom, TileSpecial::Normal, TileVariant::None, ""),
    ("UnderworldGate", "underworld gate", TileShape::StairDown, TileMaterial::UnderworldGate, TileSpecial::Normal, TileVariant::None, ""),
    ("StoneFloorWorn3", "worn stone floor", TileShape::Floor, TileMaterial::Stone, TileSpecial::Worn3, TileVariant::None, ""),
    ("StoneFloorSmoothDead", "smooth stone floor", TileShape::Floor, TileMaterial::Stone, TileSpecial::SmoothDead, TileVariant::None, ""),
];

impl TiletypeTable {
    /// Build a table from explicit entries; ids are positions.
    pub const fn new(entries: Vec<TiletypeInfo>) -> Self {
        Self { entries }
    }

    /// The built-in tile type set used by the demo world and tests.
    pub fn standard() -> Self {
        let entries = STANDARD_ROWS
            .iter()
            .map(
                |&(token, caption, shape, material, special, variant, direction)| TiletypeInfo {
                    token: token.to_owned(),
                    caption: caption.to_owned(),
                    shape,
                    material,
                    special,
                    variant,
                    direction: direction.to_owned(),
                },
            )
            .collect();
        Self { entries }
    }

    /// Resolve an id.
    pub fn get(&self, id: u16) -> Option<&TiletypeInfo> {
        self.entries.get(usize::from(id))
    }

    /// Find the id of a token.
    pub fn id_of(&self, token: &str) -> Option<u16> {
        self.entries
            .iter()
            .position(|t| t.token == token)
            .and_then(|i| u16::try_from(i).ok())
    }

    /// Iterate `(id, info)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &TiletypeInfo)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, t)| u16::try_from(i).ok().map(|id| (id, t)))
    }

    /// Number of tile types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_starts_with_void() {
        let table = TiletypeTable::standard();
        let void = table.get(0);
        assert!(void.is_some());
        assert_eq!(void.map(|t| t.shape), Some(TileShape::None));
    }

    #[test]
    fn tokens_are_unique() {
        let table = TiletypeTable::standard();
        for (id, info) in table.iter() {
            assert_eq!(table.id_of(&info.token), Some(id));
        }
    }

    #[test]
    fn open_shapes() {
        assert_eq!(TileShape::Empty.basic(), ShapeBasic::Open);
        assert_eq!(TileShape::EndlessPit.basic(), ShapeBasic::Open);
        assert_eq!(TileShape::RampTop.basic(), ShapeBasic::Open);
        assert_eq!(TileShape::Shrub.basic(), ShapeBasic::Floor);
        assert_eq!(TileShape::StairUpDown.basic(), ShapeBasic::Stair);
    }

    #[test]
    fn unknown_id_is_none() {
        let table = TiletypeTable::standard();
        assert!(table.get(u16::MAX).is_none());
    }
}
