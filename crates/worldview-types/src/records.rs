//! Wire records returned by the query operations.
//!
//! Field names follow the external protocol so existing clients can map
//! them one-to-one. Per-tile arrays are row-major (`y * 16 + x`) with 256
//! entries when present and empty when the section was not included.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    BuildingDirection, TileDigDesignation, TiletypeMaterial, TiletypeShape, TiletypeSpecial,
    TiletypeVariant, WorldPoles,
};

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// A `(type, index)` pair naming a material, item, or race/caste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatPair {
    /// Material (or item) type.
    pub mat_type: i32,
    /// Index within the type.
    pub mat_index: i32,
}

impl MatPair {
    /// The "nothing" pair.
    pub const NONE: Self = Self::new(-1, -1);

    /// Create a pair.
    pub const fn new(mat_type: i32, mat_index: i32) -> Self {
        Self {
            mat_type,
            mat_index,
        }
    }
}

impl Default for MatPair {
    fn default() -> Self {
        Self::NONE
    }
}

/// An RGB colour in `0..=255` per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColorDefinition {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

/// Empty acknowledgement payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmptyMessage {}

// ---------------------------------------------------------------------------
// Static definitions
// ---------------------------------------------------------------------------

/// One material, item type, or growth definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MaterialDefinition {
    /// Identifying pair.
    pub mat_pair: MatPair,
    /// Raw token, e.g. `INORGANIC:GRANITE`.
    pub id: String,
    /// Display name, if known.
    pub name: Option<String>,
    /// Colour at room temperature, if the state colour is defined.
    pub state_color: Option<ColorDefinition>,
}

/// Response of the material, item, and growth list operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MaterialList {
    /// All definitions, in enumeration order.
    pub material_list: Vec<MaterialDefinition>,
}

/// One tile type, with its translated classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TiletypeDefinition {
    /// Tile type id, as carried in [`TileCodes::tiletype`].
    pub id: u16,
    /// Raw token.
    pub name: String,
    /// Human readable caption, if non-empty.
    pub caption: Option<String>,
    /// Translated shape.
    pub shape: TiletypeShape,
    /// Translated surface modifier.
    pub special: TiletypeSpecial,
    /// Translated material class.
    pub material: TiletypeMaterial,
    /// Translated variant.
    pub variant: TiletypeVariant,
    /// Connection string, e.g. `NSEW`, empty when none.
    pub direction: String,
}

/// Response of `GetTiletypeList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TiletypeList {
    /// All tile types, ordered by id.
    pub tiletype_list: Vec<TiletypeDefinition>,
}

/// The `(type, subtype, custom)` triple identifying a building kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingType {
    /// Building kind code.
    pub building_type: i32,
    /// Subtype code, `-1` for none.
    pub building_subtype: i32,
    /// Custom raw id, `-1` for none.
    pub building_custom: i32,
}

/// One building definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingDefinition {
    /// Identifying triple.
    pub building_type: BuildingType,
    /// Token, e.g. `Workshop_Carpenters` or a custom raw code.
    pub id: String,
    /// Display name, when it differs from the token.
    pub name: Option<String>,
}

/// Response of `GetBuildingDefList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingList {
    /// All definitions.
    pub building_list: Vec<BuildingDefinition>,
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// Per-tile tile type with its translated classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileCodes {
    /// Raw tile type id.
    pub tiletype: u16,
    /// Translated shape.
    pub shape: TiletypeShape,
    /// Translated material class.
    pub material: TiletypeMaterial,
    /// Translated surface modifier.
    pub special: TiletypeSpecial,
    /// Translated variant.
    pub variant: TiletypeVariant,
}

/// Extents of a room or zone attached to a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoomExtents {
    /// Tile column of the extents' corner.
    pub pos_x: i32,
    /// Tile row of the extents' corner.
    pub pos_y: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// Per-tile membership, row-major, `width * height` entries.
    pub extents: Vec<u8>,
}

/// A building overlapping a transmitted cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingSnapshot {
    /// Position of the building in the world's building list.
    pub index: i32,
    /// Inclusive west edge.
    pub pos_x_min: i32,
    /// Inclusive north edge.
    pub pos_y_min: i32,
    /// Lowest level (well buckets reach below the building).
    pub pos_z_min: i32,
    /// Inclusive east edge.
    pub pos_x_max: i32,
    /// Inclusive south edge.
    pub pos_y_max: i32,
    /// Highest level.
    pub pos_z_max: i32,
    /// Kind triple.
    pub building_type: BuildingType,
    /// Construction material.
    pub material: MatPair,
    /// Raw flag word.
    pub building_flags: u32,
    /// Whether the building defines a room.
    pub is_room: bool,
    /// Room or zone extents, if any.
    pub room: Option<RoomExtents>,
    /// Facing or alignment, omitted for kinds without one.
    pub direction: Option<BuildingDirection>,
}

/// One transmitted cell.
///
/// Tile sections (`tiles` and the material arrays) are present when the
/// cell's tile checksum changed. Designation sections are present when the
/// designation checksum changed. Buildings overlapping the cell are
/// attached to every emitted record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WireCellRecord {
    /// Tile column of the cell origin.
    pub map_x: i32,
    /// Tile row of the cell origin.
    pub map_y: i32,
    /// Level.
    pub map_z: i32,

    /// Tile types and their translated codes.
    pub tiles: Vec<TileCodes>,
    /// Effective tile material.
    pub materials: Vec<MatPair>,
    /// Geological layer material.
    pub layer_materials: Vec<MatPair>,
    /// Vein material.
    pub vein_materials: Vec<MatPair>,
    /// Base material before constructions and veins.
    pub base_materials: Vec<MatPair>,
    /// Item a constructed tile was built from, `(-1, -1)` otherwise.
    pub construction_items: Vec<MatPair>,

    /// Magma depth `0..=7`.
    pub magma: Vec<u8>,
    /// Water depth `0..=7`.
    pub water: Vec<u8>,
    /// Whether the tile is unrevealed.
    pub hidden: Vec<bool>,
    /// Whether the tile is lit.
    pub light: Vec<bool>,
    /// Whether the tile is underground.
    pub subterranean: Vec<bool>,
    /// Whether the tile is outside.
    pub outside: Vec<bool>,
    /// Whether the tile is part of an aquifer.
    pub aquifer: Vec<bool>,
    /// Whether the water on the tile is stagnant.
    pub water_stagnant: Vec<bool>,
    /// Whether the water on the tile is salty.
    pub water_salt: Vec<bool>,
    /// Dig designation.
    pub tile_dig_designation: Vec<TileDigDesignation>,

    /// Buildings overlapping the cell.
    pub buildings: Vec<BuildingSnapshot>,
}

impl WireCellRecord {
    /// `true` if the tile sections are populated.
    pub fn has_tiles(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// `true` if the designation sections are populated.
    pub fn has_designations(&self) -> bool {
        !self.hidden.is_empty()
    }
}

/// Response of `GetBlockList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BlockList {
    /// Changed cells, in enumeration order.
    pub map_blocks: Vec<WireCellRecord>,
    /// Map offset (cell column) within the world.
    pub map_x: i32,
    /// Map offset (cell row) within the world.
    pub map_y: i32,
}

/// One plant position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantDetail {
    /// Tile column.
    pub pos_x: i32,
    /// Tile row.
    pub pos_y: i32,
    /// Level.
    pub pos_z: i32,
    /// Plant raw, as `(-1, plant index)`.
    pub material: MatPair,
}

/// Response of `GetPlantList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantList {
    /// Plants inside the window.
    pub plant_list: Vec<PlantDetail>,
}

/// Response of `CheckHashes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HashReport {
    /// Number of cells checksummed.
    pub blocks_hashed: u32,
    /// Wall time spent, in microseconds.
    pub elapsed_us: u64,
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Current and base body dimensions of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SizeInfo {
    /// Current size.
    pub size_cur: i32,
    /// Base size.
    pub size_base: i32,
    /// Current area.
    pub area_cur: i32,
    /// Base area.
    pub area_base: i32,
    /// Current length.
    pub length_cur: i32,
    /// Base length.
    pub length_base: i32,
}

/// Appearance modifiers of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UnitAppearance {
    /// Whole-body modifier values.
    pub body_modifiers: Vec<i32>,
    /// Body-part modifier values.
    pub bp_modifiers: Vec<i32>,
    /// Size modifier.
    pub size_modifier: i32,
    /// Colour modifier selections.
    pub colors: Vec<i32>,
}

/// One unit on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UnitSnapshot {
    /// Unit id.
    pub id: i32,
    /// Tile column.
    pub pos_x: i32,
    /// Tile row.
    pub pos_y: i32,
    /// Level.
    pub pos_z: i32,
    /// Race and caste, as `(race, caste)`.
    pub race: MatPair,
    /// Colour of the unit's profession.
    pub profession_color: ColorDefinition,
    /// First flag word.
    pub flags1: u32,
    /// Second flag word.
    pub flags2: u32,
    /// Third flag word.
    pub flags3: u32,
    /// Whether the unit is on active military duty.
    pub is_soldier: bool,
    /// Body dimensions.
    pub size_info: SizeInfo,
    /// Visible name, if the unit has one.
    pub name: Option<String>,
    /// Appearance modifiers.
    pub appearance: UnitAppearance,
}

/// Response of `GetUnitList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UnitList {
    /// All active units.
    pub creature_list: Vec<UnitSnapshot>,
}

// ---------------------------------------------------------------------------
// View and map metadata
// ---------------------------------------------------------------------------

/// Response of `GetViewInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ViewInfo {
    /// View corner tile column.
    pub view_pos_x: i32,
    /// View corner tile row.
    pub view_pos_y: i32,
    /// View level.
    pub view_pos_z: i32,
    /// View width in tiles.
    pub view_size_x: i32,
    /// View height in tiles.
    pub view_size_y: i32,
    /// Cursor tile column, `-30000` when hidden.
    pub cursor_pos_x: i32,
    /// Cursor tile row.
    pub cursor_pos_y: i32,
    /// Cursor level.
    pub cursor_pos_z: i32,
    /// Followed unit id, `-1` for none.
    pub follow_unit_id: i32,
    /// Followed item id, `-1` for none.
    pub follow_item_id: i32,
}

/// Response of `GetMapInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MapInfo {
    /// Map width in cells.
    pub block_size_x: i32,
    /// Map height in cells.
    pub block_size_y: i32,
    /// Map depth in levels.
    pub block_size_z: i32,
    /// Map offset within the world (cells).
    pub block_pos_x: i32,
    /// Map offset within the world (cells).
    pub block_pos_y: i32,
    /// Map offset within the world (levels).
    pub block_pos_z: i32,
    /// World name in the native language.
    pub world_name: String,
    /// World name in English.
    pub world_name_english: String,
    /// Save folder name.
    pub save_name: String,
}

// ---------------------------------------------------------------------------
// World scale
// ---------------------------------------------------------------------------

/// Cloud cover of one macro-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CloudCover {
    /// Weather front intensity.
    pub front: i32,
    /// Cumulus coverage.
    pub cumulus: i32,
    /// Whether cirrus clouds are present.
    pub cirrus: bool,
    /// Stratus coverage.
    pub stratus: i32,
    /// Fog thickness.
    pub fog: i32,
}

/// Response of `GetWorldMap` and `GetWorldMapCenter`.
///
/// The per-region arrays are row-major over `world_width * world_height`
/// entries and empty for the center-only variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldMap {
    /// Width in macro-regions.
    pub world_width: i32,
    /// Height in macro-regions.
    pub world_height: i32,
    /// World name in the native language.
    pub name: String,
    /// World name in English.
    pub name_english: String,
    /// Elevation.
    pub elevation: Vec<i32>,
    /// Rainfall.
    pub rainfall: Vec<i32>,
    /// Vegetation.
    pub vegetation: Vec<i32>,
    /// Temperature.
    pub temperature: Vec<i32>,
    /// Evilness.
    pub evilness: Vec<i32>,
    /// Drainage.
    pub drainage: Vec<i32>,
    /// Volcanism.
    pub volcanism: Vec<i32>,
    /// Savagery.
    pub savagery: Vec<i32>,
    /// Salinity.
    pub salinity: Vec<i32>,
    /// Cloud cover.
    pub clouds: Vec<CloudCover>,
    /// Water surface elevation (lake surface, otherwise `99`).
    pub water_elevation: Vec<i32>,
    /// Polar edges.
    pub world_poles: WorldPoles,
    /// Center of interest, tile column in world tiles.
    pub center_x: i32,
    /// Center of interest, tile row in world tiles.
    pub center_y: i32,
    /// Center of interest, level.
    pub center_z: i32,
    /// Current year.
    pub cur_year: i32,
    /// Tick within the current year.
    pub cur_year_tick: i32,
}

/// One side of a region tile's river data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RiverEdge {
    /// Flow activity, `0` when no river crosses this side.
    pub active: i32,
    /// Water elevation along the side.
    pub elevation: i32,
    /// Lower bound of the river across the side.
    pub min_pos: i32,
    /// Upper bound of the river across the side.
    pub max_pos: i32,
}

/// River data on the four sides of a region tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RiverTile {
    /// North side.
    pub north: RiverEdge,
    /// South side.
    pub south: RiverEdge,
    /// East side.
    pub east: RiverEdge,
    /// West side.
    pub west: RiverEdge,
}

/// One tile of a stitched region grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionTile {
    /// Detailed elevation.
    pub elevation: i32,
    /// Water surface elevation.
    pub water_elevation: i32,
    /// Rainfall of the governing macro-region.
    pub rainfall: i32,
    /// Vegetation of the governing macro-region.
    pub vegetation: i32,
    /// Temperature of the governing macro-region.
    pub temperature: i32,
    /// Evilness of the governing macro-region.
    pub evilness: i32,
    /// Drainage of the governing macro-region.
    pub drainage: i32,
    /// Volcanism of the governing macro-region.
    pub volcanism: i32,
    /// Savagery of the governing macro-region.
    pub savagery: i32,
    /// Salinity of the governing macro-region.
    pub salinity: i32,
    /// River sides.
    pub river_tiles: RiverTile,
}

/// A seamless `(N+1) x (N+1)` detail grid for one macro-region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionDetailGrid {
    /// Macro-region column.
    pub map_x: i32,
    /// Macro-region row.
    pub map_y: i32,
    /// Display label.
    pub name: String,
    /// Grid width (always `N + 1`).
    pub width: i32,
    /// Grid height (always `N + 1`).
    pub height: i32,
    /// Row-major tiles.
    pub tiles: Vec<RegionTile>,
}

/// Response of `GetRegionMaps`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionMaps {
    /// One stitched grid per loaded detail record.
    pub region_maps: Vec<RegionDetailGrid>,
}

// ---------------------------------------------------------------------------
// Creature and plant raws
// ---------------------------------------------------------------------------

/// One tissue layer of a body part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BodyPartLayerRaw {
    /// Layer name.
    pub layer_name: String,
    /// Index into the creature's tissues.
    pub tissue_id: i32,
    /// Depth of the layer.
    pub layer_depth: i32,
    /// Modifier indices applying to the layer.
    pub bp_modifiers: Vec<i32>,
}

/// One body part of a caste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BodyPartRaw {
    /// Token.
    pub token: String,
    /// Category.
    pub category: String,
    /// Parent part index, `-1` for the root.
    pub parent: i32,
    /// Flag bits, one entry per flag.
    pub flags: Vec<bool>,
    /// Tissue layers.
    pub layers: Vec<BodyPartLayerRaw>,
    /// Relative size.
    pub relsize: i32,
}

/// An appearance modifier range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BpAppearanceModifier {
    /// Modifier type token.
    #[serde(rename = "type")]
    pub modifier_type: String,
    /// Lowest value.
    pub mod_min: i32,
    /// Highest value.
    pub mod_max: i32,
}

/// One caste of a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CasteRaw {
    /// Caste index.
    pub index: i32,
    /// Caste token.
    pub caste_id: String,
    /// Singular, plural, adjective.
    pub caste_name: Vec<String>,
    /// Baby name, singular and plural.
    pub baby_name: Vec<String>,
    /// Child name, singular and plural.
    pub child_name: Vec<String>,
    /// Gender code.
    pub gender: i32,
    /// Body parts.
    pub body_parts: Vec<BodyPartRaw>,
    /// Sum of body part sizes.
    pub total_relsize: i32,
    /// Appearance modifiers.
    pub modifiers: Vec<BpAppearanceModifier>,
    /// Description text.
    pub description: String,
    /// Size at adulthood.
    pub adult_size: i32,
}

/// One tissue of a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TissueRaw {
    /// Tissue token.
    pub id: String,
    /// Tissue name.
    pub name: String,
    /// Material the tissue is made of.
    pub material: MatPair,
    /// Tissue this one is subordinate to, if any.
    pub subordinate_to_tissue: String,
}

/// One creature raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatureRaw {
    /// Creature index.
    pub index: i32,
    /// Creature token.
    pub creature_id: String,
    /// Singular, plural, adjective.
    pub name: Vec<String>,
    /// General baby name, singular and plural.
    pub general_baby_name: Vec<String>,
    /// General child name, singular and plural.
    pub general_child_name: Vec<String>,
    /// Display character.
    pub creature_tile: i32,
    /// Display character when soldiering.
    pub creature_soldier_tile: i32,
    /// Display colour.
    pub color: ColorDefinition,
    /// Size at adulthood.
    pub adultsize: i32,
    /// Castes.
    pub caste: Vec<CasteRaw>,
    /// Tissues.
    pub tissues: Vec<TissueRaw>,
}

/// Response of `GetCreatureRaws`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatureRawList {
    /// All creatures.
    pub creature_raws: Vec<CreatureRaw>,
}

/// One plant raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantRaw {
    /// Plant index.
    pub index: i32,
    /// Plant token.
    pub id: String,
    /// Plant name.
    pub name: String,
    /// Display character (tree tile for trees, shrub tile otherwise).
    pub tile: i32,
}

/// Response of `GetPlantRaws`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantRawList {
    /// All plants.
    pub plant_raws: Vec<PlantRaw>,
}

// ---------------------------------------------------------------------------
// Screen and input
// ---------------------------------------------------------------------------

/// One character cell of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScreenTile {
    /// Code page 437 character.
    pub character: u8,
    /// Foreground palette index (`fg | bright * 8`).
    pub foreground: u8,
    /// Background palette index.
    pub background: u8,
}

/// Response of `CopyScreen`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScreenCapture {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Column-major tiles (`x * height + y`).
    pub tiles: Vec<ScreenTile>,
}

/// A keyboard event forwarded into the simulation's input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KeyboardEvent {
    /// Event type (key down/up).
    #[serde(rename = "type")]
    pub event_type: u32,
    /// Device index.
    pub which: u32,
    /// Pressed or released.
    pub state: u32,
    /// Hardware scancode.
    pub scancode: u32,
    /// Virtual key symbol.
    pub sym: u32,
    /// Modifier bits.
    #[serde(rename = "mod")]
    pub modifiers: u32,
    /// Unicode code point.
    pub unicode: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat_pair_default_is_none() {
        assert_eq!(MatPair::default(), MatPair::new(-1, -1));
    }

    #[test]
    fn empty_record_has_no_sections() {
        let record = WireCellRecord::default();
        assert!(!record.has_tiles());
        assert!(!record.has_designations());
    }

    #[test]
    fn keyboard_event_uses_protocol_field_names() {
        let event = KeyboardEvent {
            event_type: 2,
            modifiers: 64,
            ..KeyboardEvent::default()
        };
        let json = serde_json::to_value(event).unwrap_or_default();
        assert_eq!(json["type"], 2);
        assert_eq!(json["mod"], 64);
    }

    #[test]
    fn building_direction_is_omitted_as_null() {
        let snapshot = BuildingSnapshot {
            index: 0,
            pos_x_min: 0,
            pos_y_min: 0,
            pos_z_min: 0,
            pos_x_max: 0,
            pos_y_max: 0,
            pos_z_max: 0,
            building_type: BuildingType {
                building_type: 0,
                building_subtype: -1,
                building_custom: -1,
            },
            material: MatPair::NONE,
            building_flags: 0,
            is_room: false,
            room: None,
            direction: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap_or_default();
        assert!(json["direction"].is_null());
    }
}
