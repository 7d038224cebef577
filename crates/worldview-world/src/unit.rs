//! Units (creatures) present on the map.

use worldview_types::TileCoord;

use crate::raws::PaletteColor;

/// Current and base body dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BodySize {
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

/// Appearance modifier selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Appearance {
    /// Whole-body modifiers.
    pub body_modifiers: Vec<i32>,
    /// Body-part modifiers.
    pub bp_modifiers: Vec<i32>,
    /// Size modifier.
    pub size_modifier: i32,
    /// Colour modifier selections.
    pub colors: Vec<i32>,
}

/// One active unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Unit {
    /// Unit id.
    pub id: i32,
    /// Position.
    pub pos: TileCoord,
    /// Creature raw index.
    pub race: i32,
    /// Caste index within the race.
    pub caste: i32,
    /// Profession colour.
    pub profession_color: PaletteColor,
    /// First flag word.
    pub flags1: u32,
    /// Second flag word.
    pub flags2: u32,
    /// Third flag word.
    pub flags3: u32,
    /// On active military duty.
    pub is_soldier: bool,
    /// Body dimensions.
    pub size: BodySize,
    /// Visible name.
    pub name: Option<String>,
    /// Appearance.
    pub appearance: Appearance,
}
