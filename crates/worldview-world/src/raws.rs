//! Static definitions loaded with a world: materials, creatures, plants,
//! item types, custom buildings, and descriptor colours.
//!
//! Material addressing follows the `(type, index)` scheme: inorganics are
//! type 0 indexed by inorganic, builtin materials are types `0..19` with
//! index `-1` (or a named sub-variant), creature materials are
//! `19 + material` indexed by creature, plant materials are
//! `419 + material` indexed by plant.

use crate::building::BuildingKind;
use worldview_types::MatPair;

/// Number of builtin material slots.
pub const BUILTIN_MATERIAL_COUNT: usize = 19;

/// First material type used for creature materials.
pub const CREATURE_MATERIAL_BASE: i32 = 19;

/// First material type used for plant materials.
pub const PLANT_MATERIAL_BASE: i32 = 419;

/// Builtin material type of water.
pub const WATER_MATERIAL_TYPE: i32 = 6;

/// Temperature at which material colours and names are reported.
pub const REFERENCE_TEMPERATURE: u16 = 10015;

/// Physical state of a material at some temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatterState {
    /// Solid.
    Solid,
    /// Liquid.
    Liquid,
    /// Gas.
    Gas,
}

impl MatterState {
    /// Position in per-state arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Solid => 0,
            Self::Liquid => 1,
            Self::Gas => 2,
        }
    }
}

/// A palette colour reference: foreground, background, brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PaletteColor {
    /// Foreground index `0..8`.
    pub fg: u8,
    /// Background index `0..8`.
    pub bg: u8,
    /// Bright flag.
    pub bright: bool,
}

impl PaletteColor {
    /// Index into a 16-entry palette (`fg | bright * 8`).
    pub const fn index(self) -> usize {
        let base = (self.fg & 0x7) as usize;
        if self.bright { base | 8 } else { base }
    }
}

/// A named colour from the descriptor table, channels in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorColor {
    /// Token.
    pub id: String,
    /// Red.
    pub red: f32,
    /// Green.
    pub green: f32,
    /// Blue.
    pub blue: f32,
}

/// One material.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Material {
    /// Local token (e.g. `SKIN`, `GRANITE`).
    pub id: String,
    /// Name per state (solid, liquid, gas).
    pub state_name: [String; 3],
    /// Descriptor colour index per state, `None` when undefined.
    pub state_color: [Option<usize>; 3],
    /// Melting point.
    pub melting_point: u16,
    /// Boiling point.
    pub boiling_point: u16,
}

impl Material {
    /// State at a given temperature.
    pub const fn state_at(&self, temperature: u16) -> MatterState {
        if temperature >= self.boiling_point {
            MatterState::Gas
        } else if temperature >= self.melting_point {
            MatterState::Liquid
        } else {
            MatterState::Solid
        }
    }

    /// Name in the given state.
    pub fn name_in(&self, state: MatterState) -> &str {
        self.state_name.get(state.index()).map_or("", String::as_str)
    }

    /// Colour index in the given state.
    pub fn color_in(&self, state: MatterState) -> Option<usize> {
        self.state_color.get(state.index()).copied().flatten()
    }
}

/// An inorganic (stone, metal, gem).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InorganicRaw {
    /// Material.
    pub material: Material,
}

/// A builtin material with optional named sub-variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltinMaterial {
    /// Material.
    pub material: Material,
    /// Sub-variant names, addressed by index `0..`.
    pub variants: Vec<String>,
}

/// One tissue layer of a body part.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyLayerDef {
    /// Layer name.
    pub name: String,
    /// Tissue index.
    pub tissue_id: i32,
    /// Depth.
    pub depth: i32,
    /// Modifier indices.
    pub bp_modifiers: Vec<i32>,
}

/// One body part.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyPartDef {
    /// Token.
    pub token: String,
    /// Category.
    pub category: String,
    /// Parent index, `-1` for the root.
    pub parent: i32,
    /// Flag bits.
    pub flags: Vec<bool>,
    /// Tissue layers.
    pub layers: Vec<BodyLayerDef>,
    /// Relative size.
    pub relsize: i32,
}

/// An appearance modifier with its ranges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppearanceModifierDef {
    /// Modifier type token.
    pub kind: String,
    /// Seven range breakpoints.
    pub ranges: [i32; 7],
    /// Growth rate; positive means the value grows with age.
    pub growth_rate: i32,
    /// Lowest grown value.
    pub growth_min: i32,
    /// Highest grown value.
    pub growth_max: i32,
}

/// One caste.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CasteDef {
    /// Token.
    pub id: String,
    /// Singular, plural, adjective.
    pub name: [String; 3],
    /// Baby name, singular and plural.
    pub baby_name: [String; 2],
    /// Child name, singular and plural.
    pub child_name: [String; 2],
    /// Gender code.
    pub gender: i32,
    /// Body parts.
    pub body_parts: Vec<BodyPartDef>,
    /// Appearance modifiers.
    pub modifiers: Vec<AppearanceModifierDef>,
    /// Description.
    pub description: String,
    /// Size at adulthood.
    pub adult_size: i32,
}

/// One tissue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TissueDef {
    /// Token.
    pub id: String,
    /// Name.
    pub name: String,
    /// Material.
    pub material: MatPair,
    /// Parent tissue token, possibly empty.
    pub subordinate_to: String,
}

/// One creature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatureDef {
    /// Token.
    pub id: String,
    /// Singular, plural, adjective.
    pub name: [String; 3],
    /// General baby name.
    pub general_baby_name: [String; 2],
    /// General child name.
    pub general_child_name: [String; 2],
    /// Display character.
    pub tile: u8,
    /// Display character when soldiering.
    pub soldier_tile: u8,
    /// Display colour.
    pub color: PaletteColor,
    /// Size at adulthood.
    pub adult_size: i32,
    /// Castes.
    pub castes: Vec<CasteDef>,
    /// Tissues.
    pub tissues: Vec<TissueDef>,
    /// Materials.
    pub materials: Vec<Material>,
}

/// One plant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlantDef {
    /// Token.
    pub id: String,
    /// Name.
    pub name: String,
    /// Whether the plant grows into a tree.
    pub is_tree: bool,
    /// Display character as a shrub.
    pub shrub_tile: u8,
    /// Display character as a tree.
    pub tree_tile: u8,
    /// Materials.
    pub materials: Vec<Material>,
}

/// One item subtype.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemSubtypeDef {
    /// Token.
    pub id: String,
    /// Name.
    pub name: String,
}

/// One item type with its raw subtypes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemTypeDef {
    /// Token.
    pub token: String,
    /// Subtypes, indexed by subtype code.
    pub subtypes: Vec<ItemSubtypeDef>,
}

/// A custom workshop or furnace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBuildingDef {
    /// Custom raw id.
    pub id: i32,
    /// Token.
    pub code: String,
    /// Name.
    pub name: String,
    /// `Workshop` or `Furnace`.
    pub kind: BuildingKind,
}

/// Everything static loaded with a world.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Raws {
    /// Inorganics.
    pub inorganics: Vec<InorganicRaw>,
    /// Builtin materials, at most [`BUILTIN_MATERIAL_COUNT`].
    pub builtin: Vec<BuiltinMaterial>,
    /// Creatures.
    pub creatures: Vec<CreatureDef>,
    /// Plants.
    pub plants: Vec<PlantDef>,
    /// Item types, indexed by item type code.
    pub item_types: Vec<ItemTypeDef>,
    /// Custom workshops and furnaces.
    pub custom_buildings: Vec<CustomBuildingDef>,
    /// Descriptor colours.
    pub colors: Vec<DescriptorColor>,
}

impl Raws {
    /// Descriptor colour at an index.
    pub fn color(&self, index: usize) -> Option<&DescriptorColor> {
        self.colors.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_material(melting: u16, boiling: u16) -> Material {
        Material {
            id: String::from("TEST"),
            state_name: [
                String::from("solid"),
                String::from("liquid"),
                String::from("gas"),
            ],
            state_color: [Some(0), None, Some(2)],
            melting_point: melting,
            boiling_point: boiling,
        }
    }

    #[test]
    fn state_follows_thresholds() {
        let ice = make_material(10000, 10180);
        assert_eq!(ice.state_at(REFERENCE_TEMPERATURE), MatterState::Liquid);
        let stone = make_material(11000, 12000);
        assert_eq!(stone.state_at(REFERENCE_TEMPERATURE), MatterState::Solid);
        let steam = make_material(9000, 10000);
        assert_eq!(steam.state_at(REFERENCE_TEMPERATURE), MatterState::Gas);
    }

    #[test]
    fn color_per_state() {
        let m = make_material(11000, 12000);
        assert_eq!(m.color_in(MatterState::Solid), Some(0));
        assert_eq!(m.color_in(MatterState::Liquid), None);
        assert_eq!(m.name_in(MatterState::Gas), "gas");
    }

    #[test]
    fn palette_index_adds_bright() {
        let c = PaletteColor {
            fg: 3,
            bg: 0,
            bright: true,
        };
        assert_eq!(c.index(), 11);
    }
}
