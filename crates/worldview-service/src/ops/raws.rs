//! Creature and plant raws.

use worldview_core::translate::palette_color;
use worldview_types::{
    BodyPartLayerRaw, BodyPartRaw, BpAppearanceModifier, CasteRaw, CreatureRaw, CreatureRawList,
    PlantRaw, PlantRawList, TissueRaw,
};
use worldview_world::raws::{AppearanceModifierDef, BodyPartDef, CasteDef, CreatureDef};
use worldview_world::{Palette, WorldAccess};

use super::wire_index;

/// Reported range of a modifier: the growth bounds when it grows with age,
/// otherwise the outer range breakpoints.
fn modifier_range(modifier: &AppearanceModifierDef) -> (i32, i32) {
    if modifier.growth_rate > 0 {
        (modifier.growth_min, modifier.growth_max)
    } else {
        let first = modifier.ranges.first().copied().unwrap_or_default();
        let last = modifier.ranges.last().copied().unwrap_or_default();
        (first, last)
    }
}

fn body_part(part: &BodyPartDef) -> BodyPartRaw {
    BodyPartRaw {
        token: part.token.clone(),
        category: part.category.clone(),
        parent: part.parent,
        flags: part.flags.clone(),
        layers: part
            .layers
            .iter()
            .map(|l| BodyPartLayerRaw {
                layer_name: l.name.clone(),
                tissue_id: l.tissue_id,
                layer_depth: l.depth,
                bp_modifiers: l.bp_modifiers.clone(),
            })
            .collect(),
        relsize: part.relsize,
    }
}

fn caste(index: usize, caste: &CasteDef) -> CasteRaw {
    CasteRaw {
        index: wire_index(index),
        caste_id: caste.id.clone(),
        caste_name: caste.name.to_vec(),
        baby_name: caste.baby_name.to_vec(),
        child_name: caste.child_name.to_vec(),
        gender: caste.gender,
        body_parts: caste.body_parts.iter().map(body_part).collect(),
        total_relsize: caste
            .body_parts
            .iter()
            .fold(0_i32, |sum, p| sum.saturating_add(p.relsize)),
        modifiers: caste
            .modifiers
            .iter()
            .map(|m| {
                let (mod_min, mod_max) = modifier_range(m);
                BpAppearanceModifier {
                    modifier_type: m.kind.clone(),
                    mod_min,
                    mod_max,
                }
            })
            .collect(),
        description: caste.description.clone(),
        adult_size: caste.adult_size,
    }
}

fn creature(index: usize, def: &CreatureDef, palette: &Palette) -> CreatureRaw {
    CreatureRaw {
        index: wire_index(index),
        creature_id: def.id.clone(),
        name: def.name.to_vec(),
        general_baby_name: def.general_baby_name.to_vec(),
        general_child_name: def.general_child_name.to_vec(),
        creature_tile: i32::from(def.tile),
        creature_soldier_tile: i32::from(def.soldier_tile),
        color: palette_color(palette, def.color),
        adultsize: def.adult_size,
        caste: def
            .castes
            .iter()
            .enumerate()
            .map(|(i, c)| caste(i, c))
            .collect(),
        tissues: def
            .tissues
            .iter()
            .map(|t| TissueRaw {
                id: t.id.clone(),
                name: t.name.clone(),
                material: t.material,
                subordinate_to_tissue: t.subordinate_to.clone(),
            })
            .collect(),
    }
}

/// Every creature with its castes, body plans, modifiers, and tissues.
pub fn creature_raws<W: WorldAccess>(world: &W) -> CreatureRawList {
    let palette = world.screen().palette();
    let creature_raws = world
        .raws()
        .map(|raws| {
            raws.creatures
                .iter()
                .enumerate()
                .map(|(i, c)| creature(i, c, palette))
                .collect()
        })
        .unwrap_or_default();
    CreatureRawList { creature_raws }
}

/// Every plant with the tile it is drawn with.
pub fn plant_raws<W: WorldAccess>(world: &W) -> PlantRawList {
    let plant_raws = world
        .raws()
        .map(|raws| {
            raws.plants
                .iter()
                .enumerate()
                .map(|(i, p)| PlantRaw {
                    index: wire_index(i),
                    id: p.id.clone(),
                    name: p.name.clone(),
                    tile: i32::from(if p.is_tree { p.tree_tile } else { p.shrub_tile }),
                })
                .collect()
        })
        .unwrap_or_default();
    PlantRawList { plant_raws }
}
