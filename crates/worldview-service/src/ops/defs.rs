//! Static definition lists: materials, items, growths, tile types,
//! building kinds.
//!
//! These read only the raws and the tile type table. With no world loaded
//! the raw-backed lists are empty.

use worldview_core::translate::{material_color, reference_state, tiletype_definition};
use worldview_types::{
    BuildingDefinition, BuildingList, BuildingType, MatPair, MaterialDefinition, MaterialList,
    TiletypeList,
};
use worldview_world::raws::{BUILTIN_MATERIAL_COUNT, CREATURE_MATERIAL_BASE, PLANT_MATERIAL_BASE};
use worldview_world::{BuildingKind, Material, Raws, WorldAccess};

use super::wire_index;

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}

fn material_def(raws: &Raws, pair: MatPair, id: String, material: &Material) -> MaterialDefinition {
    MaterialDefinition {
        mat_pair: pair,
        id,
        name: non_empty(material.name_in(reference_state(material))),
        state_color: material_color(raws, material),
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Every material: inorganics, builtins with their named variants,
/// creature materials, plant materials.
pub fn material_list<W: WorldAccess>(world: &W) -> MaterialList {
    let Some(raws) = world.raws() else {
        return MaterialList::default();
    };
    let mut out = Vec::new();

    for (i, inorganic) in raws.inorganics.iter().enumerate() {
        let material = &inorganic.material;
        out.push(material_def(
            raws,
            MatPair::new(0, wire_index(i)),
            format!("INORGANIC:{}", material.id),
            material,
        ));
    }

    for (i, builtin) in raws.builtin.iter().enumerate().take(BUILTIN_MATERIAL_COUNT) {
        let material = &builtin.material;
        let mat_type = wire_index(i);
        out.push(material_def(
            raws,
            MatPair::new(mat_type, -1),
            material.id.clone(),
            material,
        ));
        for (j, variant) in builtin.variants.iter().enumerate() {
            out.push(material_def(
                raws,
                MatPair::new(mat_type, wire_index(j)),
                format!("{}:{variant}", material.id),
                material,
            ));
        }
    }

    for (i, creature) in raws.creatures.iter().enumerate() {
        for (j, material) in creature.materials.iter().enumerate() {
            out.push(material_def(
                raws,
                MatPair::new(
                    CREATURE_MATERIAL_BASE.saturating_add(wire_index(j)),
                    wire_index(i),
                ),
                format!("CREATURE:{}:{}", creature.id, material.id),
                material,
            ));
        }
    }

    for (i, plant) in raws.plants.iter().enumerate() {
        for (j, material) in plant.materials.iter().enumerate() {
            out.push(material_def(
                raws,
                MatPair::new(
                    PLANT_MATERIAL_BASE.saturating_add(wire_index(j)),
                    wire_index(i),
                ),
                format!("PLANT:{}:{}", plant.id, material.id),
                material,
            ));
        }
    }

    MaterialList { material_list: out }
}

/// Every item type at index `-1`, followed by its raw subtypes.
pub fn item_list<W: WorldAccess>(world: &W) -> MaterialList {
    let Some(raws) = world.raws() else {
        return MaterialList::default();
    };
    let mut out = Vec::new();
    for (t, item_type) in raws.item_types.iter().enumerate() {
        let mat_type = wire_index(t);
        out.push(MaterialDefinition {
            mat_pair: MatPair::new(mat_type, -1),
            id: item_type.token.clone(),
            name: None,
            state_color: None,
        });
        out.extend(
            item_type
                .subtypes
                .iter()
                .enumerate()
                .map(|(s, sub)| MaterialDefinition {
                    mat_pair: MatPair::new(mat_type, wire_index(s)),
                    id: sub.id.clone(),
                    name: non_empty(&sub.name),
                    state_color: None,
                }),
        );
    }
    MaterialList { material_list: out }
}

/// One `<PLANT>:BASE` entry per plant.
pub fn growth_list<W: WorldAccess>(world: &W) -> MaterialList {
    let Some(raws) = world.raws() else {
        return MaterialList::default();
    };
    let material_list = raws
        .plants
        .iter()
        .enumerate()
        .map(|(i, plant)| MaterialDefinition {
            mat_pair: MatPair::new(-1, wire_index(i)),
            id: format!("{}:BASE", plant.id),
            name: non_empty(&plant.name),
            state_color: None,
        })
        .collect();
    MaterialList { material_list }
}

// ---------------------------------------------------------------------------
// Tile types and buildings
// ---------------------------------------------------------------------------

/// Every tile type with its translated codes.
pub fn tiletype_list<W: WorldAccess>(world: &W) -> TiletypeList {
    TiletypeList {
        tiletype_list: world
            .tiletypes()
            .iter()
            .map(|(id, info)| tiletype_definition(id, info))
            .collect(),
    }
}

fn building_def(kind: BuildingKind, subtype: i32, custom: i32, id: String) -> BuildingDefinition {
    BuildingDefinition {
        building_type: BuildingType {
            building_type: kind.code(),
            building_subtype: subtype,
            building_custom: custom,
        },
        id,
        name: None,
    }
}

/// Every building kind, its subtypes, and the custom raws under the
/// `Custom` subtype of workshops and furnaces.
pub fn building_def_list<W: WorldAccess>(world: &W) -> BuildingList {
    let customs = world
        .raws()
        .map(|r| r.custom_buildings.as_slice())
        .unwrap_or_default();
    let mut out = Vec::new();
    for kind in BuildingKind::ALL {
        out.push(building_def(kind, -1, -1, kind.token().to_owned()));
        for (s, subtype) in kind.subtype_tokens().iter().enumerate() {
            let subtype_code = wire_index(s);
            out.push(building_def(
                kind,
                subtype_code,
                -1,
                format!("{}_{subtype}", kind.token()),
            ));
            if kind.custom_subtype() == Some(subtype_code) {
                out.extend(customs.iter().filter(|c| c.kind == kind).map(|c| {
                    BuildingDefinition {
                        name: non_empty(&c.name),
                        ..building_def(kind, subtype_code, c.id, c.code.clone())
                    }
                }));
            }
        }
    }
    BuildingList { building_list: out }
}
