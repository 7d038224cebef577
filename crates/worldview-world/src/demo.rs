//! Deterministic demo world.
//!
//! Builds a [`MemoryWorld`] with layered terrain, liquids, plants, one of
//! every directional building, a few units, macro-region data with detail
//! records around the embark site, and a title screen. The same
//! [`DemoParams`] always produce the same world.

use tracing::info;
use worldview_types::{CELL_EDGE, CellCoord, MatPair, TileCoord};

use crate::access::WorldAccess;
use crate::block::{MapBlock, Plant, TileMaterials};
use crate::building::{
    BridgeDirection, Building, BuildingDetail, BuildingKind, Construction, PumpDirection, Room,
    SiegeFacing,
};
use crate::designation::{DigDesignation, Designation, LiquidType, Occupancy};
use crate::error::WorldError;
use crate::memory::MemoryWorld;
use crate::raws::{
    AppearanceModifierDef, BodyLayerDef, BodyPartDef, BuiltinMaterial, CasteDef, CreatureDef,
    CustomBuildingDef, DescriptorColor, InorganicRaw, ItemSubtypeDef, ItemTypeDef, Material,
    PaletteColor, PlantDef, Raws, TissueDef, WATER_MATERIAL_TYPE,
};
use crate::region::{
    Clouds, Grid, REGION_DETAIL_SIZE, REGION_GRID_EDGE, RegionDetails, RegionKind, RegionSummary,
    RiverSpan, WorldData, WorldRegion,
};
use crate::unit::{Appearance, BodySize, Unit};
use crate::view::{MapExtent, ViewState};

/// Largest accepted map size along any axis, in cells.
const MAX_MAP_CELLS: i32 = 64;

/// Largest accepted world size along any axis, in macro-regions.
const MAX_WORLD_REGIONS: usize = 257;

/// Inputs of the demo world generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoParams {
    /// Map width in cells.
    pub size_x: i32,
    /// Map height in cells.
    pub size_y: i32,
    /// Number of levels.
    pub size_z: i32,
    /// World width in macro-regions.
    pub world_width: usize,
    /// World height in macro-regions.
    pub world_height: usize,
    /// Generator seed.
    pub seed: u64,
    /// World name.
    pub name: String,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            size_x: 4,
            size_y: 4,
            size_z: 8,
            world_width: 17,
            world_height: 17,
            seed: 7,
            name: String::from("Demo"),
        }
    }
}

impl DemoParams {
    fn validate(&self) -> Result<(), WorldError> {
        let axes = [("size_x", self.size_x), ("size_y", self.size_y)];
        for (name, value) in axes {
            if !(1..=MAX_MAP_CELLS).contains(&value) {
                return Err(WorldError::InvalidParameter(format!(
                    "{name} must be in 1..={MAX_MAP_CELLS}, got {value}"
                )));
            }
        }
        if !(3..=MAX_MAP_CELLS).contains(&self.size_z) {
            return Err(WorldError::InvalidParameter(format!(
                "size_z must be in 3..={MAX_MAP_CELLS}, got {}",
                self.size_z
            )));
        }
        let world_ok = |v: usize| (2..=MAX_WORLD_REGIONS).contains(&v);
        if !world_ok(self.world_width) || !world_ok(self.world_height) {
            return Err(WorldError::InvalidParameter(format!(
                "world size must be in 2..={MAX_WORLD_REGIONS}, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

const fn bits(v: i32) -> u64 {
    u32::from_ne_bytes(v.to_ne_bytes()) as u64
}

/// `SplitMix64` finaliser over a seed, a salt, and a 2D position.
const fn mix(seed: u64, salt: u64, x: i32, y: i32) -> u64 {
    let mut h = seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    h ^= bits(x).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= bits(y).wrapping_mul(0x94D0_49BB_1331_11EB);
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

/// Hash reduced into `0..n` as an `i32`.
fn pick(seed: u64, salt: u64, x: i32, y: i32, n: u64) -> i32 {
    let v = mix(seed, salt, x, y).checked_rem(n).unwrap_or(0);
    i32::try_from(v).unwrap_or(0)
}

fn pick_i16(seed: u64, salt: u64, x: i32, y: i32, lo: i16, span: u64) -> i16 {
    let v = i16::try_from(pick(seed, salt, x, y, span)).unwrap_or(0);
    lo.saturating_add(v)
}

// ---------------------------------------------------------------------------
// Raws
// ---------------------------------------------------------------------------

fn material(id: &str, solid: &str, color: usize, melting: u16, boiling: u16) -> Material {
    Material {
        id: id.to_owned(),
        state_name: [
            solid.to_owned(),
            format!("molten {solid}"),
            format!("boiling {solid}"),
        ],
        state_color: [Some(color), Some(color), None],
        melting_point: melting,
        boiling_point: boiling,
    }
}

fn descriptor_colors() -> Vec<DescriptorColor> {
    let table: [(&str, f32, f32, f32); 8] = [
        ("BLACK", 0.0, 0.0, 0.0),
        ("WHITE", 1.0, 1.0, 1.0),
        ("GRAY", 0.5, 0.5, 0.5),
        ("BROWN", 0.5, 0.25, 0.0),
        ("GREEN", 0.0, 0.5, 0.0),
        ("BLUE", 0.0, 0.0, 1.0),
        ("RED", 1.0, 0.0, 0.0),
        ("PEACH", 1.0, 0.75, 0.5),
    ];
    table
        .iter()
        .map(|&(id, red, green, blue)| DescriptorColor {
            id: id.to_owned(),
            red,
            green,
            blue,
        })
        .collect()
}

const GRAY: usize = 2;
const BROWN: usize = 3;
const GREEN: usize = 4;
const BLUE: usize = 5;
const RED: usize = 6;
const PEACH: usize = 7;

fn builtin_materials() -> Vec<BuiltinMaterial> {
    let names = [
        "INORGANIC",
        "AMBER",
        "CORAL",
        "GLASS_GREEN",
        "GLASS_CLEAR",
        "GLASS_CRYSTAL",
        "WATER",
        "COAL",
        "POTASH",
        "ASH",
        "PEARLASH",
        "LYE",
        "MUD",
        "VOMIT",
        "SALT",
        "FILTH_B",
        "FILTH_Y",
        "UNKNOWN_SUBSTANCE",
        "GRIME",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let is_water = i32::try_from(i).ok() == Some(WATER_MATERIAL_TYPE);
            let mat = if is_water {
                Material {
                    state_name: [
                        String::from("ice"),
                        String::from("water"),
                        String::from("steam"),
                    ],
                    ..material(name, "ice", BLUE, 10000, 10180)
                }
            } else {
                material(name, &name.to_lowercase(), GRAY, 11000, 14000)
            };
            let variants = if name == "COAL" {
                vec![String::from("COKE"), String::from("CHARCOAL")]
            } else {
                Vec::new()
            };
            BuiltinMaterial {
                material: mat,
                variants,
            }
        })
        .collect()
}

fn dwarf() -> CreatureDef {
    let body_parts = vec![
        BodyPartDef {
            token: String::from("UB"),
            category: String::from("BODY_UPPER"),
            parent: -1,
            flags: vec![true, false, false],
            layers: vec![
                BodyLayerDef {
                    name: String::from("SKIN"),
                    tissue_id: 0,
                    depth: 1,
                    bp_modifiers: vec![1],
                },
                BodyLayerDef {
                    name: String::from("BONE"),
                    tissue_id: 1,
                    depth: 3,
                    bp_modifiers: Vec::new(),
                },
            ],
            relsize: 1000,
        },
        BodyPartDef {
            token: String::from("HD"),
            category: String::from("HEAD"),
            parent: 0,
            flags: vec![false, true, false],
            layers: vec![BodyLayerDef {
                name: String::from("HAIR"),
                tissue_id: 2,
                depth: 0,
                bp_modifiers: vec![0],
            }],
            relsize: 150,
        },
    ];
    let modifiers = vec![
        AppearanceModifierDef {
            kind: String::from("HEIGHT"),
            ranges: [75, 95, 98, 100, 102, 105, 125],
            growth_rate: 0,
            growth_min: 0,
            growth_max: 0,
        },
        AppearanceModifierDef {
            kind: String::from("LENGTH"),
            ranges: [0, 10, 25, 50, 75, 90, 100],
            growth_rate: 100,
            growth_min: 20,
            growth_max: 200,
        },
    ];
    let caste = |id: &str, gender: i32| CasteDef {
        id: id.to_owned(),
        name: [
            String::from("dwarf"),
            String::from("dwarves"),
            String::from("dwarven"),
        ],
        baby_name: [String::from("dwarven baby"), String::from("dwarven babies")],
        child_name: [String::from("dwarven child"), String::from("dwarven children")],
        gender,
        body_parts: body_parts.clone(),
        modifiers: modifiers.clone(),
        description: String::from("A short, sturdy creature fond of drink and industry."),
        adult_size: 60000,
    };
    CreatureDef {
        id: String::from("DWARF"),
        name: [
            String::from("dwarf"),
            String::from("dwarves"),
            String::from("dwarven"),
        ],
        general_baby_name: [String::from("dwarven baby"), String::from("dwarven babies")],
        general_child_name: [String::from("dwarven child"), String::from("dwarven children")],
        tile: 1,
        soldier_tile: 2,
        color: PaletteColor {
            fg: 3,
            bg: 0,
            bright: true,
        },
        adult_size: 60000,
        castes: vec![caste("FEMALE", 0), caste("MALE", 1)],
        tissues: vec![
            TissueDef {
                id: String::from("SKIN"),
                name: String::from("skin"),
                material: MatPair::new(19, 0),
                subordinate_to: String::new(),
            },
            TissueDef {
                id: String::from("BONE"),
                name: String::from("bone"),
                material: MatPair::new(20, 0),
                subordinate_to: String::new(),
            },
            TissueDef {
                id: String::from("HAIR"),
                name: String::from("hair"),
                material: MatPair::new(21, 0),
                subordinate_to: String::from("SKIN"),
            },
        ],
        materials: vec![
            material("SKIN", "dwarf skin", PEACH, 11000, 14000),
            material("BONE", "dwarf bone", GRAY, 11000, 14000),
            material("HAIR", "dwarf hair", BROWN, 11000, 14000),
            material("BLOOD", "dwarf blood", RED, 9000, 14000),
        ],
    }
}

fn plants() -> Vec<PlantDef> {
    vec![
        PlantDef {
            id: String::from("OAK"),
            name: String::from("oak"),
            is_tree: true,
            shrub_tile: 34,
            tree_tile: 5,
            materials: vec![
                material("WOOD", "oak", BROWN, 11000, 14000),
                material("LEAF", "oak leaf", GREEN, 11000, 14000),
            ],
        },
        PlantDef {
            id: String::from("MUSHROOM_HELMET_PLUMP"),
            name: String::from("plump helmet"),
            is_tree: false,
            shrub_tile: 34,
            tree_tile: 5,
            materials: vec![material("STRUCTURAL", "plump helmet", RED, 11000, 14000)],
        },
    ]
}

/// Index of the `BLOCKS` item type.
const ITEM_BLOCKS: i32 = 2;

fn item_types() -> Vec<ItemTypeDef> {
    let plain = |token: &str| ItemTypeDef {
        token: token.to_owned(),
        subtypes: Vec::new(),
    };
    let sub = |id: &str, name: &str| ItemSubtypeDef {
        id: id.to_owned(),
        name: name.to_owned(),
    };
    vec![
        plain("BAR"),
        plain("SMALLGEM"),
        plain("BLOCKS"),
        plain("ROUGH"),
        plain("BOULDER"),
        plain("WOOD"),
        ItemTypeDef {
            token: String::from("WEAPON"),
            subtypes: vec![
                sub("ITEM_WEAPON_AXE_BATTLE", "battle axe"),
                sub("ITEM_WEAPON_PICK", "pick"),
            ],
        },
        ItemTypeDef {
            token: String::from("TOOL"),
            subtypes: vec![sub("ITEM_TOOL_MINECART", "minecart")],
        },
    ]
}

fn demo_raws() -> Raws {
    let inorganic = |id: &str, name: &str, color: usize| InorganicRaw {
        material: material(id, name, color, 11500, 14000),
    };
    Raws {
        inorganics: vec![
            inorganic("GRANITE", "granite", GRAY),
            inorganic("MARBLE", "marble", 1),
            inorganic("HEMATITE", "hematite", RED),
            inorganic("OBSIDIAN", "obsidian", 0),
        ],
        builtin: builtin_materials(),
        creatures: vec![dwarf()],
        plants: plants(),
        item_types: item_types(),
        custom_buildings: vec![
            CustomBuildingDef {
                id: 0,
                code: String::from("SOAP_MAKER"),
                name: String::from("Soap Maker's Workshop"),
                kind: BuildingKind::Workshop,
            },
            CustomBuildingDef {
                id: 1,
                code: String::from("BONE_KILN"),
                name: String::from("Bone Kiln"),
                kind: BuildingKind::Furnace,
            },
        ],
        colors: descriptor_colors(),
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

const LAYER_GRANITE: i32 = 0;
const LAYER_MARBLE: i32 = 1;
const VEIN_HEMATITE: i32 = 2;
const OBSIDIAN: i32 = 3;

/// Plant raw index of the tree.
const PLANT_TREE: i32 = 0;
/// Plant raw index of the shrub.
const PLANT_SHRUB: i32 = 1;

struct Terrain<'a> {
    params: &'a DemoParams,
}

impl Terrain<'_> {
    /// Level of the walkable surface at a tile column.
    fn surface_z(&self, tx: i32, ty: i32) -> i32 {
        let seed = self.params.seed;
        let base = self.params.size_z.saturating_div(2);
        let coarse = pick(seed, 1, tx.div_euclid(8), ty.div_euclid(8), 3);
        let fine = i32::from(pick(seed, 2, tx, ty, 5) == 0);
        base.saturating_add(coarse)
            .saturating_add(fine)
            .saturating_sub(1)
            .clamp(1, self.params.size_z.saturating_sub(2))
    }

    /// Tile token, designation, and materials for one tile.
    fn tile(&self, tx: i32, ty: i32, z: i32) -> (&'static str, Designation, TileMaterials) {
        let seed = self.params.seed;
        let surface = self.surface_z(tx, ty);
        let layer = if z < surface.saturating_div(2) {
            LAYER_GRANITE
        } else {
            LAYER_MARBLE
        };
        let mut mats = TileMaterials {
            static_mat: MatPair::new(0, layer),
            base_mat: MatPair::new(0, layer),
            layer,
            vein: -1,
        };
        let open = Designation::EMPTY.with_outside(true).with_light(true);

        if z > surface {
            return ("OpenSpace", open, mats);
        }
        if z == surface {
            if pick(seed, 3, tx, ty, 23) == 0 {
                let water = open
                    .with_flow_size(4)
                    .with_water_table(true)
                    .with_water_stagnant(pick(seed, 4, tx, ty, 2) == 0);
                mats.static_mat = MatPair::new(WATER_MATERIAL_TYPE, -1);
                return ("SoilFloorWet", water, mats);
            }
            let token = match pick(seed, 5, tx, ty, 29) {
                0 => "Sapling",
                1..=3 => "Shrub",
                4..=6 => "GrassDryFloor3",
                _ => "GrassLightFloor1",
            };
            return (token, open, mats);
        }

        let hidden = z < surface.saturating_sub(1);
        let under = Designation::EMPTY
            .with_subterranean(true)
            .with_hidden(hidden);
        if z == 0 && pick(seed, 6, tx, ty, 5) == 0 {
            mats.static_mat = MatPair::new(0, OBSIDIAN);
            let magma = under.with_flow_size(7).with_liquid_type(LiquidType::Magma);
            return ("MagmaFlow", magma, mats);
        }
        if pick(seed, 7, tx.saturating_add(z), ty, 19) == 0 {
            mats.vein = VEIN_HEMATITE;
            mats.static_mat = MatPair::new(0, VEIN_HEMATITE);
            return ("MineralWall", under, mats);
        }
        if z == surface.saturating_sub(1) {
            return ("SoilWall", under, mats);
        }
        ("StoneWall", under, mats)
    }
}

fn build_block(
    world: &MemoryWorld,
    terrain: &Terrain<'_>,
    coord: CellCoord,
) -> Result<MapBlock, WorldError> {
    let mut block = MapBlock::new(coord, 0);
    let edge = usize::try_from(CELL_EDGE).unwrap_or(16);
    for y in 0..edge {
        for x in 0..edge {
            let pos = block.tile_pos(x, y);
            let (token, designation, mats) = terrain.tile(pos.x, pos.y, pos.z);
            let id = world
                .tiletypes()
                .id_of(token)
                .ok_or_else(|| WorldError::UnknownTiletype(token.to_owned()))?;
            block.set_tiletype(x, y, id)?;
            block.set_designation(x, y, designation)?;
            block.set_materials(x, y, mats)?;
            let raw_index = match token {
                "Sapling" => Some(PLANT_TREE),
                "Shrub" => Some(PLANT_SHRUB),
                _ => None,
            };
            if let Some(raw_index) = raw_index {
                block.add_plant(Plant { pos, raw_index })?;
            }
        }
    }
    Ok(block)
}

// ---------------------------------------------------------------------------
// Buildings and units
// ---------------------------------------------------------------------------

fn mark_occupancy(world: &mut MemoryWorld, building: &Building) -> Result<(), WorldError> {
    for y in building.y1..=building.y2 {
        for x in building.x1..=building.x2 {
            let pos = TileCoord::new(x, y, building.z);
            let (lx, ly) = pos.local();
            let block = world.block_mut(pos.cell())?;
            let current = block.occupancy(lx, ly).unwrap_or(Occupancy::EMPTY);
            block.set_occupancy(lx, ly, current.with_building(2))?;
        }
    }
    Ok(())
}

fn demo_buildings(terrain: &Terrain<'_>, cx: i32, cy: i32) -> Vec<Building> {
    let at = |id: i32, kind: BuildingKind, x: i32, y: i32, w: i32, h: i32| {
        let z = terrain.surface_z(x, y);
        let to = (x.saturating_add(w).saturating_sub(1), y.saturating_add(h).saturating_sub(1));
        let mut b = Building::new(id, kind, (x, y), to, z);
        b.material = MatPair::new(0, LAYER_GRANITE);
        b
    };
    let row = cy.saturating_sub(4);
    let col = |i: i32| cx.saturating_sub(10).saturating_add(i.saturating_mul(3));

    let mut bridge = at(0, BuildingKind::Bridge, col(0), row, 1, 3);
    bridge.detail = BuildingDetail::Bridge(BridgeDirection::Left);

    let mut siege = at(1, BuildingKind::SiegeEngine, col(1), row, 1, 1);
    siege.subtype = 1;
    siege.detail = BuildingDetail::SiegeEngine(SiegeFacing::Up);

    let mut pump = at(2, BuildingKind::ScrewPump, col(2), row, 1, 2);
    pump.detail = BuildingDetail::ScrewPump(PumpDirection::FromSouth);

    let mut axle = at(3, BuildingKind::AxleHorizontal, col(3), row, 2, 1);
    axle.detail = BuildingDetail::Axial { is_vertical: false };

    let mut wheel = at(4, BuildingKind::WaterWheel, col(4), row, 1, 3);
    wheel.detail = BuildingDetail::Axial { is_vertical: true };

    let mut windmill = at(5, BuildingKind::Windmill, col(5), row, 1, 1);
    windmill.detail = BuildingDetail::Windmill {
        orient_x: 0,
        orient_y: -1,
    };

    let mut well = at(6, BuildingKind::Well, col(6), row, 1, 1);
    well.detail = BuildingDetail::Well {
        bucket_z: well.z.saturating_sub(3).max(0),
    };

    let mut soap = at(7, BuildingKind::Workshop, cx, cy, 3, 3);
    soap.subtype = BuildingKind::Workshop.custom_subtype().unwrap_or(-1);
    soap.custom = 0;

    let mut zone = at(8, BuildingKind::Civzone, cx.saturating_add(4), cy, 3, 2);
    zone.subtype = 6;
    zone.is_room = true;
    zone.room = Some(Room {
        x: zone.x1,
        y: zone.y1,
        width: 3,
        height: 2,
        extents: vec![1, 1, 0, 1, 1, 1],
    });

    let table = at(9, BuildingKind::Table, cx.saturating_sub(2), cy, 1, 1);
    let chair = at(10, BuildingKind::Chair, cx.saturating_sub(3), cy, 1, 1);

    vec![
        bridge, siege, pump, axle, wheel, windmill, well, soap, zone, table, chair,
    ]
}

fn demo_units(terrain: &Terrain<'_>, cx: i32, cy: i32) -> Vec<Unit> {
    let names = ["Urist", "Bomrek", "Kadol"];
    (0_i32..)
        .zip(names)
        .map(|(i, name)| {
            let x = cx.saturating_add(i);
            let y = cy.saturating_add(3);
            Unit {
                id: i,
                pos: TileCoord::new(x, y, terrain.surface_z(x, y)),
                race: 0,
                caste: i.rem_euclid(2),
                profession_color: PaletteColor {
                    fg: 2,
                    bg: 0,
                    bright: i == 0,
                },
                flags1: 0,
                flags2: 0,
                flags3: 0,
                is_soldier: i == 2,
                size: BodySize {
                    size_cur: 60000,
                    size_base: 60000,
                    area_cur: 1500,
                    area_base: 1500,
                    length_cur: 120,
                    length_base: 120,
                },
                name: Some(name.to_owned()),
                appearance: Appearance {
                    body_modifiers: vec![100, 50],
                    bp_modifiers: vec![3, 4],
                    size_modifier: 100,
                    colors: vec![0, 1],
                },
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// World data
// ---------------------------------------------------------------------------

fn region_details(seed: u64, pos_x: i32, pos_y: i32) -> RegionDetails {
    let mut details = RegionDetails::new(pos_x, pos_y);
    let salt = mix(seed, 40, pos_x, pos_y);
    details.elevation = Grid::from_fn(REGION_GRID_EDGE, REGION_GRID_EDGE, |x, y| {
        let (x, y) = (i32::try_from(x).unwrap_or(0), i32::try_from(y).unwrap_or(0));
        pick_i16(seed, salt, x, y, 100, 50)
    });
    details.biome = Grid::from_fn(REGION_GRID_EDGE, REGION_GRID_EDGE, |x, y| {
        let (x, y) = (i32::try_from(x).unwrap_or(0), i32::try_from(y).unwrap_or(0));
        u8::try_from(pick(seed, salt.wrapping_add(1), x, y, 9).saturating_add(1)).unwrap_or(5)
    });
    let center = i32::try_from(REGION_DETAIL_SIZE / 2).unwrap_or(8);
    let river = RiverSpan {
        active: 1,
        elevation: 95,
        min: i16::try_from(center.saturating_sub(2)).unwrap_or(0),
        max: i16::try_from(center.saturating_add(2)).unwrap_or(0),
    };
    // A river flows north to south through the middle column.
    let column = REGION_DETAIL_SIZE / 2;
    for y in 0..REGION_GRID_EDGE {
        if let Some(span) = details.rivers_vertical.get_mut(column, y) {
            *span = river;
        }
    }
    details
}

fn world_data(params: &DemoParams, embark: (i32, i32)) -> WorldData {
    let seed = params.seed;
    let region_map = Grid::from_fn(params.world_width, params.world_height, |x, y| {
        let (x, y) = (i32::try_from(x).unwrap_or(0), i32::try_from(y).unwrap_or(0));
        RegionSummary {
            elevation: pick_i16(seed, 20, x, y, 60, 200),
            rainfall: pick_i16(seed, 21, x, y, 0, 100),
            vegetation: pick_i16(seed, 22, x, y, 0, 100),
            temperature: pick_i16(seed, 23, x, y, -20, 80),
            evilness: pick_i16(seed, 24, x, y, 0, 100),
            drainage: pick_i16(seed, 25, x, y, 0, 100),
            volcanism: pick_i16(seed, 26, x, y, 0, 100),
            savagery: pick_i16(seed, 27, x, y, 0, 100),
            salinity: pick_i16(seed, 28, x, y, 0, 100),
            clouds: Clouds {
                front: u8::try_from(pick(seed, 29, x, y, 3)).unwrap_or(0),
                cumulus: u8::try_from(pick(seed, 30, x, y, 4)).unwrap_or(0),
                cirrus: pick(seed, 31, x, y, 2) == 0,
                stratus: u8::try_from(pick(seed, 32, x, y, 4)).unwrap_or(0),
                fog: u8::try_from(pick(seed, 33, x, y, 4)).unwrap_or(0),
            },
            region_id: Some(usize::from(pick(seed, 34, x, y, 7) != 0)),
        }
    });
    let (ex, ey) = embark;
    let details = [(0, 0), (1, 0), (0, 1), (1, 1)]
        .into_iter()
        .map(|(dx, dy)| (ex.saturating_add(dx), ey.saturating_add(dy)))
        .filter(|&(x, y)| {
            usize::try_from(x).is_ok_and(|x| x < params.world_width)
                && usize::try_from(y).is_ok_and(|y| y < params.world_height)
        })
        .map(|(x, y)| region_details(seed, x, y))
        .collect();
    WorldData {
        name: format!("Kogan {}", params.name),
        name_english: format!("The {} Realm", params.name),
        north_pole: false,
        south_pole: true,
        region_map,
        regions: vec![
            WorldRegion {
                kind: RegionKind::Lake,
                lake_surface: 120,
            },
            WorldRegion {
                kind: RegionKind::Hills,
                lake_surface: 0,
            },
        ],
        details,
        cur_year: 250,
        cur_year_tick: 0,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Build the demo world.
///
/// # Errors
///
/// Returns [`WorldError::InvalidParameter`] when a size is out of range.
pub fn create_demo_world(params: &DemoParams) -> Result<MemoryWorld, WorldError> {
    params.validate()?;
    let mut world = MemoryWorld::new();
    let embark = (
        i32::try_from(params.world_width.saturating_div(2)).unwrap_or(0),
        i32::try_from(params.world_height.saturating_div(2)).unwrap_or(0),
    );
    world.load(
        MapExtent {
            size_x: params.size_x,
            size_y: params.size_y,
            size_z: params.size_z,
            origin: CellCoord::new(
                embark.0.saturating_mul(3),
                embark.1.saturating_mul(3),
                100,
            ),
            save_name: format!("region_{}", params.seed),
        },
        demo_raws(),
    );

    let terrain = Terrain { params };
    for z in 0..params.size_z {
        for y in 0..params.size_y {
            for x in 0..params.size_x {
                let block = build_block(&world, &terrain, CellCoord::new(x, y, z))?;
                world.insert_block(block)?;
            }
        }
    }

    let cx = params.size_x.saturating_mul(CELL_EDGE).saturating_div(2);
    let cy = params.size_y.saturating_mul(CELL_EDGE).saturating_div(2);

    // Mark a dig order on the walls just under the center column.
    let dig_z = terrain.surface_z(cx, cy).saturating_sub(1);
    for dx in 0..3 {
        let pos = TileCoord::new(cx.saturating_add(dx), cy.saturating_sub(6), dig_z);
        let (lx, ly) = pos.local();
        if let Ok(block) = world.block_mut(pos.cell()) {
            let current = block.designation(lx, ly).unwrap_or_default();
            block.set_designation(lx, ly, current.with_dig(DigDesignation::Default))?;
        }
    }

    let floor_y = cy.saturating_add(5);
    let floor = TileCoord::new(cx, floor_y, terrain.surface_z(cx, floor_y));
    world.set_tile(floor, "ConstructedFloor")?;
    world.block_mut(floor.cell())?.remove_plant_at(floor);
    world.add_construction(Construction {
        pos: floor,
        item: MatPair::new(ITEM_BLOCKS, -1),
    });

    for building in demo_buildings(&terrain, cx, cy) {
        mark_occupancy(&mut world, &building)?;
        world.add_building(building)?;
    }
    for unit in demo_units(&terrain, cx, cy) {
        world.add_unit(unit)?;
    }

    world.set_world_data(Some(world_data(params, embark)));
    *world.view_mut() = ViewState {
        pos: TileCoord::new(
            cx.saturating_sub(40).max(0),
            cy.saturating_sub(12).max(0),
            terrain.surface_z(cx, cy),
        ),
        ..ViewState::default()
    };
    let title = PaletteColor {
        fg: 7,
        bg: 0,
        bright: true,
    };
    let body = PaletteColor {
        fg: 2,
        bg: 0,
        bright: false,
    };
    let screen = world.screen_mut();
    screen.print(1, 0, &params.name, title);
    screen.print(1, 2, "Dwarves: 3", body);
    screen.print(1, 3, "Buildings: 11", body);

    info!(
        seed = params.seed,
        blocks = world.blocks().count(),
        buildings = world.buildings().len(),
        units = world.units().len(),
        "Demo world created"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DemoParams {
        DemoParams {
            size_x: 3,
            size_y: 3,
            size_z: 6,
            ..DemoParams::default()
        }
    }

    #[test]
    fn demo_world_is_deterministic() {
        let a = create_demo_world(&small()).unwrap_or_default();
        let b = create_demo_world(&small()).unwrap_or_default();
        assert!(a.is_loaded());
        let a_tiles: Vec<u16> = a.blocks().flat_map(|bl| bl.tiletypes().to_vec()).collect();
        let b_tiles: Vec<u16> = b.blocks().flat_map(|bl| bl.tiletypes().to_vec()).collect();
        assert_eq!(a_tiles, b_tiles);
    }

    #[test]
    fn demo_world_is_fully_allocated() {
        let world = create_demo_world(&small());
        assert!(world.is_ok());
        let world = world.unwrap_or_default();
        assert_eq!(world.blocks().count(), 3 * 3 * 6);
        assert!(world.is_loaded());
        assert!(world.world_data().is_some());
        assert_eq!(world.buildings().len(), 11);
        assert_eq!(world.units().len(), 3);
    }

    #[test]
    fn upper_levels_are_open_and_lower_solid() {
        let world = create_demo_world(&small()).unwrap_or_default();
        assert!(world.cell_has_content(CellCoord::new(1, 1, 0)));
        assert!(!world.cell_has_content(CellCoord::new(0, 0, 5)));
    }

    #[test]
    fn embark_has_neighbouring_details() {
        let world = create_demo_world(&DemoParams::default()).unwrap_or_default();
        let data = world.world_data();
        assert!(data.is_some_and(|d| d.details.len() == 4));
        assert!(data.is_some_and(|d| d.details_at(9, 9).is_some()));
    }

    #[test]
    fn plants_match_plant_tiles() {
        let world = create_demo_world(&small()).unwrap_or_default();
        let table = world.tiletypes();
        for block in world.blocks() {
            for plant in block.plants() {
                let (x, y) = plant.pos.local();
                let token = block
                    .tiletype(x, y)
                    .and_then(|id| table.get(id))
                    .map(|t| t.token.as_str());
                assert!(matches!(token, Some("Sapling" | "Shrub")));
            }
        }
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let params = DemoParams {
            size_z: 1,
            ..DemoParams::default()
        };
        assert!(matches!(
            create_demo_world(&params),
            Err(WorldError::InvalidParameter(_))
        ));
    }
}
