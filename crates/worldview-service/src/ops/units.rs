//! Units on the map.

use worldview_core::translate::palette_color;
use worldview_types::{
    ColorDefinition, MatPair, SizeInfo, UnitAppearance, UnitList, UnitSnapshot,
};
use worldview_world::{Unit, WorldAccess};

fn snapshot(unit: &Unit, profession_color: ColorDefinition) -> UnitSnapshot {
    let size = unit.size;
    UnitSnapshot {
        id: unit.id,
        pos_x: unit.pos.x,
        pos_y: unit.pos.y,
        pos_z: unit.pos.z,
        race: MatPair::new(unit.race, unit.caste),
        profession_color,
        flags1: unit.flags1,
        flags2: unit.flags2,
        flags3: unit.flags3,
        is_soldier: unit.is_soldier,
        size_info: SizeInfo {
            size_cur: size.size_cur,
            size_base: size.size_base,
            area_cur: size.area_cur,
            area_base: size.area_base,
            length_cur: size.length_cur,
            length_base: size.length_base,
        },
        name: unit.name.clone(),
        appearance: UnitAppearance {
            body_modifiers: unit.appearance.body_modifiers.clone(),
            bp_modifiers: unit.appearance.bp_modifiers.clone(),
            size_modifier: unit.appearance.size_modifier,
            colors: unit.appearance.colors.clone(),
        },
    }
}

/// Every active unit, with its profession colour resolved through the
/// screen palette.
pub fn unit_list<W: WorldAccess>(world: &W) -> UnitList {
    let palette = world.screen().palette();
    UnitList {
        creature_list: world
            .units()
            .iter()
            .map(|u| snapshot(u, palette_color(palette, u.profession_color)))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use worldview_types::TileCoord;
    use worldview_world::{
        DemoParams, MapExtent, MemoryWorld, PaletteColor, Raws, create_demo_world,
    };

    use super::*;

    #[test]
    fn demo_units_are_listed() {
        let world = create_demo_world(&DemoParams::default()).unwrap();
        let list = unit_list(&world);
        assert_eq!(list.creature_list.len(), world.units().len());
        assert!(list.creature_list.iter().all(|u| u.race.mat_type == 0));
    }

    #[test]
    fn snapshot_copies_position_caste_and_colour() {
        let mut world = MemoryWorld::new();
        world.load(
            MapExtent {
                size_x: 1,
                size_y: 1,
                size_z: 1,
                ..MapExtent::default()
            },
            Raws::default(),
        );
        world
            .add_unit(Unit {
                id: 42,
                pos: TileCoord::new(3, 4, 0),
                race: 0,
                caste: 1,
                profession_color: PaletteColor {
                    fg: 7,
                    bg: 0,
                    bright: true,
                },
                name: Some(String::from("Urist")),
                ..Unit::default()
            })
            .unwrap();

        let list = unit_list(&world);
        let unit = list.creature_list.first().unwrap();
        assert_eq!(unit.id, 42);
        assert_eq!((unit.pos_x, unit.pos_y, unit.pos_z), (3, 4, 0));
        assert_eq!(unit.race, MatPair::new(0, 1));
        assert_eq!(unit.name.as_deref(), Some("Urist"));
        assert_eq!(unit.profession_color.red, 255);
    }

    #[test]
    fn no_units_without_a_map() {
        assert!(unit_list(&MemoryWorld::new()).creature_list.is_empty());
    }
}
