//! Internal code spaces to wire vocabulary.
//!
//! Every function here is total. The internal enums are
//! `#[non_exhaustive]` and grow with the simulation; anything without a
//! wire counterpart maps to the wire "none" value and is logged at `trace`.

use tracing::trace;
use worldview_types::{
    ColorDefinition, TileCodes, TileDigDesignation, TiletypeDefinition, TiletypeMaterial,
    TiletypeShape, TiletypeSpecial, TiletypeVariant,
};
use worldview_world::raws::DescriptorColor;
use worldview_world::tiles::TiletypeInfo;
use worldview_world::{
    DigDesignation, Material, MatterState, Palette, PaletteColor, REFERENCE_TEMPERATURE, Raws,
    TileMaterial, TileShape, TileSpecial, TileVariant, TiletypeTable,
};

// ---------------------------------------------------------------------------
// Tile codes
// ---------------------------------------------------------------------------

/// Wire shape of an internal shape.
pub fn translate_shape(shape: TileShape) -> TiletypeShape {
    match shape {
        TileShape::None => TiletypeShape::NoShape,
        TileShape::Empty | TileShape::EndlessPit => TiletypeShape::Empty,
        TileShape::Floor => TiletypeShape::Floor,
        TileShape::Boulder => TiletypeShape::Boulder,
        TileShape::Pebbles => TiletypeShape::Pebbles,
        TileShape::Wall => TiletypeShape::Wall,
        TileShape::Fortification => TiletypeShape::Fortification,
        TileShape::StairUp => TiletypeShape::StairUp,
        TileShape::StairDown => TiletypeShape::StairDown,
        TileShape::StairUpDown => TiletypeShape::StairUpdown,
        TileShape::Ramp => TiletypeShape::Ramp,
        TileShape::RampTop => TiletypeShape::RampTop,
        TileShape::BrookBed => TiletypeShape::BrookBed,
        TileShape::BrookTop => TiletypeShape::BrookTop,
        TileShape::Sapling => TiletypeShape::Sapling,
        TileShape::Shrub => TiletypeShape::Shrub,
        other => {
            trace!(shape = ?other, "No wire shape");
            TiletypeShape::NoShape
        }
    }
}

/// Wire material class of an internal material class.
pub fn translate_material(material: TileMaterial) -> TiletypeMaterial {
    match material {
        TileMaterial::None => TiletypeMaterial::NoMaterial,
        TileMaterial::Air => TiletypeMaterial::Air,
        TileMaterial::Soil => TiletypeMaterial::Soil,
        TileMaterial::Stone => TiletypeMaterial::Stone,
        TileMaterial::Feature => TiletypeMaterial::Feature,
        TileMaterial::LavaStone => TiletypeMaterial::LavaStone,
        TileMaterial::Mineral => TiletypeMaterial::Mineral,
        TileMaterial::FrozenLiquid => TiletypeMaterial::FrozenLiquid,
        TileMaterial::Construction => TiletypeMaterial::Construction,
        TileMaterial::GrassLight => TiletypeMaterial::GrassLight,
        TileMaterial::GrassDark => TiletypeMaterial::GrassDark,
        TileMaterial::GrassDry => TiletypeMaterial::GrassDry,
        TileMaterial::GrassDead => TiletypeMaterial::GrassDead,
        TileMaterial::Plant => TiletypeMaterial::Plant,
        TileMaterial::Hfs => TiletypeMaterial::Hfs,
        TileMaterial::Campfire => TiletypeMaterial::Campfire,
        TileMaterial::Fire => TiletypeMaterial::Fire,
        TileMaterial::Ashes => TiletypeMaterial::Ashes,
        TileMaterial::Magma => TiletypeMaterial::Magma,
        TileMaterial::Driftwood => TiletypeMaterial::Driftwood,
        TileMaterial::Pool => TiletypeMaterial::Pool,
        TileMaterial::Brook => TiletypeMaterial::Brook,
        TileMaterial::River => TiletypeMaterial::River,
        other => {
            trace!(material = ?other, "No wire material");
            TiletypeMaterial::NoMaterial
        }
    }
}

/// Wire surface modifier of an internal one.
pub fn translate_special(special: TileSpecial) -> TiletypeSpecial {
    match special {
        TileSpecial::None => TiletypeSpecial::NoSpecial,
        TileSpecial::Normal => TiletypeSpecial::Normal,
        TileSpecial::RiverSource => TiletypeSpecial::RiverSource,
        TileSpecial::Waterfall => TiletypeSpecial::Waterfall,
        TileSpecial::Smooth => TiletypeSpecial::Smooth,
        TileSpecial::Furrowed => TiletypeSpecial::Furrowed,
        TileSpecial::Wet => TiletypeSpecial::Wet,
        TileSpecial::Dead => TiletypeSpecial::Dead,
        TileSpecial::Worn1 => TiletypeSpecial::Worn1,
        TileSpecial::Worn2 => TiletypeSpecial::Worn2,
        TileSpecial::Worn3 => TiletypeSpecial::Worn3,
        other => {
            trace!(special = ?other, "No wire special");
            TiletypeSpecial::NoSpecial
        }
    }
}

/// Wire variant of an internal variant.
pub fn translate_variant(variant: TileVariant) -> TiletypeVariant {
    match variant {
        TileVariant::None => TiletypeVariant::NoVariant,
        TileVariant::Var1 => TiletypeVariant::Var1,
        TileVariant::Var2 => TiletypeVariant::Var2,
        TileVariant::Var3 => TiletypeVariant::Var3,
        TileVariant::Var4 => TiletypeVariant::Var4,
        other => {
            trace!(variant = ?other, "No wire variant");
            TiletypeVariant::NoVariant
        }
    }
}

/// Wire dig designation of an internal dig order.
pub fn translate_dig(dig: DigDesignation) -> TileDigDesignation {
    match dig {
        DigDesignation::No => TileDigDesignation::NoDig,
        DigDesignation::Default => TileDigDesignation::DefaultDig,
        DigDesignation::UpDownStair => TileDigDesignation::UpDownStairDig,
        DigDesignation::Channel => TileDigDesignation::ChannelDig,
        DigDesignation::Ramp => TileDigDesignation::RampDig,
        DigDesignation::DownStair => TileDigDesignation::DownStairDig,
        DigDesignation::UpStair => TileDigDesignation::UpStairDig,
        other => {
            trace!(dig = ?other, "No wire dig designation");
            TileDigDesignation::NoDig
        }
    }
}

/// Translated codes of one tile type id. Unknown ids carry the "none" codes.
pub fn tile_codes(table: &TiletypeTable, id: u16) -> TileCodes {
    table.get(id).map_or(
        TileCodes {
            tiletype: id,
            shape: TiletypeShape::NoShape,
            material: TiletypeMaterial::NoMaterial,
            special: TiletypeSpecial::NoSpecial,
            variant: TiletypeVariant::NoVariant,
        },
        |info| TileCodes {
            tiletype: id,
            shape: translate_shape(info.shape),
            material: translate_material(info.material),
            special: translate_special(info.special),
            variant: translate_variant(info.variant),
        },
    )
}

/// Wire definition of one tile type.
pub fn tiletype_definition(id: u16, info: &TiletypeInfo) -> TiletypeDefinition {
    TiletypeDefinition {
        id,
        name: info.token.clone(),
        caption: (!info.caption.is_empty()).then(|| info.caption.clone()),
        shape: translate_shape(info.shape),
        special: translate_special(info.special),
        material: translate_material(info.material),
        variant: translate_variant(info.variant),
        direction: info.direction.clone(),
    }
}

// ---------------------------------------------------------------------------
// Colours and materials
// ---------------------------------------------------------------------------

/// Scale a `0.0..=1.0` channel to a byte, truncating like an integer cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    let scaled = (value * 255.0).clamp(0.0, 255.0);
    scaled as u8
}

/// RGB of a palette index; out-of-range indices are black.
pub fn palette_rgb(palette: &Palette, index: usize) -> ColorDefinition {
    palette
        .get(index)
        .map_or(ColorDefinition::default(), |&[r, g, b]| ColorDefinition {
            red: channel(r),
            green: channel(g),
            blue: channel(b),
        })
}

/// RGB of a foreground/background/bright palette reference.
pub fn palette_color(palette: &Palette, color: PaletteColor) -> ColorDefinition {
    palette_rgb(palette, color.index())
}

/// RGB of a descriptor colour.
pub fn descriptor_rgb(color: &DescriptorColor) -> ColorDefinition {
    ColorDefinition {
        red: channel(color.red),
        green: channel(color.green),
        blue: channel(color.blue),
    }
}

/// State of a material at the reference temperature.
pub const fn reference_state(material: &Material) -> MatterState {
    material.state_at(REFERENCE_TEMPERATURE)
}

/// Colour of a material in its reference state, if it has one in the
/// descriptor table.
pub fn material_color(raws: &Raws, material: &Material) -> Option<ColorDefinition> {
    material
        .color_in(reference_state(material))
        .and_then(|i| raws.color(i))
        .map(descriptor_rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldview_world::DEFAULT_PALETTE;

    #[test]
    fn endless_pit_is_empty() {
        assert_eq!(translate_shape(TileShape::EndlessPit), TiletypeShape::Empty);
    }

    #[test]
    fn values_without_wire_code_map_to_none() {
        assert_eq!(translate_shape(TileShape::Branch), TiletypeShape::NoShape);
        assert_eq!(translate_shape(TileShape::Twig), TiletypeShape::NoShape);
        assert_eq!(translate_material(TileMaterial::Root), TiletypeMaterial::NoMaterial);
        assert_eq!(
            translate_material(TileMaterial::UnderworldGate),
            TiletypeMaterial::NoMaterial
        );
        assert_eq!(translate_special(TileSpecial::Track), TiletypeSpecial::NoSpecial);
        assert_eq!(translate_special(TileSpecial::SmoothDead), TiletypeSpecial::NoSpecial);
        assert_eq!(translate_dig(DigDesignation::Reserved), TileDigDesignation::NoDig);
    }

    #[test]
    fn every_standard_tiletype_translates() {
        let table = TiletypeTable::standard();
        for (id, info) in table.iter() {
            let codes = tile_codes(&table, id);
            assert_eq!(codes.tiletype, id);
            assert_eq!(codes.shape, translate_shape(info.shape));
        }
    }

    #[test]
    fn unknown_tiletype_id_has_none_codes() {
        let table = TiletypeTable::standard();
        let codes = tile_codes(&table, u16::MAX);
        assert_eq!(codes.shape, TiletypeShape::NoShape);
        assert_eq!(codes.variant, TiletypeVariant::NoVariant);
    }

    #[test]
    fn definition_omits_empty_caption() {
        let table = TiletypeTable::standard();
        let void = table.get(0).map(|info| tiletype_definition(0, info));
        assert_eq!(void.and_then(|d| d.caption), None);
        let wall_id = table.id_of("StoneWallSmoothNSEW").unwrap_or_default();
        let wall = table.get(wall_id).map(|info| tiletype_definition(wall_id, info));
        assert_eq!(wall.as_ref().map(|d| d.direction.as_str()), Some("NSEW"));
        assert_eq!(wall.map(|d| d.special), Some(TiletypeSpecial::Smooth));
    }

    #[test]
    fn palette_scaling() {
        let white = palette_rgb(&DEFAULT_PALETTE, 15);
        assert_eq!((white.red, white.green, white.blue), (255, 255, 255));
        let grey = palette_rgb(&DEFAULT_PALETTE, 7);
        assert_eq!(grey.red, 191);
        assert_eq!(palette_rgb(&DEFAULT_PALETTE, 99), ColorDefinition::default());
        let bright_red = palette_color(
            &DEFAULT_PALETTE,
            PaletteColor {
                fg: 4,
                bg: 0,
                bright: true,
            },
        );
        assert_eq!(bright_red.red, 255);
    }
}
