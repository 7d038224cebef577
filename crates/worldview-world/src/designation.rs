//! Packed per-tile designation and occupancy words.
//!
//! Both are 32-bit words whose layout the simulation owns. The raw words
//! are what the dirty tracker checksums, so the layout is part of the
//! change-detection contract: any bit flip must change the word.
//!
//! Designation layout (bit ranges inclusive):
//!
//! | Bits | Field |
//! |------|-------|
//! | 0-2 | flow size |
//! | 3 | pile |
//! | 4-6 | dig designation |
//! | 7-8 | smooth |
//! | 9 | hidden |
//! | 10-13 | geolayer index |
//! | 14 | light |
//! | 15 | subterranean |
//! | 16 | outside |
//! | 17-20 | biome |
//! | 21 | liquid type (set = magma) |
//! | 22 | water table (aquifer) |
//! | 23 | rained |
//! | 24-25 | traffic |
//! | 26 | flow forbid |
//! | 27 | liquid static |
//! | 28 | local feature |
//! | 29 | global feature |
//! | 30 | water stagnant |
//! | 31 | water salt |

use serde::{Deserialize, Serialize};

/// What kind of liquid a tile's flow holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidType {
    /// Water.
    Water,
    /// Magma.
    Magma,
}

/// Dig order placed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DigDesignation {
    /// None.
    No,
    /// Plain dig.
    Default,
    /// Up/down staircase.
    UpDownStair,
    /// Channel.
    Channel,
    /// Ramp.
    Ramp,
    /// Down staircase.
    DownStair,
    /// Up staircase.
    UpStair,
    /// Bit pattern with no assigned meaning.
    Reserved,
}

impl DigDesignation {
    /// Decode the 3-bit field.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x7 {
            0 => Self::No,
            1 => Self::Default,
            2 => Self::UpDownStair,
            3 => Self::Channel,
            4 => Self::Ramp,
            5 => Self::DownStair,
            6 => Self::UpStair,
            _ => Self::Reserved,
        }
    }

    /// Encode into the 3-bit field.
    pub const fn bits(self) -> u32 {
        match self {
            Self::No => 0,
            Self::Default => 1,
            Self::UpDownStair => 2,
            Self::Channel => 3,
            Self::Ramp => 4,
            Self::DownStair => 5,
            Self::UpStair => 6,
            Self::Reserved => 7,
        }
    }
}

const FLOW_SIZE_SHIFT: u32 = 0;
const DIG_SHIFT: u32 = 4;
const HIDDEN_BIT: u32 = 1 << 9;
const GEOLAYER_SHIFT: u32 = 10;
const LIGHT_BIT: u32 = 1 << 14;
const SUBTERRANEAN_BIT: u32 = 1 << 15;
const OUTSIDE_BIT: u32 = 1 << 16;
const BIOME_SHIFT: u32 = 17;
const LIQUID_TYPE_BIT: u32 = 1 << 21;
const WATER_TABLE_BIT: u32 = 1 << 22;
const WATER_STAGNANT_BIT: u32 = 1 << 30;
const WATER_SALT_BIT: u32 = 1 << 31;

/// Packed designation word of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Designation(pub u32);

impl Designation {
    /// All bits clear.
    pub const EMPTY: Self = Self(0);

    const fn field(self, shift: u32, mask: u32) -> u32 {
        (self.0 >> shift) & mask
    }

    const fn with_field(self, shift: u32, mask: u32, value: u32) -> Self {
        Self((self.0 & !(mask << shift)) | ((value & mask) << shift))
    }

    const fn flag(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    const fn with_flag(self, bit: u32, on: bool) -> Self {
        if on { Self(self.0 | bit) } else { Self(self.0 & !bit) }
    }

    /// Liquid depth `0..=7`.
    pub const fn flow_size(self) -> u8 {
        // Masked to 3 bits, always fits.
        #[allow(clippy::cast_possible_truncation)]
        let size = self.field(FLOW_SIZE_SHIFT, 0x7) as u8;
        size
    }

    /// Set the liquid depth (clamped to 3 bits).
    #[must_use]
    pub const fn with_flow_size(self, size: u8) -> Self {
        let clamped = if size > 7 { 7 } else { size };
        self.with_field(FLOW_SIZE_SHIFT, 0x7, clamped as u32)
    }

    /// Dig order.
    pub const fn dig(self) -> DigDesignation {
        DigDesignation::from_bits(self.field(DIG_SHIFT, 0x7))
    }

    /// Set the dig order.
    #[must_use]
    pub const fn with_dig(self, dig: DigDesignation) -> Self {
        self.with_field(DIG_SHIFT, 0x7, dig.bits())
    }

    /// Unrevealed.
    pub const fn hidden(self) -> bool {
        self.flag(HIDDEN_BIT)
    }

    /// Set the unrevealed flag.
    #[must_use]
    pub const fn with_hidden(self, on: bool) -> Self {
        self.with_flag(HIDDEN_BIT, on)
    }

    /// Geological layer index.
    pub const fn geolayer(self) -> u32 {
        self.field(GEOLAYER_SHIFT, 0xf)
    }

    /// Lit.
    pub const fn light(self) -> bool {
        self.flag(LIGHT_BIT)
    }

    /// Set the lit flag.
    #[must_use]
    pub const fn with_light(self, on: bool) -> Self {
        self.with_flag(LIGHT_BIT, on)
    }

    /// Underground.
    pub const fn subterranean(self) -> bool {
        self.flag(SUBTERRANEAN_BIT)
    }

    /// Set the underground flag.
    #[must_use]
    pub const fn with_subterranean(self, on: bool) -> Self {
        self.with_flag(SUBTERRANEAN_BIT, on)
    }

    /// Outside.
    pub const fn outside(self) -> bool {
        self.flag(OUTSIDE_BIT)
    }

    /// Set the outside flag.
    #[must_use]
    pub const fn with_outside(self, on: bool) -> Self {
        self.with_flag(OUTSIDE_BIT, on)
    }

    /// Biome index `0..16`.
    pub const fn biome(self) -> u32 {
        self.field(BIOME_SHIFT, 0xf)
    }

    /// Liquid held by the flow.
    pub const fn liquid_type(self) -> LiquidType {
        if self.flag(LIQUID_TYPE_BIT) {
            LiquidType::Magma
        } else {
            LiquidType::Water
        }
    }

    /// Set the liquid type.
    #[must_use]
    pub const fn with_liquid_type(self, liquid: LiquidType) -> Self {
        self.with_flag(LIQUID_TYPE_BIT, matches!(liquid, LiquidType::Magma))
    }

    /// Part of an aquifer.
    pub const fn water_table(self) -> bool {
        self.flag(WATER_TABLE_BIT)
    }

    /// Set the aquifer flag.
    #[must_use]
    pub const fn with_water_table(self, on: bool) -> Self {
        self.with_flag(WATER_TABLE_BIT, on)
    }

    /// Stagnant water.
    pub const fn water_stagnant(self) -> bool {
        self.flag(WATER_STAGNANT_BIT)
    }

    /// Set the stagnant flag.
    #[must_use]
    pub const fn with_water_stagnant(self, on: bool) -> Self {
        self.with_flag(WATER_STAGNANT_BIT, on)
    }

    /// Salt water.
    pub const fn water_salt(self) -> bool {
        self.flag(WATER_SALT_BIT)
    }

    /// Set the salt flag.
    #[must_use]
    pub const fn with_water_salt(self, on: bool) -> Self {
        self.with_flag(WATER_SALT_BIT, on)
    }
}

/// Packed occupancy word of one tile. Bits 0-2 hold the building marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Occupancy(pub u32);

impl Occupancy {
    /// Nothing on the tile.
    pub const EMPTY: Self = Self(0);

    /// Building marker `0..=7`, zero when no building covers the tile.
    pub const fn building(self) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let marker = (self.0 & 0x7) as u8;
        marker
    }

    /// Set the building marker (clamped to 3 bits).
    #[must_use]
    pub const fn with_building(self, marker: u8) -> Self {
        let clamped = if marker > 7 { 7 } else { marker };
        Self((self.0 & !0x7) | clamped as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_and_liquid_round_trip() {
        let d = Designation::EMPTY
            .with_flow_size(5)
            .with_liquid_type(LiquidType::Magma);
        assert_eq!(d.flow_size(), 5);
        assert_eq!(d.liquid_type(), LiquidType::Magma);
        assert_eq!(d.with_flow_size(9).flow_size(), 7);
    }

    #[test]
    fn dig_field_is_isolated() {
        let d = Designation::EMPTY
            .with_hidden(true)
            .with_dig(DigDesignation::Channel);
        assert_eq!(d.dig(), DigDesignation::Channel);
        assert!(d.hidden());
        assert_eq!(d.with_dig(DigDesignation::No).0, HIDDEN_BIT);
    }

    #[test]
    fn reserved_dig_pattern_decodes() {
        assert_eq!(DigDesignation::from_bits(7), DigDesignation::Reserved);
    }

    #[test]
    fn salt_is_the_top_bit() {
        assert_eq!(Designation::EMPTY.with_water_salt(true).0, 0x8000_0000);
    }

    #[test]
    fn occupancy_building_marker() {
        let o = Occupancy(0xf0).with_building(2);
        assert_eq!(o.building(), 2);
        assert_eq!(o.0 & 0xf0, 0xf0);
    }
}
