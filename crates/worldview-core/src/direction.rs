//! Facing of directional buildings.
//!
//! Only a handful of building kinds have a meaningful direction. Each of
//! them is listed in [`DIRECTION_RULES`] together with the rule that reads
//! its detail record; every other kind has no direction.

use worldview_types::BuildingDirection;
use worldview_world::{
    BridgeDirection, Building, BuildingDetail, BuildingKind, PumpDirection, SiegeFacing,
};

/// How a building kind's detail record yields a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionRule {
    /// Axle alignment: vertical faces north, otherwise east.
    Axial,
    /// Bridge raise direction.
    Bridge,
    /// Siege engine facing.
    Siege,
    /// Screw pump intake side.
    Pump,
    /// Windmill orientation vector.
    Windmill,
}

/// Kinds with a direction and the rule for each.
pub const DIRECTION_RULES: &[(BuildingKind, DirectionRule)] = &[
    (BuildingKind::AxleHorizontal, DirectionRule::Axial),
    (BuildingKind::WaterWheel, DirectionRule::Axial),
    (BuildingKind::Bridge, DirectionRule::Bridge),
    (BuildingKind::SiegeEngine, DirectionRule::Siege),
    (BuildingKind::ScrewPump, DirectionRule::Pump),
    (BuildingKind::Windmill, DirectionRule::Windmill),
];

/// Rule for a kind, if the kind is directional.
pub fn rule_for(kind: BuildingKind) -> Option<DirectionRule> {
    DIRECTION_RULES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|&(_, rule)| rule)
}

impl DirectionRule {
    /// Apply the rule to a detail record. A detail of the wrong shape
    /// yields no direction.
    pub const fn apply(self, detail: BuildingDetail) -> Option<BuildingDirection> {
        match (self, detail) {
            (Self::Axial, BuildingDetail::Axial { is_vertical }) => Some(if is_vertical {
                BuildingDirection::North
            } else {
                BuildingDirection::East
            }),
            (Self::Bridge, BuildingDetail::Bridge(dir)) => match dir {
                BridgeDirection::Retracting => None,
                BridgeDirection::Left => Some(BuildingDirection::West),
                BridgeDirection::Right => Some(BuildingDirection::East),
                BridgeDirection::Up => Some(BuildingDirection::North),
                BridgeDirection::Down => Some(BuildingDirection::South),
            },
            (Self::Siege, BuildingDetail::SiegeEngine(facing)) => Some(match facing {
                SiegeFacing::Left => BuildingDirection::West,
                SiegeFacing::Up => BuildingDirection::North,
                SiegeFacing::Right => BuildingDirection::East,
                SiegeFacing::Down => BuildingDirection::South,
            }),
            (Self::Pump, BuildingDetail::ScrewPump(from)) => Some(match from {
                PumpDirection::FromNorth => BuildingDirection::North,
                PumpDirection::FromEast => BuildingDirection::East,
                PumpDirection::FromSouth => BuildingDirection::South,
                PumpDirection::FromWest => BuildingDirection::West,
            }),
            (Self::Windmill, BuildingDetail::Windmill { orient_x, orient_y }) => {
                Some(windmill_direction(orient_x, orient_y))
            }
            _ => None,
        }
    }
}

const fn windmill_direction(orient_x: i8, orient_y: i8) -> BuildingDirection {
    if orient_x < 0 {
        BuildingDirection::West
    } else if orient_x > 0 {
        BuildingDirection::East
    } else if orient_y < 0 {
        BuildingDirection::North
    } else if orient_y > 0 {
        BuildingDirection::South
    } else {
        BuildingDirection::West
    }
}

/// Wire direction of a building, `None` for non-directional kinds.
pub fn building_direction(building: &Building) -> Option<BuildingDirection> {
    rule_for(building.kind).and_then(|rule| rule.apply(building.detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_detail(kind: BuildingKind, detail: BuildingDetail) -> Building {
        let mut b = Building::new(1, kind, (0, 0), (0, 0), 0);
        b.detail = detail;
        b
    }

    #[test]
    fn axial_kinds() {
        let axle = with_detail(
            BuildingKind::AxleHorizontal,
            BuildingDetail::Axial { is_vertical: false },
        );
        assert_eq!(building_direction(&axle), Some(BuildingDirection::East));
        let wheel = with_detail(
            BuildingKind::WaterWheel,
            BuildingDetail::Axial { is_vertical: true },
        );
        assert_eq!(building_direction(&wheel), Some(BuildingDirection::North));
    }

    #[test]
    fn bridge_directions() {
        let cases = [
            (BridgeDirection::Left, Some(BuildingDirection::West)),
            (BridgeDirection::Right, Some(BuildingDirection::East)),
            (BridgeDirection::Up, Some(BuildingDirection::North)),
            (BridgeDirection::Down, Some(BuildingDirection::South)),
            (BridgeDirection::Retracting, None),
        ];
        for (dir, expected) in cases {
            let b = with_detail(BuildingKind::Bridge, BuildingDetail::Bridge(dir));
            assert_eq!(building_direction(&b), expected);
        }
    }

    #[test]
    fn siege_and_pump_map_one_to_one() {
        let siege = with_detail(
            BuildingKind::SiegeEngine,
            BuildingDetail::SiegeEngine(SiegeFacing::Up),
        );
        assert_eq!(building_direction(&siege), Some(BuildingDirection::North));
        let pump = with_detail(
            BuildingKind::ScrewPump,
            BuildingDetail::ScrewPump(PumpDirection::FromWest),
        );
        assert_eq!(building_direction(&pump), Some(BuildingDirection::West));
    }

    #[test]
    fn windmill_orientation() {
        let cases = [
            ((-1, 1), BuildingDirection::West),
            ((1, -1), BuildingDirection::East),
            ((0, -1), BuildingDirection::North),
            ((0, 1), BuildingDirection::South),
            ((0, 0), BuildingDirection::West),
        ];
        for ((orient_x, orient_y), expected) in cases {
            let b = with_detail(
                BuildingKind::Windmill,
                BuildingDetail::Windmill { orient_x, orient_y },
            );
            assert_eq!(building_direction(&b), Some(expected));
        }
    }

    #[test]
    fn other_kinds_have_no_direction() {
        let table = with_detail(BuildingKind::Table, BuildingDetail::None);
        assert_eq!(building_direction(&table), None);
        let well = with_detail(BuildingKind::Well, BuildingDetail::Well { bucket_z: -3 });
        assert_eq!(building_direction(&well), None);
    }

    #[test]
    fn mismatched_detail_has_no_direction() {
        let bridge = with_detail(BuildingKind::Bridge, BuildingDetail::None);
        assert_eq!(building_direction(&bridge), None);
        let pump = with_detail(
            BuildingKind::ScrewPump,
            BuildingDetail::Axial { is_vertical: true },
        );
        assert_eq!(building_direction(&pump), None);
    }

    #[test]
    fn every_rule_kind_is_listed_once() {
        for (kind, rule) in DIRECTION_RULES {
            assert_eq!(rule_for(*kind), Some(*rule));
        }
        assert_eq!(rule_for(BuildingKind::Chair), None);
    }
}
