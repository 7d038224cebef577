//! Operation names and request/response envelopes.
//!
//! [`Method`] names every operation a client may call. The envelopes carry
//! the typed payload for one call across the dispatch boundary; on the wire
//! only the inner payload is serialized.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coords::RegionQueryWindow;
use crate::records::{
    BlockList, BuildingList, CreatureRawList, EmptyMessage, HashReport, KeyboardEvent, MapInfo,
    MaterialList, PlantList, PlantRawList, RegionMaps, ScreenCapture, TiletypeList, UnitList,
    ViewInfo, WorldMap,
};

/// A callable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Method {
    /// Every material definition.
    GetMaterialList,
    /// Every item type and subtype.
    GetItemList,
    /// Every plant growth.
    GetGrowthList,
    /// Every tile type.
    GetTiletypeList,
    /// Every building definition.
    GetBuildingDefList,
    /// Changed cells inside a window.
    GetBlockList,
    /// Plants inside a window.
    GetPlantList,
    /// Units on the map.
    GetUnitList,
    /// Re-checksum every cell and report the time taken.
    CheckHashes,
    /// Forget every stored checksum.
    ResetMapHashes,
    /// View and cursor position.
    GetViewInfo,
    /// Map extents and names.
    GetMapInfo,
    /// Flattened macro-region attributes.
    GetWorldMap,
    /// Macro-region header and center of interest.
    GetWorldMapCenter,
    /// Stitched region detail grids.
    GetRegionMaps,
    /// Alias of [`Method::GetRegionMaps`] kept for older clients.
    GetRegionMapsNew,
    /// Creature raws.
    GetCreatureRaws,
    /// Plant raws.
    GetPlantRaws,
    /// Current screen contents.
    CopyScreen,
    /// Forward a keyboard event.
    PassKeyboardEvent,
}

impl Method {
    /// Every operation, in table order.
    pub const ALL: [Self; 20] = [
        Self::GetMaterialList,
        Self::GetItemList,
        Self::GetGrowthList,
        Self::GetTiletypeList,
        Self::GetBuildingDefList,
        Self::GetBlockList,
        Self::GetPlantList,
        Self::GetUnitList,
        Self::CheckHashes,
        Self::ResetMapHashes,
        Self::GetViewInfo,
        Self::GetMapInfo,
        Self::GetWorldMap,
        Self::GetWorldMapCenter,
        Self::GetRegionMaps,
        Self::GetRegionMapsNew,
        Self::GetCreatureRaws,
        Self::GetPlantRaws,
        Self::CopyScreen,
        Self::PassKeyboardEvent,
    ];

    /// Protocol name of the operation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetMaterialList => "GetMaterialList",
            Self::GetItemList => "GetItemList",
            Self::GetGrowthList => "GetGrowthList",
            Self::GetTiletypeList => "GetTiletypeList",
            Self::GetBuildingDefList => "GetBuildingDefList",
            Self::GetBlockList => "GetBlockList",
            Self::GetPlantList => "GetPlantList",
            Self::GetUnitList => "GetUnitList",
            Self::CheckHashes => "CheckHashes",
            Self::ResetMapHashes => "ResetMapHashes",
            Self::GetViewInfo => "GetViewInfo",
            Self::GetMapInfo => "GetMapInfo",
            Self::GetWorldMap => "GetWorldMap",
            Self::GetWorldMapCenter => "GetWorldMapCenter",
            Self::GetRegionMaps => "GetRegionMaps",
            Self::GetRegionMapsNew => "GetRegionMapsNew",
            Self::GetCreatureRaws => "GetCreatureRaws",
            Self::GetPlantRaws => "GetPlantRaws",
            Self::CopyScreen => "CopyScreen",
            Self::PassKeyboardEvent => "PassKeyboardEvent",
        }
    }

    /// Look up an operation by protocol name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed input of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcRequest {
    /// No input.
    Empty,
    /// A query window.
    Window(RegionQueryWindow),
    /// A keyboard event.
    Keyboard(KeyboardEvent),
}

/// Typed output of one call.
///
/// Serialized untagged: the wire carries only the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RpcResponse {
    /// Acknowledgement without data.
    Ack(EmptyMessage),
    /// Material, item, or growth definitions.
    Materials(MaterialList),
    /// Tile type definitions.
    Tiletypes(TiletypeList),
    /// Building definitions.
    Buildings(BuildingList),
    /// Changed cells.
    Blocks(BlockList),
    /// Plants.
    Plants(PlantList),
    /// Units.
    Units(UnitList),
    /// Hash timing.
    Hashes(HashReport),
    /// View state.
    View(ViewInfo),
    /// Map metadata.
    Map(MapInfo),
    /// World map or its center.
    World(Box<WorldMap>),
    /// Region grids.
    Regions(RegionMaps),
    /// Creature raws.
    Creatures(CreatureRawList),
    /// Plant raws.
    PlantRaws(PlantRawList),
    /// Screen contents.
    Screen(ScreenCapture),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.name()), Some(method));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Method::from_name("GetEverything"), None);
    }

    #[test]
    fn response_serializes_payload_only() {
        let json = serde_json::to_value(RpcResponse::Ack(EmptyMessage {})).unwrap_or_default();
        assert_eq!(json, serde_json::json!({}));
    }
}
