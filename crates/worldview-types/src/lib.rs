//! Wire vocabulary for the Worldview sync service.
//!
//! This crate is the single source of truth for every type that crosses
//! the service boundary. Types flow downstream to `TypeScript` via `ts-rs`
//! for browser-side renderers.
//!
//! # Modules
//!
//! - [`coords`] -- Cell and tile coordinates, query windows
//! - [`enums`] -- Wire enumerations with stable codes
//! - [`records`] -- Wire records returned by the query operations
//! - [`rpc`] -- Operation names and request/response envelopes

pub mod coords;
pub mod enums;
pub mod records;
pub mod rpc;

// Re-export all public types at crate root for convenience.
pub use coords::{CELL_EDGE, CellCoord, RegionQueryWindow, TILES_PER_CELL, TileCoord};
pub use enums::{
    BuildingDirection, TileDigDesignation, TiletypeMaterial, TiletypeShape, TiletypeSpecial,
    TiletypeVariant, WorldPoles,
};
pub use records::{
    BlockList, BodyPartLayerRaw, BodyPartRaw, BpAppearanceModifier, BuildingDefinition,
    BuildingList, BuildingSnapshot, BuildingType, CasteRaw, CloudCover, ColorDefinition,
    CreatureRaw, CreatureRawList, EmptyMessage, HashReport, KeyboardEvent, MapInfo, MatPair,
    MaterialDefinition, MaterialList, PlantDetail, PlantList, PlantRaw, PlantRawList,
    RegionDetailGrid, RegionMaps, RegionTile, RiverEdge, RiverTile, RoomExtents, ScreenCapture,
    ScreenTile, SizeInfo, TileCodes, TiletypeDefinition, TiletypeList, TissueRaw, UnitAppearance,
    UnitList, UnitSnapshot, ViewInfo, WireCellRecord, WorldMap,
};
pub use rpc::{Method, RpcRequest, RpcResponse};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for every exported type.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        // Coordinates
        let _ = crate::coords::CellCoord::export_all();
        let _ = crate::coords::TileCoord::export_all();
        let _ = crate::coords::RegionQueryWindow::export_all();

        // Enums
        let _ = crate::enums::TiletypeShape::export_all();
        let _ = crate::enums::TiletypeMaterial::export_all();
        let _ = crate::enums::TiletypeSpecial::export_all();
        let _ = crate::enums::TiletypeVariant::export_all();
        let _ = crate::enums::TileDigDesignation::export_all();
        let _ = crate::enums::BuildingDirection::export_all();
        let _ = crate::enums::WorldPoles::export_all();

        // Records
        let _ = crate::records::MaterialList::export_all();
        let _ = crate::records::TiletypeList::export_all();
        let _ = crate::records::BuildingList::export_all();
        let _ = crate::records::BlockList::export_all();
        let _ = crate::records::PlantList::export_all();
        let _ = crate::records::HashReport::export_all();
        let _ = crate::records::UnitList::export_all();
        let _ = crate::records::ViewInfo::export_all();
        let _ = crate::records::MapInfo::export_all();
        let _ = crate::records::WorldMap::export_all();
        let _ = crate::records::RegionMaps::export_all();
        let _ = crate::records::CreatureRawList::export_all();
        let _ = crate::records::PlantRawList::export_all();
        let _ = crate::records::ScreenCapture::export_all();
        let _ = crate::records::KeyboardEvent::export_all();
        let _ = crate::records::EmptyMessage::export_all();

        // Operations
        let _ = crate::rpc::Method::export_all();
    }
}
