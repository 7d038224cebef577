//! Operation bodies.
//!
//! Each body runs synchronously inside one suspension and reads the world
//! only through [`WorldAccess`]. [`run`] routes a call to its body.
//!
//! - [`defs`] -- Material, item, growth, tile type, building definitions
//! - [`blocks`] -- Changed cells, plants, checksum maintenance
//! - [`units`] -- Units on the map
//! - [`view`] -- View, map metadata, screen, keyboard
//! - [`world_map`] -- Macro-region map and stitched region grids
//! - [`raws`] -- Creature and plant raws

pub mod blocks;
pub mod defs;
pub mod raws;
pub mod units;
pub mod view;
pub mod world_map;

use worldview_core::config::SyncConfig;
use worldview_types::{
    EmptyMessage, KeyboardEvent, Method, RegionQueryWindow, RpcRequest, RpcResponse,
};
use worldview_world::{InputSink, WorldAccess};

use crate::error::RpcError;
use crate::state::ServiceCaches;

/// Convert a list position to a wire index.
pub(crate) fn wire_index(i: usize) -> i32 {
    i32::try_from(i).unwrap_or(i32::MAX)
}

fn window(method: Method, request: RpcRequest) -> Result<RegionQueryWindow, RpcError> {
    match request {
        RpcRequest::Window(window) => Ok(window),
        RpcRequest::Empty | RpcRequest::Keyboard(_) => Err(RpcError::InvalidRequest(format!(
            "{method} expects a query window"
        ))),
    }
}

fn keyboard(method: Method, request: RpcRequest) -> Result<KeyboardEvent, RpcError> {
    match request {
        RpcRequest::Keyboard(event) => Ok(event),
        RpcRequest::Empty | RpcRequest::Window(_) => Err(RpcError::InvalidRequest(format!(
            "{method} expects a keyboard event"
        ))),
    }
}

/// Run the body of one operation.
pub fn run<W: WorldAccess + InputSink>(
    world: &mut W,
    caches: &mut ServiceCaches,
    sync: &SyncConfig,
    method: Method,
    request: RpcRequest,
) -> Result<RpcResponse, RpcError> {
    let response = match method {
        Method::GetMaterialList => RpcResponse::Materials(defs::material_list(world)),
        Method::GetItemList => RpcResponse::Materials(defs::item_list(world)),
        Method::GetGrowthList => RpcResponse::Materials(defs::growth_list(world)),
        Method::GetTiletypeList => RpcResponse::Tiletypes(defs::tiletype_list(world)),
        Method::GetBuildingDefList => RpcResponse::Buildings(caches.building_defs(world)),
        Method::GetBlockList => {
            let window = window(method, request)?;
            RpcResponse::Blocks(blocks::block_list(
                world,
                &mut caches.tracker,
                &window,
                sync,
            )?)
        }
        Method::GetPlantList => {
            let window = window(method, request)?;
            RpcResponse::Plants(blocks::plant_list(world, &window)?)
        }
        Method::GetUnitList => RpcResponse::Units(units::unit_list(world)),
        Method::CheckHashes => RpcResponse::Hashes(blocks::check_hashes(world)),
        Method::ResetMapHashes => {
            blocks::reset_hashes(&mut caches.tracker);
            RpcResponse::Ack(EmptyMessage {})
        }
        Method::GetViewInfo => RpcResponse::View(view::view_info(world)),
        Method::GetMapInfo => RpcResponse::Map(view::map_info(world)?),
        Method::GetWorldMap => RpcResponse::World(Box::new(world_map::world_map(world)?)),
        Method::GetWorldMapCenter => {
            RpcResponse::World(Box::new(world_map::world_map_center(world)?))
        }
        Method::GetRegionMaps | Method::GetRegionMapsNew => {
            RpcResponse::Regions(world_map::region_maps(world)?)
        }
        Method::GetCreatureRaws => RpcResponse::Creatures(raws::creature_raws(world)),
        Method::GetPlantRaws => RpcResponse::PlantRaws(raws::plant_raws(world)),
        Method::CopyScreen => RpcResponse::Screen(view::copy_screen(world)),
        Method::PassKeyboardEvent => {
            view::pass_keyboard_event(world, keyboard(method, request)?);
            RpcResponse::Ack(EmptyMessage {})
        }
    };
    Ok(response)
}
