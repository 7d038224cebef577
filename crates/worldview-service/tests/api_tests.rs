//! Integration tests for the query service HTTP endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` without
//! starting a TCP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use worldview_core::config::{SimulationConfig, SyncConfig};
use worldview_core::{SimulationGate, StepControl};
use worldview_service::router::build_router;
use worldview_service::state::AppState;
use worldview_world::{DemoParams, MemoryWorld, create_demo_world};

fn make_state(world: MemoryWorld) -> Arc<AppState<MemoryWorld>> {
    let gate = Arc::new(SimulationGate::new(world));
    Arc::new(AppState::new(gate, SyncConfig::default()))
}

fn demo_state() -> Arc<AppState<MemoryWorld>> {
    make_state(create_demo_world(&DemoParams::default()).unwrap())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn rpc(router: Router, method: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(format!("/rpc/{method}"))
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

const WHOLE_DEMO_MAP: &str =
    r#"{"min_x":0,"min_y":0,"min_z":0,"max_x":4,"max_y":4,"max_z":8}"#;

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let app = build_router(demo_state());

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

async fn index_text(app: Router) -> String {
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_shows_loop_status() {
    let gate = Arc::new(SimulationGate::new(
        create_demo_world(&DemoParams::default()).unwrap(),
    ));
    assert!(index_text(build_router(demo_state())).await.contains("DETACHED"));

    let control = Arc::new(StepControl::new(&SimulationConfig::default()));
    let state = Arc::new(
        AppState::new(gate, SyncConfig::default()).with_control(Arc::clone(&control)),
    );
    assert!(index_text(build_router(Arc::clone(&state))).await.contains("RUNNING"));

    control.request_stop();
    assert!(index_text(build_router(state)).await.contains("STOPPING"));
}

#[tokio::test]
async fn test_list_methods() {
    let app = build_router(demo_state());

    let response = app
        .oneshot(Request::get("/api/methods").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 20);
    assert_eq!(json[0]["method"], "GetMaterialList");
    assert_eq!(json[5]["input"], "Window");
}

#[tokio::test]
async fn test_material_list() {
    let (status, json) = rpc(build_router(demo_state()), "GetMaterialList", "").await;
    assert_eq!(status, StatusCode::OK);
    let materials = json["material_list"].as_array().unwrap();
    assert!(materials.iter().any(|m| m["id"] == "INORGANIC:GRANITE"));
}

#[tokio::test]
async fn test_block_list_second_call_is_empty() {
    let state = demo_state();

    let (status, first) = rpc(build_router(state.clone()), "GetBlockList", WHOLE_DEMO_MAP).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!first["map_blocks"].as_array().unwrap().is_empty());
    assert_eq!(first["map_x"], 24);

    let (status, second) = rpc(build_router(state.clone()), "GetBlockList", WHOLE_DEMO_MAP).await;
    assert_eq!(status, StatusCode::OK);
    assert!(second["map_blocks"].as_array().unwrap().is_empty());

    let (status, ack) = rpc(build_router(state.clone()), "ResetMapHashes", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, serde_json::json!({}));

    let (_, third) = rpc(build_router(state), "GetBlockList", WHOLE_DEMO_MAP).await;
    assert_eq!(
        third["map_blocks"].as_array().unwrap().len(),
        first["map_blocks"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_unknown_method_returns_404() {
    let (status, json) = rpc(build_router(demo_state()), "GetEverything", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_bad_window_body_returns_400() {
    let (status, json) = rpc(build_router(demo_state()), "GetBlockList", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("invalid request"));
}

#[tokio::test]
async fn test_inverted_window_returns_400() {
    let body = r#"{"min_x":4,"min_y":0,"min_z":0,"max_x":0,"max_y":4,"max_z":1}"#;
    let (status, json) = rpc(build_router(demo_state()), "GetBlockList", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("invalid region"));
}

#[tokio::test]
async fn test_unloaded_world_returns_503_for_map_operations() {
    let state = make_state(MemoryWorld::new());

    let (status, _) = rpc(build_router(state.clone()), "GetMapInfo", "").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = rpc(build_router(state.clone()), "GetWorldMap", "").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, json) = rpc(build_router(state), "GetMaterialList", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["material_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_keyboard_event_is_queued() {
    let state = demo_state();
    let body = r#"{"event_type":2,"which":0,"state":1,"scancode":30,"sym":97,"modifiers":0,"unicode":97}"#;

    let (status, _) = rpc(build_router(state.clone()), "PassKeyboardEvent", body).await;
    assert_eq!(status, StatusCode::OK);

    let world = state.dispatcher.gate().suspend().await;
    let keys: Vec<u32> = world.pending_keys().map(|k| k.sym).collect();
    assert_eq!(keys, vec![97]);
}

#[tokio::test]
async fn test_world_map_and_regions() {
    let state = demo_state();

    let (status, map) = rpc(build_router(state.clone()), "GetWorldMap", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["world_width"], 17);
    assert_eq!(map["elevation"].as_array().unwrap().len(), 289);

    let (status, regions) = rpc(build_router(state), "GetRegionMapsNew", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(regions["region_maps"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_calls_are_counted() {
    let state = demo_state();
    let _ = rpc(build_router(state.clone()), "GetViewInfo", "").await;
    let _ = rpc(build_router(state.clone()), "CopyScreen", "").await;
    assert_eq!(state.dispatcher.calls(), 2);
    assert_eq!(state.dispatcher.gate().suspensions(), 2);
}
