//! End-to-end smoke tests for the full homegated stack.
//!
//! Each test spins up the complete application (JSON store in a temporary
//! directory, virtual discovery, real services, real axum router) and
//! exercises the HTTP layer via `tower::ServiceExt::oneshot`. No TCP port
//! is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use homegate_adapter_http_axum::router;
use homegate_adapter_http_axum::state::AppState;
use homegate_adapter_storage_json::JsonFileDeviceRepository;
use homegate_adapter_virtual::VirtualDiscovery;
use homegate_app::latency::SimulatedLatency;
use homegate_app::registry::{CapabilityRegistry, ConnectionRegistry};
use homegate_app::services::{CommandDispatcher, DeviceService, DiscoveryService};
use homegate_domain::device::DeviceType;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const TV: &str = "5e0f8a2c-41d7-4b0e-9c3a-000000010035";
const FIRST_AC: &str = "5e0f8a2c-41d7-4b0e-9c3a-000000010033";
const FIRST_LIGHT: &str = "5e0f8a2c-41d7-4b0e-9c3a-000000010036";

/// Build a fully-wired router backed by a JSON store in `dir`.
async fn app_with(dir: &TempDir, capabilities: CapabilityRegistry) -> axum::Router {
    let repo = JsonFileDeviceRepository::open(dir.path())
        .await
        .expect("json store should initialise");
    let registry = Arc::new(ConnectionRegistry::new(
        capabilities,
        SimulatedLatency::none(),
    ));
    let state = AppState::new(
        CommandDispatcher::new(Arc::clone(&registry)),
        DeviceService::new(repo),
        DiscoveryService::new(VirtualDiscovery::new(Duration::ZERO), registry),
    );
    router::build(state)
}

async fn app(dir: &TempDir) -> axum::Router {
    app_with(dir, CapabilityRegistry::default()).await
}

async fn call(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn perform(app: &axum::Router, uuid: &str, action: &str, args: Value) -> (StatusCode, Value) {
    call(
        app,
        post(
            &format!("/api/v1/actions/perform/{uuid}"),
            &json!({ "action": action, "args": args }),
        ),
    )
    .await
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let dir = tempfile::tempdir().unwrap();
    let resp = app(&dir).await.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Discovery and actions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_not_find_devices_before_first_scan() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;
    let (status, body) = call(&app, get(&format!("/api/v1/actions/get-status/{TV}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "NOT_FOUND");
}

#[tokio::test]
async fn should_discover_simulated_network() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;
    let (status, body) = call(&app, get("/api/v1/devices/discover")).await;
    assert_eq!(status, StatusCode::OK);
    let devices = body.as_array().unwrap();
    assert_eq!(devices.len(), 7);
    assert!(devices.iter().all(|d| d["isAdded"] == false));
    let tv = devices.iter().find(|d| d["uuid"] == TV).unwrap();
    assert_eq!(tv["ip"], "192.168.1.35");
    assert_eq!(tv["servicePort"], 80);
}

#[tokio::test]
async fn should_drive_devices_after_scan() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;
    call(&app, get("/api/v1/devices/discover")).await;

    // AC: out of range leaves state intact, valid value commits
    let (status, body) = perform(&app, FIRST_AC, "setTemperature", json!(40)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Value out of range. Value must be 18 <= value <= 32");
    let (status, body) = perform(&app, FIRST_AC, "setTemperature", json!([20])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(20));
    let (_, state) = call(&app, get(&format!("/api/v1/actions/get-status/{FIRST_AC}"))).await;
    assert_eq!(state["temp"], 20);
    assert_eq!(state["fanSpeed"], "AUTO");

    // TV: mute toggles once per key press
    perform(&app, TV, "keyPress", json!("Mute")).await;
    let (_, state) = call(&app, get(&format!("/api/v1/actions/get-status/{TV}"))).await;
    assert_eq!(state["isMuted"], true);

    // Light: invalid color format
    let (status, body) = perform(&app, FIRST_LIGHT, "setColor", json!("#ZZZZZZ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid format of value. Format must be any of [Hex Color String]"
    );
    let (status, _) = perform(&app, FIRST_LIGHT, "setColor", json!("#112233")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, state) = call(&app, get(&format!("/api/v1/actions/get-status/{FIRST_LIGHT}"))).await;
    assert_eq!(state["color"], "#112233");
}

#[tokio::test]
async fn should_reject_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;
    call(&app, get("/api/v1/devices/discover")).await;
    let (status, body) = perform(&app, TV, "selfDestruct", Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn should_fail_with_server_error_for_disabled_device_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with(&dir, CapabilityRegistry::new([DeviceType::Ac, DeviceType::Light])).await;
    call(&app, get("/api/v1/devices/discover")).await;
    let (status, body) = call(&app, get(&format!("/api/v1/actions/get-status/{TV}"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["reason"], "INTERNAL_SERVER_ERROR");
}

// ---------------------------------------------------------------------------
// API: saved devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_saved_device_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir).await;

    let add = json!({
        "name": "Living Room TV",
        "uuid": TV,
        "type": "TV",
        "ip": "192.168.1.35",
        "servicePort": 80,
    });
    let (status, body) = call(&app, post("/api/v1/devices", &add)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["device"]["deviceMeta"]["uuid"], TV);

    let (status, body) = call(&app, get("/api/v1/devices")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = call(&app, get("/api/v1/devices/discover")).await;
    let tv = body.as_array().unwrap().iter().find(|d| d["uuid"] == TV).unwrap().clone();
    assert_eq!(tv["isAdded"], true);

    let (status, body) = call(&app, post("/api/v1/devices", &add)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "DEVICE_ALREADY_ADDED");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/devices/{TV}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _) = call(&app, get(&format!("/api/v1/devices/{TV}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_keep_saved_devices_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    {
        let app = app(&dir).await;
        let add = json!({
            "name": "Kitchen Light",
            "uuid": FIRST_LIGHT,
            "type": "Light",
            "ip": "192.168.1.36",
            "servicePort": 3001,
        });
        let (status, _) = call(&app, post("/api/v1/devices", &add)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let app = app(&dir).await;
    let (status, body) = call(&app, get("/api/v1/devices/by-name/Kitchen%20Light")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deviceMeta"]["uuid"], FIRST_LIGHT);
}
