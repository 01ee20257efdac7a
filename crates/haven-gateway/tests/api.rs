//! End-to-end tests for the HTTP control surface.
//!
//! A recording sink stands in for the serial dispatcher so tests can assert
//! exactly which commands each endpoint emits. Delivery is best-effort by
//! contract, so nothing here waits for acknowledgements.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use parking_lot::Mutex;
use serde_json::{json, Value};

use haven_core::{Mode, OutboundCommand};
use haven_gateway::{create_router, AppState, GatewayConfig};
use haven_serial::{CommandSink, LinkMonitor};
use haven_store::StateStore;

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<OutboundCommand>>,
}

impl RecordingSink {
    fn sent(&self) -> Vec<OutboundCommand> {
        self.sent.lock().clone()
    }
}

impl CommandSink for RecordingSink {
    fn dispatch(&self, command: OutboundCommand) {
        self.sent.lock().push(command);
    }
}

fn test_server() -> (TestServer, StateStore, Arc<RecordingSink>) {
    let store = StateStore::new();
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(
        store.clone(),
        Arc::clone(&sink),
        LinkMonitor::new(),
        GatewayConfig::default(),
    );
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store, sink)
}

#[tokio::test]
async fn status_returns_the_full_snapshot_with_wire_names() {
    let (server, store, _sink) = test_server();
    store.mutate(|s| {
        s.temperature = 21.5;
        s.humidity = 44.0;
        s.presence = true;
    });

    let response = server.get("/status").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["temp"], 21.5);
    assert_eq!(body["humidity"], 44.0);
    assert_eq!(body["presence"], true);
    assert_eq!(body["fan"], false);
    assert_eq!(body["light"], false);
    assert_eq!(body["mode"], "auto");
    assert_eq!(body["target_temp"], 23.0);
}

#[tokio::test]
async fn fan_endpoint_sets_state_and_dispatches() {
    let (server, store, sink) = test_server();

    let response = server.post("/fan").json(&json!({"state": "on"})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"ok": true}));
    assert!(store.snapshot().fan);

    let response = server.post("/fan").json(&json!({"state": "OFF"})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!store.snapshot().fan);

    assert_eq!(
        sink.sent(),
        vec![OutboundCommand::fan(true), OutboundCommand::fan(false)]
    );
}

#[tokio::test]
async fn light_endpoint_overrides_even_in_manual_mode() {
    let (server, store, sink) = test_server();
    store.mutate(|s| s.mode = Mode::Manual);

    let response = server.post("/light").json(&json!({"state": "on"})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(store.snapshot().light);
    assert_eq!(sink.sent(), vec![OutboundCommand::light(true)]);
}

#[tokio::test]
async fn actuator_endpoints_reject_bad_input_without_touching_state() {
    let (server, store, sink) = test_server();

    for body in [
        json!({"state": "onn"}),
        json!({"state": "1"}),
        json!({"state": true}),
        json!({"state": null}),
        json!({}),
    ] {
        let response = server.post("/fan").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "invalid"}));
    }

    // Not JSON at all.
    let response = server
        .post("/light")
        .content_type("application/json")
        .text("not json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"error": "invalid"}));

    let snap = store.snapshot();
    assert!(!snap.fan && !snap.light);
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn mode_endpoint_sets_and_rejects() {
    let (server, store, _sink) = test_server();

    let response = server.post("/mode").json(&json!({"mode": "manual"})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(store.snapshot().mode, Mode::Manual);

    let response = server.post("/mode").json(&json!({"mode": "AUTO"})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(store.snapshot().mode, Mode::Auto);

    let response = server.post("/mode").json(&json!({"mode": "eco"})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"error": "invalid mode"}));
    assert_eq!(store.snapshot().mode, Mode::Auto);
}

#[tokio::test]
async fn config_endpoint_sets_the_setpoint_and_rejects_non_numbers() {
    let (server, store, _sink) = test_server();

    let response = server
        .post("/config")
        .json(&json!({"target_temp": 25.5}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!((store.snapshot().target_temperature - 25.5).abs() < f64::EPSILON);

    for body in [json!({}), json!({"target_temp": "warm"})] {
        let response = server.post("/config").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "missing target_temp"})
        );
    }
    assert!((store.snapshot().target_temperature - 25.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn health_reports_link_diagnostics() {
    let (server, _store, _sink) = test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["serial"], "disconnected");
    assert_eq!(body["telemetry_accepted"], 0);
    assert_eq!(body["telemetry_rejected"], 0);
    assert_eq!(body["commands_dropped"], 0);
    assert_eq!(body["last_telemetry_at"], Value::Null);
}
