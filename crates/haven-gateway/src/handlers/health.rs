//! Health and link diagnostics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use haven_serial::{CommandSink, LinkState};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status; the process is healthy whenever it can answer.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Current serial link state.
    pub serial: LinkState,
    /// Telemetry lines decoded and applied.
    pub telemetry_accepted: u64,
    /// Telemetry lines discarded by framing or decode.
    pub telemetry_rejected: u64,
    /// Commands dropped while the link was down.
    pub commands_dropped: u64,
    /// Timestamp of the last applied telemetry record.
    pub last_telemetry_at: Option<DateTime<Utc>>,
}

/// Health check handler.
///
/// A disconnected serial link is reported but does not fail the check: the
/// controller keeps serving stale state and accepting writes by design.
pub async fn health<C: CommandSink>(State(state): State<Arc<AppState<C>>>) -> impl IntoResponse {
    let monitor = &state.monitor;
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        serial: monitor.state(),
        telemetry_accepted: monitor.telemetry_accepted(),
        telemetry_rejected: monitor.telemetry_rejected(),
        commands_dropped: monitor.commands_dropped(),
        last_telemetry_at: monitor.last_telemetry_at(),
    };

    (StatusCode::OK, Json(response))
}
