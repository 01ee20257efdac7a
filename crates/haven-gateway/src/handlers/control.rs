//! Validated write endpoints: actuators, mode, and setpoint.
//!
//! Each endpoint maps every malformed body (bad JSON, wrong type, missing
//! key) to its own stable 400 token, so clients see the same error shape
//! no matter how the request went wrong. Stored state is never touched on a
//! rejected request.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use haven_core::{parse_switch, Mode, OutboundCommand};
use haven_serial::CommandSink;

use crate::error::ApiError;
use crate::state::AppState;

/// Success response for all write endpoints.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    /// Always true.
    pub ok: bool,
}

const OK: OkResponse = OkResponse { ok: true };

/// Request body for the fan and light endpoints.
#[derive(Debug, Deserialize)]
pub struct SwitchRequest {
    /// `"on"` or `"off"`, case-insensitive.
    #[serde(default)]
    pub state: Option<String>,
}

/// Request body for the mode endpoint.
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    /// `"auto"` or `"manual"`, case-insensitive.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Request body for the config endpoint.
#[derive(Debug, Deserialize)]
pub struct ConfigRequest {
    /// New fan setpoint in degrees Celsius.
    #[serde(default)]
    pub target_temp: Option<f64>,
}

/// `POST /fan`: set the fan, regardless of mode.
///
/// # Errors
///
/// Returns [`ApiError::Invalid`] unless the body carries `on`/`off`.
pub async fn set_fan<C: CommandSink>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<SwitchRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let on = parse_switch_body(body)?;
    state.store.mutate(|s| s.fan = on);
    state.commands.dispatch(OutboundCommand::fan(on));
    tracing::info!(on, "fan set via api");
    Ok(Json(OK))
}

/// `POST /light`: set the light, regardless of mode.
///
/// # Errors
///
/// Returns [`ApiError::Invalid`] unless the body carries `on`/`off`.
pub async fn set_light<C: CommandSink>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<SwitchRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let on = parse_switch_body(body)?;
    state.store.mutate(|s| s.light = on);
    state.commands.dispatch(OutboundCommand::light(on));
    tracing::info!(on, "light set via api");
    Ok(Json(OK))
}

/// `POST /mode`: switch between auto and manual.
///
/// # Errors
///
/// Returns [`ApiError::InvalidMode`] unless the body carries `auto`/`manual`.
pub async fn set_mode<C: CommandSink>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<ModeRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::InvalidMode)?;
    let mode: Mode = request
        .mode
        .ok_or(ApiError::InvalidMode)?
        .parse()?;
    state.store.mutate(|s| s.mode = mode);
    tracing::info!(%mode, "mode set via api");
    Ok(Json(OK))
}

/// `POST /config`: set the fan setpoint.
///
/// # Errors
///
/// Returns [`ApiError::MissingTargetTemp`] when `target_temp` is missing or
/// not a number.
pub async fn set_config<C: CommandSink>(
    State(state): State<Arc<AppState<C>>>,
    body: Result<Json<ConfigRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::MissingTargetTemp)?;
    let target = request.target_temp.ok_or(ApiError::MissingTargetTemp)?;
    state.store.mutate(|s| s.target_temperature = target);
    tracing::info!(target_temp = target, "setpoint set via api");
    Ok(Json(OK))
}

/// Validate a switch body down to a boolean.
fn parse_switch_body(body: Result<Json<SwitchRequest>, JsonRejection>) -> Result<bool, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::Invalid)?;
    let value = request.state.ok_or(ApiError::Invalid)?;
    Ok(parse_switch(&value)?)
}
