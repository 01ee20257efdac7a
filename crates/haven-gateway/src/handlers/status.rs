//! Full state snapshot endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use haven_core::ControllerState;
use haven_serial::CommandSink;

use crate::state::AppState;

/// `GET /status`: return a consistent snapshot of the controller state.
pub async fn status<C: CommandSink>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<ControllerState> {
    Json(state.store.snapshot())
}
