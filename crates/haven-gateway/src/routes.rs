//! Router configuration.
//!
//! This module sets up the axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use haven_serial::CommandSink;

use crate::handlers::{control, health, status};
use crate::state::AppState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health and serial link diagnostics
/// - `GET /status` - Full state snapshot
/// - `POST /fan` - Set the fan on or off
/// - `POST /light` - Set the light on or off
/// - `POST /mode` - Switch between auto and manual
/// - `POST /config` - Set the fan setpoint
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: CommandSink + 'static,
{
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health::<C>))
        .route("/status", get(status::status::<C>))
        .route("/fan", post(control::set_fan::<C>))
        .route("/light", post(control::set_light::<C>))
        .route("/mode", post(control::set_mode::<C>))
        .route("/config", post(control::set_config::<C>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_any_origin() {
        let origins = vec!["*".to_string()];
        let _layer = build_cors_layer(&origins);
    }

    #[test]
    fn cors_specific_origins() {
        let origins = vec!["http://panel.local".to_string()];
        let _layer = build_cors_layer(&origins);
    }
}
