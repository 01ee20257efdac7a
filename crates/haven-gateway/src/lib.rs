//! HTTP control surface for the haven home-environment controller.
//!
//! This crate exposes the state store to external clients and routes
//! actuator changes through the command dispatcher:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                    (HTTP, JSON bodies)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       haven-gateway                         │
//! │    ┌──────────┐  ┌─────────────┐  ┌───────────────────┐     │
//! │    │  Router  │  │  Validated  │  │   Health / link   │     │
//! │    │          │  │   writes    │  │    diagnostics    │     │
//! │    └──────────┘  └─────────────┘  └───────────────────┘     │
//! └─────────────────────────────────────────────────────────────┘
//!                │                          │
//!                ▼                          ▼
//!         ┌────────────┐            ┌──────────────┐
//!         │   Store    │            │  Dispatcher  │
//!         └────────────┘            └──────────────┘
//! ```
//!
//! Writes are atomic per call: each validated request mutates the store,
//! then dispatches the matching command outside the state lock. Fan and
//! light writes apply regardless of the current mode: manual override
//! while in auto is an intended capability, and switching the override back
//! off is just a `POST /mode`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use haven_gateway::{create_router, AppState, GatewayConfig};
//! use haven_serial::{command_channel, LinkMonitor};
//! use haven_store::StateStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StateStore::new();
//! let (dispatcher, _command_rx) = command_channel(32);
//! let state = AppState::new(
//!     store,
//!     Arc::new(dispatcher),
//!     LinkMonitor::new(),
//!     GatewayConfig::default(),
//! );
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
