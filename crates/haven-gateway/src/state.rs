//! Gateway application state.
//!
//! This module defines the shared state available to all request handlers.

use std::sync::Arc;

use haven_serial::{CommandSink, LinkMonitor};
use haven_store::StateStore;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct AppState<C>
where
    C: CommandSink,
{
    /// The controller's shared state store.
    pub store: StateStore,
    /// Outbound actuator command sink.
    pub commands: Arc<C>,
    /// Serial link diagnostics for the health endpoint.
    pub monitor: LinkMonitor,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<C> AppState<C>
where
    C: CommandSink,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(
        store: StateStore,
        commands: Arc<C>,
        monitor: LinkMonitor,
        config: GatewayConfig,
    ) -> Self {
        Self {
            store,
            commands,
            monitor,
            config,
        }
    }
}

impl<C> Clone for AppState<C>
where
    C: CommandSink,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            commands: Arc::clone(&self.commands),
            monitor: self.monitor.clone(),
            config: self.config.clone(),
        }
    }
}
