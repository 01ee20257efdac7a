//! Haven controller daemon.
//!
//! This is the main entry point for the controller. It wires the state
//! store, serial transport manager, automatic control loop, and HTTP
//! control surface together, and tears all of them down deterministically
//! on ctrl-c via a shared cancellation token.
//!
//! Configuration comes from the environment:
//!
//! - `LISTEN_ADDR` - HTTP listen address (default `0.0.0.0:5000`)
//! - `SERIAL_PORT` - serial device path (default `/dev/serial0`)
//! - `BAUD_RATE` - serial baud rate (default `9600`)

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haven_control::{AutoControl, ControlConfig};
use haven_gateway::{create_router, AppState, GatewayConfig};
use haven_serial::{command_channel, LinkMonitor, SerialConfig, SerialManager, TtyOpener};
use haven_store::StateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,haven=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting haven controller");

    // Load configuration from environment
    let mut gateway_config = GatewayConfig::default();
    if let Ok(listen_addr) = std::env::var("LISTEN_ADDR") {
        gateway_config.listen_addr = listen_addr;
    }

    let mut serial_config = SerialConfig::default();
    if let Ok(port) = std::env::var("SERIAL_PORT") {
        serial_config.port = port;
    }
    if let Some(baud_rate) = std::env::var("BAUD_RATE").ok().and_then(|v| v.parse().ok()) {
        serial_config.baud_rate = baud_rate;
    }

    tracing::info!(
        listen_addr = %gateway_config.listen_addr,
        port = %serial_config.port,
        baud_rate = serial_config.baud_rate,
        "Configuration loaded"
    );

    // Shared state and command queue
    let store = StateStore::new();
    let monitor = LinkMonitor::new();
    let (dispatcher, command_rx) = command_channel(serial_config.command_queue_capacity);
    let shutdown = CancellationToken::new();

    // Serial transport manager
    let opener = TtyOpener::from_config(&serial_config);
    let manager = SerialManager::new(
        opener,
        store.clone(),
        monitor.clone(),
        command_rx,
        serial_config,
    );
    let serial_task = tokio::spawn(manager.run(shutdown.clone()));

    // Automatic control loop
    let control = AutoControl::new(store.clone(), dispatcher.clone(), ControlConfig::default());
    let control_task = tokio::spawn(control.run(shutdown.clone()));
    tracing::info!("Serial manager and control loop started");

    // HTTP control surface
    let listen_addr = gateway_config.listen_addr.clone();
    let state = AppState::new(store, Arc::new(dispatcher), monitor, gateway_config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(listen_addr = %listen_addr, "HTTP control surface ready");

    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
                shutdown.cancel();
            }
        })
        .await?;

    // The token is already cancelled; wait for the loops to wind down.
    shutdown.cancel();
    let _ = serial_task.await;
    let _ = control_task.await;
    tracing::info!("Controller stopped");

    Ok(())
}
