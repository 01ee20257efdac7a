//! Serial transport manager and command dispatcher for the haven controller.
//!
//! This crate owns the lifecycle of the serial link to the peripheral and
//! the fire-and-forget boundary other components use to send actuator
//! commands:
//!
//! ```text
//! ┌──────────────┐   dispatch()   ┌─────────────────────────────────┐
//! │ Control loop │───────────────▶│        CommandDispatcher        │
//! │ HTTP handlers│                │      (bounded mpsc sender)      │
//! └──────────────┘                └───────────────┬─────────────────┘
//!                                                 │
//!                                                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         SerialManager                           │
//! │   Disconnected → Connecting → Connected → (I/O error) → ...     │
//! │   single task: line framing + decode in, NAME:VALUE out         │
//! └───────────────┬─────────────────────────────────┬───────────────┘
//!                 │ apply()                         │
//!                 ▼                                 ▼
//!           ┌──────────┐                      ┌───────────┐
//!           │  Store   │                      │ Peripheral│
//!           └──────────┘                      └───────────┘
//! ```
//!
//! The manager is the only reader and the only writer of the link, so
//! outbound writes are serialized without a dedicated lock and inbound
//! processing is never blocked by a slow write. Every failure on the link is
//! non-fatal: the manager degrades to reconnect-with-backoff and only exits
//! on cancellation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dispatch;
pub mod frame;
pub mod link;
pub mod manager;
pub mod monitor;

pub use config::SerialConfig;
pub use dispatch::{command_channel, CommandDispatcher, CommandSink};
pub use frame::decode_line;
pub use link::{LinkOpener, TtyOpener};
pub use manager::SerialManager;
pub use monitor::{LinkMonitor, LinkState};
