//! Core types for the haven home-environment controller.
//!
//! This crate provides the domain types shared by every other crate:
//!
//! - **State**: the [`ControllerState`] aggregate and the [`Mode`] flag
//! - **Commands**: outbound actuator directives for the serial peripheral
//! - **Telemetry**: decoded inbound sensor/actuator records
//! - **Errors**: parse failures for API-facing enumerated values
//!
//! Nothing here performs I/O; the concurrency discipline around these types
//! lives in `haven-store` and `haven-serial`.
//!
//! # Example
//!
//! ```
//! use haven_core::{Actuator, ControllerState, Mode, OutboundCommand};
//!
//! let state = ControllerState::default();
//! assert_eq!(state.mode, Mode::Auto);
//!
//! let cmd = OutboundCommand::new(Actuator::Fan, true);
//! assert_eq!(cmd.encode(), "FAN:1\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod error;
pub mod state;
pub mod telemetry;

pub use command::{parse_switch, Actuator, OutboundCommand};
pub use error::{CoreError, Result};
pub use state::{ControllerState, Mode};
pub use telemetry::Telemetry;
