//! Automatic control loop for the haven controller.
//!
//! Once a second (by default) the loop takes one consistent snapshot of the
//! controller state and reconciles the actuators against it:
//!
//! - **Light** follows the occupancy signal from the presence source
//! - **Fan** follows temperature with a hysteresis dead-band around the
//!   setpoint, so it does not oscillate when the reading hovers there
//!
//! The loop only ever acts in auto mode; in manual mode it observes and
//! does nothing, leaving the actuators to API clients. Decisions write the
//! store first and dispatch the matching command afterwards, so the next
//! tick sees the state it just applied instead of re-triggering the same
//! transition.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auto;
pub mod config;

pub use auto::AutoControl;
pub use config::ControlConfig;
