//! Outbound actuator directives.
//!
//! Commands are transient set-to-value directives encoded as `NAME:VALUE`
//! lines for the serial peripheral. They carry no retry state and no
//! acknowledgement is ever expected.

use std::fmt;

use crate::error::CoreError;

/// An actuator addressable on the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuator {
    /// The cooling fan.
    Fan,
    /// The room light (wire name `LED`).
    Led,
}

impl Actuator {
    /// The name used on the serial wire.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Fan => "FAN",
            Self::Led => "LED",
        }
    }
}

/// A named actuator directive with a binary payload.
///
/// Commands are idempotent: dispatching the same value twice is harmless,
/// which is why no ordering guarantee is needed between concurrent senders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundCommand {
    /// The actuator being driven.
    pub actuator: Actuator,
    /// The requested state.
    pub on: bool,
}

impl OutboundCommand {
    /// Create a command for the given actuator.
    #[must_use]
    pub const fn new(actuator: Actuator, on: bool) -> Self {
        Self { actuator, on }
    }

    /// Command the fan on or off.
    #[must_use]
    pub const fn fan(on: bool) -> Self {
        Self::new(Actuator::Fan, on)
    }

    /// Command the light on or off.
    #[must_use]
    pub const fn light(on: bool) -> Self {
        Self::new(Actuator::Led, on)
    }

    /// Encode as a wire line, terminator included.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for OutboundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.actuator.wire_name(),
            u8::from(self.on)
        )
    }
}

/// Parse an API switch token (`on`/`off`, case-insensitive) into a boolean.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSwitch`] for any other value.
pub fn parse_switch(value: &str) -> Result<bool, CoreError> {
    if value.eq_ignore_ascii_case("on") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("off") {
        Ok(false)
    } else {
        Err(CoreError::InvalidSwitch(value.to_string()))
    }
}
