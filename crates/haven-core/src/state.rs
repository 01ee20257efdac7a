//! The controller's live state aggregate.
//!
//! A single [`ControllerState`] instance exists for the lifetime of the
//! process, owned by the store in `haven-store`. Serde field names match the
//! wire snapshot served by `GET /status`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Operating mode of the controller.
///
/// In [`Mode::Auto`] the control loop may drive the actuators from sensed
/// conditions and occupancy; in [`Mode::Manual`] actuators change only
/// through direct API calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Policies in the control loop may mutate actuator state.
    #[default]
    Auto,
    /// Actuator state is driven exclusively by API clients.
    Manual,
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("manual") {
            Ok(Self::Manual)
        } else {
            Err(CoreError::InvalidMode(s.to_string()))
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// Full controller state: sensed conditions, actuator state, and mode.
///
/// Every field is readable at any time through a single consistent snapshot;
/// the mutual-exclusion discipline lives in `haven-store`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Last sensed temperature in degrees Celsius.
    #[serde(rename = "temp")]
    pub temperature: f64,
    /// Last sensed relative humidity in percent.
    pub humidity: f64,
    /// Last reported occupancy from the external presence source.
    pub presence: bool,
    /// Fan state as believed by the controller.
    pub fan: bool,
    /// Light state as believed by the controller.
    pub light: bool,
    /// Whether automatic policies may drive the actuators.
    pub mode: Mode,
    /// Setpoint for the fan hysteresis, degrees Celsius.
    #[serde(rename = "target_temp")]
    pub target_temperature: f64,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            presence: false,
            fan: false,
            light: false,
            mode: Mode::Auto,
            target_temperature: 23.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("auto".parse::<Mode>().unwrap(), Mode::Auto);
        assert_eq!("MANUAL".parse::<Mode>().unwrap(), Mode::Manual);
        assert_eq!("Auto".parse::<Mode>().unwrap(), Mode::Auto);
    }

    #[test]
    fn mode_rejects_unknown_values() {
        assert_eq!(
            "eco".parse::<Mode>(),
            Err(CoreError::InvalidMode("eco".into()))
        );
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn default_state_is_auto_with_23_degree_setpoint() {
        let state = ControllerState::default();
        assert_eq!(state.mode, Mode::Auto);
        assert!((state.target_temperature - 23.0).abs() < f64::EPSILON);
        assert!(!state.fan && !state.light && !state.presence);
    }

    #[test]
    fn snapshot_serializes_with_wire_field_names() {
        let state = ControllerState::default();
        let json = serde_json::to_value(state).unwrap();

        assert_eq!(json["temp"], 0.0);
        assert_eq!(json["humidity"], 0.0);
        assert_eq!(json["presence"], false);
        assert_eq!(json["fan"], false);
        assert_eq!(json["light"], false);
        assert_eq!(json["mode"], "auto");
        assert_eq!(json["target_temp"], 23.0);
    }
}
