//! Inbound telemetry records from the peripheral.
//!
//! The peripheral emits one JSON object per line with any subset of the
//! known keys. The `led`/`fan` keys echo actuator state the peripheral may
//! have changed locally (an IR remote, a physical switch) and arrive as the
//! strings `"true"`/`"false"`; some firmware revisions send real booleans,
//! so the deserializer accepts both.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An ephemeral decoded telemetry record.
///
/// Fields absent from a given line are `None` and leave the corresponding
/// controller state untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Telemetry {
    /// Sensed temperature in degrees Celsius.
    #[serde(default)]
    pub temp: Option<f64>,
    /// Sensed relative humidity in percent.
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Echoed light state.
    #[serde(default, deserialize_with = "truthy_flag")]
    pub led: Option<bool>,
    /// Echoed fan state.
    #[serde(default, deserialize_with = "truthy_flag")]
    pub fan: Option<bool>,
}

impl Telemetry {
    /// Whether the record carries no recognized fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.temp.is_none() && self.humidity.is_none() && self.led.is_none() && self.fan.is_none()
    }
}

/// Normalize an echoed actuator flag to a boolean.
///
/// Accepts a JSON boolean or the case-insensitive string `"true"`; any other
/// present value normalizes to `false`, matching how the peripheral's
/// firmware stringifies its flags.
fn truthy_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => Some(s.eq_ignore_ascii_case("true")),
        Some(_) => Some(false),
    })
}
