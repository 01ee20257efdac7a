//! Control loop configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the automatic control loop.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlConfig {
    /// Decision cadence, in milliseconds.
    #[serde(default = "ControlConfig::default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Gap in degrees between the fan's turn-on threshold (above the
    /// setpoint) and turn-off threshold (below it).
    #[serde(default = "ControlConfig::default_hysteresis_band")]
    pub hysteresis_band: f64,
}

impl ControlConfig {
    const fn default_tick_interval_ms() -> u64 {
        1000
    }

    const fn default_hysteresis_band() -> f64 {
        1.0
    }

    /// Get the tick interval as a `Duration`.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::default_tick_interval_ms(),
            hysteresis_band: Self::default_hysteresis_band(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ControlConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!((config.hysteresis_band - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ControlConfig = serde_json::from_str(r#"{"tick_interval_ms": 250}"#).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert!((config.hysteresis_band - 1.0).abs() < f64::EPSILON);
    }
}
