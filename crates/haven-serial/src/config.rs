//! Serial link configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the serial transport manager.
#[derive(Debug, Clone, Deserialize)]
pub struct SerialConfig {
    /// Device path of the serial port (e.g. `/dev/serial0`).
    #[serde(default = "SerialConfig::default_port")]
    pub port: String,

    /// Baud rate of the link.
    #[serde(default = "SerialConfig::default_baud_rate")]
    pub baud_rate: u32,

    /// Wait between reconnection attempts, in milliseconds.
    #[serde(default = "SerialConfig::default_reconnect_backoff_ms")]
    pub reconnect_backoff_ms: u64,

    /// Capacity of the outbound command queue.
    #[serde(default = "SerialConfig::default_command_queue_capacity")]
    pub command_queue_capacity: usize,
}

impl SerialConfig {
    fn default_port() -> String {
        "/dev/serial0".to_string()
    }

    const fn default_baud_rate() -> u32 {
        9600
    }

    const fn default_reconnect_backoff_ms() -> u64 {
        2000
    }

    const fn default_command_queue_capacity() -> usize {
        32
    }

    /// Get the reconnect backoff as a `Duration`.
    #[must_use]
    pub const fn reconnect_backoff(&self) -> Duration {
        Duration::from_millis(self.reconnect_backoff_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
            baud_rate: Self::default_baud_rate(),
            reconnect_backoff_ms: Self::default_reconnect_backoff_ms(),
            command_queue_capacity: Self::default_command_queue_capacity(),
        }
    }
}
