//! Link health and protocol diagnostics.
//!
//! Discarded telemetry lines and dropped commands are not surfaced to API
//! clients; they are counted here so the health endpoint and operators can
//! see a flapping link or a noisy peripheral.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Lifecycle state of the serial link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// No link; waiting out the backoff interval.
    #[default]
    Disconnected,
    /// An open attempt is in flight.
    Connecting,
    /// The link is up and being read.
    Connected,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connecting => f.write_str("connecting"),
            Self::Connected => f.write_str("connected"),
        }
    }
}

#[derive(Debug, Default)]
struct MonitorInner {
    state: RwLock<LinkState>,
    telemetry_accepted: AtomicU64,
    telemetry_rejected: AtomicU64,
    commands_dropped: AtomicU64,
    last_telemetry_at: RwLock<Option<DateTime<Utc>>>,
}

/// Cloneable handle to shared link diagnostics.
///
/// The serial manager writes; anyone holding a clone may read.
#[derive(Debug, Clone, Default)]
pub struct LinkMonitor {
    inner: Arc<MonitorInner>,
}

impl LinkMonitor {
    /// Create a monitor reporting a disconnected link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current link state.
    #[must_use]
    pub fn state(&self) -> LinkState {
        *self.inner.state.read()
    }

    /// Number of telemetry lines decoded and applied.
    #[must_use]
    pub fn telemetry_accepted(&self) -> u64 {
        self.inner.telemetry_accepted.load(Ordering::Relaxed)
    }

    /// Number of lines discarded by framing or decode.
    #[must_use]
    pub fn telemetry_rejected(&self) -> u64 {
        self.inner.telemetry_rejected.load(Ordering::Relaxed)
    }

    /// Number of commands dropped because the link was down.
    #[must_use]
    pub fn commands_dropped(&self) -> u64 {
        self.inner.commands_dropped.load(Ordering::Relaxed)
    }

    /// Timestamp of the last applied telemetry record.
    #[must_use]
    pub fn last_telemetry_at(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_telemetry_at.read()
    }

    pub(crate) fn set_state(&self, state: LinkState) {
        *self.inner.state.write() = state;
    }

    pub(crate) fn record_accepted(&self) {
        self.inner.telemetry_accepted.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_telemetry_at.write() = Some(Utc::now());
    }

    pub(crate) fn record_rejected(&self) {
        self.inner.telemetry_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped_command(&self) {
        self.inner.commands_dropped.fetch_add(1, Ordering::Relaxed);
    }
}
