//! Mutex-guarded state store for the haven controller.
//!
//! This crate owns the single live [`ControllerState`] and enforces the
//! concurrency contract every other component relies on:
//!
//! - [`StateStore::snapshot`] returns a consistent point-in-time copy
//! - [`StateStore::mutate`] applies one field-level change under exclusive
//!   access and returns once applied
//!
//! All readers and writers (HTTP handlers, the serial reader, the control
//! loop, the presence source) go through these two operations. The store
//! never hands out a reference into the guarded value, so no caller can hold
//! the lock across an await point or an I/O call.
//!
//! # Example
//!
//! ```
//! use haven_store::StateStore;
//!
//! let store = StateStore::new();
//! store.mutate(|state| state.fan = true);
//! assert!(store.snapshot().fan);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::sync::Arc;

use parking_lot::Mutex;

use haven_core::{ControllerState, Telemetry};

/// A cloneable handle to the controller's shared state.
///
/// Clones share the same underlying state; the handle is cheap to pass to
/// every component constructor.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    inner: Arc<Mutex<ControllerState>>,
}

impl StateStore {
    /// Create a store holding the default state (auto mode, 23.0 setpoint).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an explicit initial state.
    #[must_use]
    pub fn with_state(state: ControllerState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Return a consistent point-in-time copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> ControllerState {
        *self.inner.lock()
    }

    /// Apply a single change under exclusive access.
    ///
    /// The closure runs with the lock held; callers must not perform I/O or
    /// block inside it. Dispatching a command that corresponds to the change
    /// happens after this returns.
    pub fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut ControllerState),
    {
        f(&mut self.inner.lock());
    }

    /// Record the occupancy value reported by the external presence source.
    ///
    /// This is the entire coupling surface offered to the vision subsystem.
    pub fn set_presence(&self, present: bool) {
        self.mutate(|state| state.presence = present);
    }

    /// Apply every present field of a telemetry record in one critical
    /// section.
    ///
    /// The echoed `led`/`fan` flags overwrite the stored actuator state so
    /// the controller tracks ground truth when the peripheral is changed
    /// locally (IR remote, physical switch).
    pub fn apply(&self, telemetry: &Telemetry) {
        self.mutate(|state| {
            if let Some(temp) = telemetry.temp {
                state.temperature = temp;
            }
            if let Some(humidity) = telemetry.humidity {
                state.humidity = humidity;
            }
            if let Some(light) = telemetry.led {
                state.light = light;
            }
            if let Some(fan) = telemetry.fan {
                state.fan = fan;
            }
        });
        tracing::trace!(?telemetry, "telemetry applied");
    }
}
