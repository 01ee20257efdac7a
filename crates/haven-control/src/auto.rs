//! The tick-driven reconciliation loop.

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use haven_core::{Mode, OutboundCommand};
use haven_serial::CommandSink;
use haven_store::StateStore;

use crate::config::ControlConfig;

/// Reconciles actuator state with sensed conditions while in auto mode.
pub struct AutoControl<S: CommandSink> {
    store: StateStore,
    sink: S,
    config: ControlConfig,
}

impl<S: CommandSink> AutoControl<S> {
    /// Create a loop over the given store and command sink.
    pub fn new(store: StateStore, sink: S, config: ControlConfig) -> Self {
        Self {
            store,
            sink,
            config,
        }
    }

    /// Run ticks at the configured cadence until the token fires.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = time::interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::debug!("control loop stopped");
                    return;
                }
                _ = ticker.tick() => self.tick(),
            }
        }
    }

    /// Evaluate one decision cycle against a single consistent snapshot.
    ///
    /// Each decision mutates the store and then dispatches the matching
    /// command; nothing is dispatched while the state lock is held.
    pub fn tick(&self) {
        let snapshot = self.store.snapshot();
        if snapshot.mode == Mode::Manual {
            // Occupancy and temperature changes are observed but never
            // auto-drive the actuators in manual mode.
            return;
        }

        // Light follows presence.
        if snapshot.presence != snapshot.light {
            let desired = snapshot.presence;
            self.store.mutate(|state| state.light = desired);
            tracing::info!(
                occupied = desired,
                "presence changed, switching light"
            );
            self.sink.dispatch(OutboundCommand::light(desired));
        }

        // Fan hysteresis: on above the setpoint, off only once the reading
        // falls through the dead-band below it.
        if snapshot.temperature > snapshot.target_temperature && !snapshot.fan {
            self.store.mutate(|state| state.fan = true);
            tracing::info!(
                temperature = snapshot.temperature,
                setpoint = snapshot.target_temperature,
                "above setpoint, fan on"
            );
            self.sink.dispatch(OutboundCommand::fan(true));
        } else if snapshot.temperature < snapshot.target_temperature - self.config.hysteresis_band
            && snapshot.fan
        {
            self.store.mutate(|state| state.fan = false);
            tracing::info!(
                temperature = snapshot.temperature,
                setpoint = snapshot.target_temperature,
                "below dead-band, fan off"
            );
            self.sink.dispatch(OutboundCommand::fan(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use haven_core::Telemetry;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<OutboundCommand>>,
    }

    impl RecordingSink {
        fn sent(&self) -> Vec<OutboundCommand> {
            self.sent.lock().clone()
        }
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&self, command: OutboundCommand) {
            self.sent.lock().push(command);
        }
    }

    fn harness() -> (StateStore, Arc<RecordingSink>, AutoControl<Arc<RecordingSink>>) {
        let store = StateStore::new();
        let sink = Arc::new(RecordingSink::default());
        let control = AutoControl::new(store.clone(), Arc::clone(&sink), ControlConfig::default());
        (store, sink, control)
    }

    #[test]
    fn light_follows_presence_with_one_dispatch_per_edge() {
        let (store, sink, control) = harness();

        store.set_presence(true);
        control.tick();
        assert!(store.snapshot().light);
        assert_eq!(sink.sent(), vec![OutboundCommand::light(true)]);

        // Unchanged presence must not re-dispatch.
        control.tick();
        assert_eq!(sink.sent().len(), 1);

        store.set_presence(false);
        control.tick();
        assert!(!store.snapshot().light);
        assert_eq!(
            sink.sent(),
            vec![OutboundCommand::light(true), OutboundCommand::light(false)]
        );
    }

    #[test]
    fn fan_hysteresis_turns_on_above_target_and_off_below_the_band() {
        let (store, sink, control) = harness();
        // Default setpoint is 23.0.

        store.mutate(|s| s.temperature = 24.0);
        control.tick();
        assert!(store.snapshot().fan);
        assert_eq!(sink.sent(), vec![OutboundCommand::fan(true)]);

        // Inside the dead-band: stays on, nothing dispatched.
        store.mutate(|s| s.temperature = 22.5);
        control.tick();
        assert!(store.snapshot().fan);
        assert_eq!(sink.sent().len(), 1);

        // Through the band: exactly one off command.
        store.mutate(|s| s.temperature = 21.9);
        control.tick();
        assert!(!store.snapshot().fan);
        assert_eq!(
            sink.sent(),
            vec![OutboundCommand::fan(true), OutboundCommand::fan(false)]
        );
    }

    #[test]
    fn fan_does_not_retrigger_while_already_on() {
        let (store, sink, control) = harness();

        store.mutate(|s| s.temperature = 30.0);
        control.tick();
        control.tick();
        control.tick();

        assert!(store.snapshot().fan);
        assert_eq!(sink.sent(), vec![OutboundCommand::fan(true)]);
    }

    #[test]
    fn manual_mode_isolates_actuators_from_sensed_changes() {
        let (store, sink, control) = harness();
        store.mutate(|s| s.mode = Mode::Manual);

        store.set_presence(true);
        store.mutate(|s| s.temperature = 35.0);
        control.tick();

        let snap = store.snapshot();
        assert!(!snap.light);
        assert!(!snap.fan);
        assert!(sink.sent().is_empty());
    }

    #[test]
    fn peripheral_echo_wins_and_the_next_tick_reconciles() {
        let (store, sink, control) = harness();

        store.set_presence(true);
        control.tick();
        assert!(store.snapshot().light);

        // Someone switches the light off at the wall; the peripheral echoes
        // it. The stored state syncs to ground truth...
        let echo: Telemetry = serde_json::from_str(r#"{"led": "false"}"#).unwrap();
        store.apply(&echo);
        assert!(!store.snapshot().light);

        // ...and the next tick re-asserts the policy while the room is
        // still occupied.
        control.tick();
        assert!(store.snapshot().light);
        assert_eq!(
            sink.sent(),
            vec![OutboundCommand::light(true), OutboundCommand::light(true)]
        );
    }
}
