//! Fire-and-forget command dispatch.
//!
//! Callers hand commands to a bounded queue feeding the serial manager's
//! single sender loop. Dispatch never blocks the caller: if the queue is
//! full the command is dropped, which is acceptable because commands are
//! idempotent set-to-value directives and the next policy tick re-issues
//! whatever still applies.

use std::sync::Arc;

use haven_core::OutboundCommand;
use tokio::sync::mpsc;

/// The boundary components use to emit actuator commands.
///
/// Implementations must not block; no ordering guarantee is made between
/// dispatches issued concurrently from different components.
pub trait CommandSink: Send + Sync {
    /// Hand a command over for best-effort delivery.
    fn dispatch(&self, command: OutboundCommand);
}

impl<T: CommandSink + ?Sized> CommandSink for Arc<T> {
    fn dispatch(&self, command: OutboundCommand) {
        (**self).dispatch(command);
    }
}

/// Cloneable producer handle for the command queue.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    tx: mpsc::Sender<OutboundCommand>,
}

impl CommandSink for CommandDispatcher {
    fn dispatch(&self, command: OutboundCommand) {
        if let Err(error) = self.tx.try_send(command) {
            tracing::warn!(%command, %error, "command queue full, dropping command");
        }
    }
}

/// Create the bounded command queue.
///
/// Returns the dispatcher handle for producers and the receiver the
/// [`crate::SerialManager`] drains.
#[must_use]
pub fn command_channel(capacity: usize) -> (CommandDispatcher, mpsc::Receiver<OutboundCommand>) {
    let (tx, rx) = mpsc::channel(capacity);
    (CommandDispatcher { tx }, rx)
}
