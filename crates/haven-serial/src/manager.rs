//! The serial transport manager task.
//!
//! One task owns the link end to end. Its state machine:
//!
//! ```text
//! Disconnected ──open ok──▶ Connected ──I/O error / EOF──▶ Disconnected
//!      ▲                                                        │
//!      └────────────── fixed backoff, then retry ◀──────────────┘
//! ```
//!
//! While connected the task multiplexes inbound lines and outbound commands
//! in a single select loop, so writes are serialized against each other
//! without a lock and never stall reads. While the link is down, arriving
//! commands are drained and dropped: no delivery guarantee is offered, and
//! the control loop re-issues whatever still applies on its next tick.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use haven_core::OutboundCommand;
use haven_store::StateStore;

use crate::config::SerialConfig;
use crate::frame;
use crate::link::LinkOpener;
use crate::monitor::{LinkMonitor, LinkState};

/// Outcome of one connected session or backoff wait.
enum Flow {
    /// Keep cycling the connection state machine.
    Continue,
    /// The cancellation token fired; the task is done.
    Shutdown,
}

/// Owns the serial link lifecycle: connect, read, write, reconnect.
pub struct SerialManager<O: LinkOpener> {
    opener: O,
    store: StateStore,
    monitor: LinkMonitor,
    commands: mpsc::Receiver<OutboundCommand>,
    config: SerialConfig,
    commands_open: bool,
}

impl<O: LinkOpener> SerialManager<O> {
    /// Create a manager draining the given command queue into the link.
    pub fn new(
        opener: O,
        store: StateStore,
        monitor: LinkMonitor,
        commands: mpsc::Receiver<OutboundCommand>,
        config: SerialConfig,
    ) -> Self {
        Self {
            opener,
            store,
            monitor,
            commands,
            config,
            commands_open: true,
        }
    }

    /// Run until the cancellation token fires.
    ///
    /// Open failures, read errors, write errors, and EOF all loop back to a
    /// reconnection attempt after the configured backoff; nothing here is
    /// fatal.
    pub async fn run(mut self, shutdown: CancellationToken) {
        loop {
            self.monitor.set_state(LinkState::Connecting);
            match self.opener.open().await {
                Ok(link) => {
                    tracing::info!(port = %self.config.port, "serial link connected");
                    self.monitor.set_state(LinkState::Connected);
                    if matches!(self.connected(link, &shutdown).await, Flow::Shutdown) {
                        break;
                    }
                }
                Err(error) => {
                    tracing::debug!(port = %self.config.port, %error, "serial open failed");
                }
            }
            self.monitor.set_state(LinkState::Disconnected);
            if matches!(self.backoff(&shutdown).await, Flow::Shutdown) {
                break;
            }
        }
        self.monitor.set_state(LinkState::Disconnected);
        tracing::debug!("serial manager stopped");
    }

    /// Service one live link until it fails or shutdown is requested.
    async fn connected(&mut self, link: O::Link, shutdown: &CancellationToken) -> Flow {
        let (reader, mut writer) = tokio::io::split(link);
        let mut lines = BufReader::new(reader).lines();

        loop {
            tokio::select! {
                () = shutdown.cancelled() => return Flow::Shutdown,
                line = lines.next_line() => match line {
                    Ok(Some(line)) => self.handle_line(&line),
                    Ok(None) => {
                        tracing::warn!("serial link closed by peer");
                        return Flow::Continue;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "serial read failed");
                        return Flow::Continue;
                    }
                },
                command = self.commands.recv(), if self.commands_open => match command {
                    Some(command) => {
                        if let Err(error) = writer.write_all(command.encode().as_bytes()).await {
                            tracing::warn!(%command, %error, "serial write failed");
                            return Flow::Continue;
                        }
                        tracing::debug!(%command, "command sent");
                    }
                    None => self.commands_open = false,
                },
            }
        }
    }

    /// Wait out the backoff interval, dropping commands that arrive while
    /// the link is down.
    async fn backoff(&mut self, shutdown: &CancellationToken) -> Flow {
        let deadline = Instant::now() + self.config.reconnect_backoff();
        loop {
            tokio::select! {
                () = shutdown.cancelled() => return Flow::Shutdown,
                () = time::sleep_until(deadline) => return Flow::Continue,
                command = self.commands.recv(), if self.commands_open => match command {
                    Some(command) => {
                        self.monitor.record_dropped_command();
                        tracing::debug!(%command, "link down, command dropped");
                    }
                    None => self.commands_open = false,
                },
            }
        }
    }

    /// Decode and apply one inbound line.
    ///
    /// Malformed lines never stop the loop; they are counted and dropped.
    fn handle_line(&self, line: &str) {
        if let Some(telemetry) = frame::decode_line(line) {
            self.store.apply(&telemetry);
            self.monitor.record_accepted();
        } else if !line.trim().is_empty() {
            self.monitor.record_rejected();
            tracing::debug!(line, "discarded malformed telemetry line");
        }
    }
}
