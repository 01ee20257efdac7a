//! The link opener seam.
//!
//! The manager never names a concrete port type; it asks a [`LinkOpener`]
//! for a fresh bidirectional byte stream on every (re)connection attempt.
//! Production uses [`TtyOpener`] over `tokio-serial`; tests script openers
//! over in-memory duplex pipes.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

use crate::config::SerialConfig;

/// Opens a fresh link to the peripheral.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    /// The byte stream produced on a successful open.
    type Link: AsyncRead + AsyncWrite + Send + Unpin;

    /// Attempt to open the link.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; the caller treats any failure as
    /// non-fatal and retries after its backoff interval.
    async fn open(&self) -> io::Result<Self::Link>;
}

/// Opens a real serial port at a fixed baud rate.
#[derive(Debug, Clone)]
pub struct TtyOpener {
    path: String,
    baud_rate: u32,
}

impl TtyOpener {
    /// Create an opener for the given device path and baud rate.
    #[must_use]
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
        }
    }

    /// Create an opener from a [`SerialConfig`].
    #[must_use]
    pub fn from_config(config: &SerialConfig) -> Self {
        Self::new(config.port.clone(), config.baud_rate)
    }
}

#[async_trait]
impl LinkOpener for TtyOpener {
    type Link = SerialStream;

    async fn open(&self) -> io::Result<SerialStream> {
        let stream = tokio_serial::new(&self.path, self.baud_rate)
            .open_native_async()
            .map_err(io::Error::other)?;
        // Whatever accumulated while we were away is stale; start clean.
        stream
            .clear(ClearBuffer::Input)
            .map_err(io::Error::other)?;
        Ok(stream)
    }
}
