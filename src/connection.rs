//! Serial handle lifecycle, isolated from rendering.
//!
//! `ConnectionManager` owns at most one open device handle. Opening a
//! second forcibly closes the first, disconnecting is idempotent, and a
//! read timeout is a normal empty result rather than a fault. Any real
//! I/O fault drops the session back to `Disconnected` and surfaces to
//! the caller.

use std::io::{self, Read};
use std::time::Duration;

use log::{info, warn};

use crate::error::ConnectionError;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// Display label for the status header.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "DISCONNECTED",
            Self::Connecting => "CONNECTING",
            Self::Connected => "CONNECTED",
        }
    }
}

/// A source of newline-terminated lines with a bounded read timeout.
///
/// Dropping a source closes the underlying handle; close-time errors
/// are swallowed by the drop path, which is intentional for final
/// cleanup.
pub trait LineSource: Send {
    /// Wait up to the link's timeout for one newline-terminated line.
    ///
    /// `Ok(None)` means the timeout elapsed without a complete line,
    /// which is normal and must not end the session.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;
}

/// Opens a [`LineSource`] for a port/baud pair. Tests inject scripted
/// implementations here; production uses [`SerialOpener`].
pub trait PortOpener: Send {
    /// Open the device, or fail leaving nothing held open.
    fn open(&self, port: &str, baud: u32) -> Result<Box<dyn LineSource>, ConnectionError>;
}

/// Production opener backed by the `serialport` crate.
pub struct SerialOpener {
    /// Bounded per-read timeout applied to the opened handle.
    pub read_timeout: Duration,
}

impl Default for SerialOpener {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(1000),
        }
    }
}

impl PortOpener for SerialOpener {
    fn open(&self, port: &str, baud: u32) -> Result<Box<dyn LineSource>, ConnectionError> {
        let handle = serialport::new(port, baud)
            .timeout(self.read_timeout)
            .open()
            .map_err(|source| ConnectionError::Open {
                port: port.to_string(),
                source,
            })?;
        Ok(Box::new(SerialLineSource::new(handle)))
    }
}

/// Accumulates raw serial bytes and hands out complete lines.
struct SerialLineSource {
    port: Box<dyn serialport::SerialPort>,
    pending: Vec<u8>,
}

impl SerialLineSource {
    fn new(port: Box<dyn serialport::SerialPort>) -> Self {
        Self {
            port,
            pending: Vec::with_capacity(128),
        }
    }

    fn take_pending_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop(); // trailing '\n'
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }
}

impl LineSource for SerialLineSource {
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(line) = self.take_pending_line() {
                return Ok(Some(line));
            }
            let mut chunk = [0u8; 256];
            match self.port.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    // Partial line stays pending for the next poll.
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Owns the serial handle lifecycle: open, close, reconnect.
pub struct ConnectionManager {
    state: ConnectionState,
    link: Option<Box<dyn LineSource>>,
    opener: Box<dyn PortOpener>,
    settle: Duration,
}

impl ConnectionManager {
    /// Wait after a successful open before the first read; cheap serial
    /// adapters reset the device firmware on open.
    pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

    /// Manager over real serial ports.
    pub fn new() -> Self {
        Self::with_opener(Box::new(SerialOpener::default()), Self::SETTLE_DELAY)
    }

    /// Manager with an injected opener and settle delay. This is the
    /// seam the test suites use.
    pub fn with_opener(opener: Box<dyn PortOpener>, settle: Duration) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            link: None,
            opener,
            settle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True while a handle is open.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Open `port` at `baud`. Any previously open handle is closed
    /// first, so at most one handle is ever held. After a successful
    /// open, a fixed settle delay elapses before this returns.
    ///
    /// # Errors
    ///
    /// [`ConnectionError::Open`] when the device cannot be opened; the
    /// state is left `Disconnected`.
    pub fn connect(&mut self, port: &str, baud: u32) -> Result<(), ConnectionError> {
        self.disconnect();
        self.state = ConnectionState::Connecting;
        match self.opener.open(port, baud) {
            Ok(link) => {
                std::thread::sleep(self.settle);
                self.link = Some(link);
                self.state = ConnectionState::Connected;
                info!("connected to {port} @ {baud} baud");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                warn!("open failed for {port}: {e}");
                Err(e)
            }
        }
    }

    /// Close the handle if one is open. A no-op when already closed.
    pub fn disconnect(&mut self) {
        if self.link.take().is_some() {
            info!("disconnected");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Read one line from the device, waiting up to the link timeout.
    ///
    /// `Ok(None)` on timeout; the state is unchanged. Any I/O fault
    /// forces `Disconnected` before surfacing as
    /// [`ConnectionError::Read`].
    ///
    /// # Errors
    ///
    /// [`ConnectionError::NotConnected`] outside the `Connected` state.
    pub fn read_line(&mut self) -> Result<Option<Vec<u8>>, ConnectionError> {
        if self.state != ConnectionState::Connected {
            return Err(ConnectionError::NotConnected);
        }
        let link = self.link.as_mut().ok_or(ConnectionError::NotConnected)?;
        match link.read_line() {
            Ok(line) => Ok(line),
            Err(e) => {
                self.link = None;
                self.state = ConnectionState::Disconnected;
                Err(ConnectionError::Read(e))
            }
        }
    }

    /// Final cleanup: close the handle if open. Close-time errors are
    /// swallowed by the drop path; there is no one left to report to.
    pub fn shutdown(&mut self) {
        self.link = None;
        self.state = ConnectionState::Disconnected;
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
