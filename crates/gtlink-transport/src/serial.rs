use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use parking_lot::Mutex;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::Transmit;

/// MIDI DIN line rate.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Serial port settings. The line format is always 8-N-1 without flow control.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0`.
    pub path: String,
    /// Default: 31250.
    pub baud_rate: u32,
    /// How long a read may block before reporting no data. Default: 100ms.
    pub read_timeout: Duration,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: MIDI_BAUD_RATE,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// An open serial port. Transmits directly; hands out reader halves for a
/// [`ByteSource`](crate::ByteSource) receive worker.
pub struct SerialLink {
    port: Mutex<Box<dyn SerialPort>>,
    path: String,
}

impl SerialLink {
    /// Open the port described by `config`.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: config.path.clone(),
                source,
            })?;

        info!(path = %config.path, baud = config.baud_rate, "serial port opened");

        Ok(Self {
            port: Mutex::new(port),
            path: config.path.clone(),
        })
    }

    /// Device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Clone the port handle into an independent reader.
    pub fn reader(&self) -> Result<SerialReader> {
        let port = self
            .port
            .lock()
            .try_clone()
            .map_err(|source| TransportError::Open {
                path: self.path.clone(),
                source,
            })?;
        Ok(SerialReader { port })
    }
}

impl Transmit for SerialLink {
    fn transmit(&self, bytes: &[u8]) -> Result<()> {
        let mut port = self.port.lock();
        let mut offset = 0usize;
        while offset < bytes.len() {
            match port.write(&bytes[offset..]) {
                Ok(0) => return Err(TransportError::Shutdown),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
        port.flush()?;
        debug!(len = bytes.len(), "serial transmit");
        Ok(())
    }
}

/// Reader half of a [`SerialLink`]. Read timeouts surface as
/// `ErrorKind::TimedOut`, which the receive worker treats as "no data yet".
pub struct SerialReader {
    port: Box<dyn SerialPort>,
}

impl Read for SerialReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}
