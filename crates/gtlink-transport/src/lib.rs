//! Byte-level plumbing between a serial link and the SysEx stack.
//!
//! The lowest layer of gtlink. It knows nothing about SysEx framing:
//! - [`ByteSource`] fans every received byte out to registered consumers
//!   through bounded queues.
//! - [`Transmit`] is the outbound seam; anything that can push a byte
//!   sequence onto the wire implements it.
//! - [`SerialLink`] (feature `serial`) opens a MIDI-rate serial port and
//!   splits it into a reader half and a transmit half.

pub mod error;
pub mod fanout;
pub mod traits;

#[cfg(feature = "serial")]
pub mod serial;

pub use error::{Result, TransportError};
pub use fanout::{ByteSource, ByteSourceConfig, ConsumerId, ReceiveWorker};
pub use traits::{ByteSink, Transmit};

#[cfg(feature = "serial")]
pub use serial::{SerialConfig, SerialLink, SerialReader, MIDI_BAUD_RATE};
