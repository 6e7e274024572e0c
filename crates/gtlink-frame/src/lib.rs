//! SysEx framing and the DT1/RQ1 wire codec.
//!
//! Every message on the wire is bounded by `0xF0 … 0xF7`. The active-sensing
//! filler `0xFE` may show up anywhere and is dropped without touching framing
//! state. On top of the envelope this crate provides:
//! - [`SysexFramer`], a byte-at-a-time state machine with a fixed buffer
//! - the Roland-style checksum and write/read-request encoders
//! - [`parse_write`] for validating inbound write commands
//!
//! No partial messages, no buffer management in user code.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod command;
pub mod error;
pub mod framer;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::SysexCodec;
pub use codec::{
    checksum, encode_read_request, encode_write, encode_write_bytes, parse_write, WriteCommand,
    ADDRESS_SIZE, HEADER_SIZE, MAX_COMMAND_SIZE, MAX_VALUE_SIZE, MIN_WRITE_SIZE,
};
pub use command::{
    classify, is_identity_reply, MessageKind, ACTIVE_SENSING, BROADCAST_DEVICE_ID,
    IDENTITY_REPLY_LEN, IDENTITY_REQUEST, SYSEX_END, SYSEX_START,
};
pub use error::{FrameError, Result};
pub use framer::{FramerConfig, FramerState, FramerStats, SysexFramer, DEFAULT_MAX_MESSAGE};
pub use reader::SysexReader;
pub use writer::SysexWriter;
