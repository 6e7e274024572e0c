//! SysEx bridge to the parameter memory of a GT-1000-style multi-effects unit.
//!
//! gtlink keeps a local mirror of the device's patch state in sync over a
//! MIDI-rate serial link, raises events when the device reports changes, and
//! lets callers read, write and refresh individual parameters.
//!
//! # Crate Structure
//!
//! - [`transport`]: byte fan-out hub, transmit seam and serial link (`serial` feature)
//! - [`frame`]: SysEx framing, checksum and write/read-request codec
//! - [`schema`]: static address map of block instances and parameters
//! - [`device`]: device context with handshake, routing and mirror (`device` feature)

/// Re-export transport types.
pub mod transport {
    pub use gtlink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use gtlink_frame::*;
}

/// Re-export address map types.
pub mod schema {
    pub use gtlink_schema::*;
}

/// Re-export device context types (requires `device` feature).
#[cfg(feature = "device")]
pub mod device {
    pub use gtlink_device::*;
}
