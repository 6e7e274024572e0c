//! Device context for a SysEx-controlled multi-effects unit.
//!
//! This is the "just works" layer. Push received bytes in, get a mirrored
//! parameter image and change events out:
//! - [`Router`] splits completed messages between the one pending
//!   synchronous request and a fixed pool of asynchronous buffers.
//! - [`device_inquiry`] runs the identity handshake on top of it.
//! - [`protocol`] decodes write commands into the [`DeviceImage`] and encodes
//!   outbound writes and read requests.
//! - [`Device`] owns all of the above plus the framer and consumer workers.

pub mod control;
pub mod device;
pub mod error;
pub mod handshake;
pub mod image;
pub mod pool;
pub mod protocol;
pub mod router;

pub use control::{notification_message, NOTIFY_DISABLE, NOTIFY_ENABLE};
pub use device::{Device, DeviceConfig, EventCallback};
pub use error::{DeviceError, Result};
pub use handshake::{device_inquiry, HandshakeConfig, IdentityReply};
pub use image::DeviceImage;
pub use pool::{BufferPool, PooledBuffer};
pub use protocol::{
    apply_write, decode_message, encode_block_request, encode_parameter_request,
    encode_parameter_write, encode_patch_name_request, DeviceEvent,
};
pub use router::{PendingReply, ReplyBuffer, RouteOutcome, Router, RouterConfig, RouterStats};
