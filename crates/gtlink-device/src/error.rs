use std::time::Duration;

/// Errors that can occur in device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] gtlink_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] gtlink_frame::FrameError),

    /// Address map lookup failed.
    #[error("schema error: {0}")]
    Schema(#[from] gtlink_schema::SchemaError),

    /// Handshake failed.
    #[error("handshake failed: {0}")]
    HandshakeFailed(String),

    /// Another synchronous request is still waiting for its reply.
    #[error("a synchronous request is already pending")]
    RequestPending,

    /// The pending-request lock could not be taken in time.
    #[error("request lock not acquired within {0:?}")]
    LockTimeout(Duration),

    /// Request timed out.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The device context has been shut down.
    #[error("device context is shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, DeviceError>;
