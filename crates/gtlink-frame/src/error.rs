/// Errors that can occur while framing, encoding or decoding SysEx messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The message does not start with `0xF0` or does not end with `0xF7`.
    #[error("not a SysEx message (expected 0xF0 … 0xF7)")]
    NotSysex,

    /// The fixed command header does not match.
    #[error("invalid command header")]
    InvalidHeader,

    /// The message targets a different device id.
    #[error("device id mismatch (expected {expected:#04x}, got {actual:#04x})")]
    DeviceIdMismatch { expected: u8, actual: u8 },

    /// The message is shorter than the smallest valid command.
    #[error("message too short ({len} bytes, min {min})")]
    TooShort { len: usize, min: usize },

    /// The message would exceed the size cap.
    #[error("message too long ({size} bytes, max {max})")]
    MessageTooLong { size: usize, max: usize },

    /// Parameter values are 1 to 4 bytes wide.
    #[error("invalid value width {0} (expected 1..=4 bytes)")]
    InvalidValueSize(usize),

    /// The trailing checksum does not match the address and data bytes.
    #[error("checksum mismatch (expected {expected:#04x}, got {actual:#04x})")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// An I/O error occurred while reading or writing messages.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
