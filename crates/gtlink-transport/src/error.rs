/// Errors that can occur in byte transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial port.
    #[cfg(feature = "serial")]
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// An I/O error occurred on the underlying stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every consumer slot of the byte source is taken.
    #[error("consumer limit reached (max {max})")]
    ConsumerLimit { max: usize },

    /// The consumer id is not registered.
    #[error("unknown consumer {0}")]
    UnknownConsumer(usize),

    /// The transport has been shut down.
    #[error("transport shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, TransportError>;
