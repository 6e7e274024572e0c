use std::fmt;
use std::io;

use gtlink_device::DeviceError;
use gtlink_frame::FrameError;
use gtlink_schema::SchemaError;
use gtlink_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::InvalidValueSize(_) | FrameError::MessageTooLong { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Transport(err) => transport_error(context, err),
        DeviceError::Frame(err) => frame_error(context, err),
        DeviceError::Schema(err) => schema_error(context, err),
        DeviceError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        DeviceError::HandshakeFailed(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn device_errors_map_to_exit_codes() {
        assert_eq!(
            device_error("get", DeviceError::Timeout(Duration::from_secs(1))).code,
            TIMEOUT
        );
        assert_eq!(
            device_error("identify", DeviceError::HandshakeFailed("no reply".into())).code,
            FAILURE
        );
        assert_eq!(
            device_error("set", FrameError::InvalidValueSize(5).into()).code,
            DATA_INVALID
        );
        assert_eq!(
            device_error("get", SchemaError::UnknownBlock("NOPE".into()).into()).code,
            USAGE
        );
        assert_eq!(device_error("get", DeviceError::RequestPending).code, INTERNAL);
    }

    #[test]
    fn io_kinds_pick_codes() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(io_error("open", err).code, PERMISSION_DENIED);
        let err = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert_eq!(transport_error("read", err.into()).code, TIMEOUT);
        assert_eq!(
            transport_error("register", TransportError::ConsumerLimit { max: 10 }).code,
            TRANSPORT_ERROR
        );
    }
}
