use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use gtlink_device::{Device, DeviceConfig, HandshakeConfig, IdentityReply};
use gtlink_transport::{ByteSource, ReceiveWorker, SerialConfig, SerialLink, MIDI_BAUD_RATE};

use crate::exit::{device_error, transport_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod blocks;
pub mod decode;
pub mod get;
pub mod identify;
pub mod monitor;
pub mod params;
pub mod set;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Identify the device on a serial port.
    Identify(IdentifyArgs),
    /// Print device change events until interrupted.
    Monitor(MonitorArgs),
    /// Read one parameter from the device.
    Get(GetArgs),
    /// Write one parameter to the device.
    Set(SetArgs),
    /// List effect block instances.
    Blocks(BlocksArgs),
    /// List the parameters of a block instance.
    Params(ParamsArgs),
    /// Classify the messages of a raw SysEx capture file.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Identify(args) => identify::run(args, format),
        Command::Monitor(args) => monitor::run(args, format),
        Command::Get(args) => get::run(args, format),
        Command::Set(args) => set::run(args, format),
        Command::Blocks(args) => blocks::run(args, format),
        Command::Params(args) => params::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct PortArgs {
    /// Serial device path, e.g. /dev/ttyUSB0.
    #[arg(env = "GTLINK_PORT")]
    pub port: String,
    /// Line rate in baud.
    #[arg(long, env = "GTLINK_BAUD", default_value_t = MIDI_BAUD_RATE)]
    pub baud: u32,
    /// How long to wait for each identity reply (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub handshake_timeout: String,
    /// Identity requests re-sent after the first one goes unanswered.
    #[arg(long, default_value_t = 5)]
    pub retries: u32,
}

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    #[command(flatten)]
    pub port: PortArgs,
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub port: PortArgs,
    /// Exit after printing N events.
    #[arg(long)]
    pub count: Option<usize>,
    /// Leave the device's change notifications untouched.
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub port: PortArgs,
    /// Block instance name, e.g. DELAY1.
    pub block: String,
    /// Parameter name, e.g. time.
    pub param: String,
    /// Maximum time to wait for the device's answer (e.g. 2s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub port: PortArgs,
    /// Block instance name, e.g. DELAY1.
    pub block: String,
    /// Parameter name, e.g. time.
    pub param: String,
    /// New value, decimal or 0x-prefixed hex.
    pub value: String,
}

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Only list instances of this block type, e.g. DELAY.
    #[arg(long = "type", value_name = "TYPE")]
    pub block_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Block instance name, e.g. REVERB.
    pub block: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capture file holding raw MIDI bytes.
    pub file: PathBuf,
    /// Device id write commands are checked against. Default: accept any.
    #[arg(long, value_parser = parse_device_id)]
    pub device_id: Option<u8>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// A connected device plus the worker feeding it from the serial port.
///
/// Dropping it shuts the device context down before the reader stops.
pub struct Session {
    pub device: Device,
    pub identity: IdentityReply,
    worker: ReceiveWorker,
}

impl Session {
    pub fn open(args: &PortArgs) -> CliResult<Self> {
        let handshake = HandshakeConfig {
            timeout: parse_duration(&args.handshake_timeout)?,
            retries: args.retries,
        };

        let mut serial = SerialConfig::new(args.port.clone());
        serial.baud_rate = args.baud;
        let link = SerialLink::open(&serial).map_err(|err| transport_error("open failed", err))?;
        let reader = link
            .reader()
            .map_err(|err| transport_error("open failed", err))?;

        let source = ByteSource::new();
        let worker = source
            .spawn(reader)
            .map_err(|err| transport_error("receive worker failed", err))?;

        let config = DeviceConfig {
            handshake,
            ..DeviceConfig::default()
        };
        let (device, identity) = Device::connect(config, &source, Arc::new(link))
            .map_err(|err| device_error("connect failed", err))?;

        Ok(Self {
            device,
            identity,
            worker,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.device.shutdown();
        self.worker.stop();
    }
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

/// Parse a decimal or `0x`-prefixed hex number.
pub(crate) fn parse_number(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid number: {input}"))
}

fn parse_device_id(input: &str) -> Result<u8, String> {
    let value = parse_number(input)?;
    u8::try_from(value)
        .ok()
        .filter(|id| *id <= 0x7F)
        .ok_or_else(|| format!("device id out of range (0..=0x7F): {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert_eq!(parse_duration("").unwrap_err().code, USAGE);
    }

    #[test]
    fn parse_number_accepts_hex_and_decimal() {
        assert_eq!(parse_number("480"), Ok(480));
        assert_eq!(parse_number("0x1E0"), Ok(480));
        assert!(parse_number("-1").is_err());
        assert!(parse_number("0xZZ").is_err());
    }

    #[test]
    fn device_id_is_seven_bit() {
        assert_eq!(parse_device_id("0x10"), Ok(0x10));
        assert_eq!(parse_device_id("127"), Ok(0x7F));
        assert!(parse_device_id("128").is_err());
    }
}
