use std::fs::File;
use std::io::BufReader;

use gtlink_device::IdentityReply;
use gtlink_frame::{
    classify, parse_write, FrameError, MessageKind, SysexReader, BROADCAST_DEVICE_ID,
};
use gtlink_schema::{
    device_address_to_identity, instance, is_valid_device_address, resolve_parameter_metadata,
    PATCH_NAME_ADDRESS, PATCH_NUMBER_ADDRESS,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{hex, print_raw, print_records, OutputFormat, Record};

#[derive(Serialize)]
struct MessageOutput {
    index: usize,
    kind: &'static str,
    len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl MessageOutput {
    fn new(index: usize, kind: MessageKind, msg: &[u8]) -> Self {
        Self {
            index,
            kind: kind.name(),
            len: msg.len(),
            device_id: None,
            address: None,
            target: None,
            data: None,
            checksum: None,
            detail: None,
        }
    }
}

impl Record for MessageOutput {
    fn headers() -> &'static [&'static str] {
        &["#", "KIND", "LEN", "ADDRESS", "TARGET", "DATA", "CHECKSUM", "DETAIL"]
    }

    fn cells(&self) -> Vec<String> {
        let dash = || "-".to_string();
        vec![
            self.index.to_string(),
            self.kind.to_string(),
            self.len.to_string(),
            self.address.clone().unwrap_or_else(dash),
            self.target.clone().unwrap_or_else(dash),
            self.data.clone().unwrap_or_else(dash),
            self.checksum.unwrap_or("-").to_string(),
            self.detail.clone().unwrap_or_else(dash),
        ]
    }
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let file = File::open(&args.file)
        .map_err(|err| io_error(&format!("open {} failed", args.file.display()), err))?;
    let mut reader = SysexReader::new(BufReader::new(file));
    let device_id = args.device_id.unwrap_or(BROADCAST_DEVICE_ID);

    let mut rows = Vec::new();
    loop {
        let msg = match reader.read_message() {
            Ok(msg) => msg,
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(frame_error("read failed", err)),
        };

        if matches!(format, OutputFormat::Raw) {
            print_raw(&msg);
        } else {
            rows.push(describe(rows.len(), &msg, device_id));
        }
    }

    let stats = reader.stats();
    info!(
        emitted = stats.emitted,
        overflows = stats.overflows,
        restarts = stats.restarts,
        stray_ends = stats.stray_ends,
        "capture decoded"
    );

    if !matches!(format, OutputFormat::Raw) {
        print_records(&rows, format);
    }
    Ok(SUCCESS)
}

fn describe(index: usize, msg: &[u8], device_id: u8) -> MessageOutput {
    let kind = classify(msg);
    let mut out = MessageOutput::new(index, kind, msg);

    match kind {
        MessageKind::IdentityReply => {
            if let Some(reply) = IdentityReply::parse(msg) {
                out.device_id = Some(reply.device_id);
                out.detail = Some(format!(
                    "family={} number={} revision={}",
                    hex(&reply.family_code),
                    hex(&reply.family_number),
                    hex(&reply.software_revision)
                ));
            }
        }
        MessageKind::Write => match parse_write(msg, device_id) {
            Ok(cmd) => {
                out.device_id = Some(cmd.device_id);
                out.address = Some(format!("{:#010x}", cmd.address));
                out.target = target_name(cmd.address);
                out.data = Some(hex(cmd.data));
                out.checksum = Some("ok");
            }
            Err(err) => {
                debug!(index, error = %err, "write command failed validation");
                out.device_id = msg.get(2).copied();
                out.address = raw_address(msg).map(|address| format!("{address:#010x}"));
                out.checksum = Some(match err {
                    FrameError::ChecksumMismatch { .. } => "mismatch",
                    _ => "-",
                });
                out.detail = Some(err.to_string());
            }
        },
        MessageKind::ReadRequest => {
            out.device_id = msg.get(2).copied();
            out.address = raw_address(msg).map(|address| format!("{address:#010x}"));
            out.target = raw_address(msg).and_then(target_name);
        }
        MessageKind::IdentityRequest | MessageKind::Other => {
            out.data = Some(hex(msg));
        }
    }
    out
}

fn raw_address(msg: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = msg.get(8..12)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Human name of the memory an address points into.
fn target_name(address: u32) -> Option<String> {
    match address {
        PATCH_NUMBER_ADDRESS => Some("patch number".to_string()),
        PATCH_NAME_ADDRESS => Some("patch name".to_string()),
        address if is_valid_device_address(address) => {
            let id = device_address_to_identity(address);
            match resolve_parameter_metadata(id) {
                Ok(info) => Some(format!("{}.{}", info.instance.name, info.param.name)),
                Err(_) => instance(id.slot())
                    .map(|inst| format!("{}+{:#04x}", inst.name, id.intra_offset())),
            }
        }
        _ => None,
    }
}
