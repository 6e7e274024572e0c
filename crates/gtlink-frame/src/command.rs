//! Wire constants and message classification.
//!
//! Two families of messages share the link: universal non-realtime identity
//! messages (`F0 7E …`) and the vendor address-map commands (`F0 41 …`).

/// Start of a SysEx message.
pub const SYSEX_START: u8 = 0xF0;

/// End of a SysEx message.
pub const SYSEX_END: u8 = 0xF7;

/// Active-sensing filler. Never part of a message.
pub const ACTIVE_SENSING: u8 = 0xFE;

/// Universal non-realtime SysEx id.
pub const UNIVERSAL_NON_REALTIME: u8 = 0x7E;

/// Manufacturer id used by the address-map commands.
pub const MANUFACTURER_ID: u8 = 0x41;

/// Device id that addresses every device.
pub const BROADCAST_DEVICE_ID: u8 = 0x7F;

/// Model id bytes following the device id.
pub const MODEL_ID: [u8; 4] = [0x00, 0x00, 0x00, 0x4F];

/// Read-request command byte ("RQ1").
pub const CMD_READ_REQUEST: u8 = 0x11;

/// Write command byte ("DT1").
pub const CMD_WRITE: u8 = 0x12;

/// Broadcast identity request.
pub const IDENTITY_REQUEST: [u8; 6] = [
    SYSEX_START,
    UNIVERSAL_NON_REALTIME,
    BROADCAST_DEVICE_ID,
    0x06,
    0x01,
    SYSEX_END,
];

/// Length of an identity reply.
pub const IDENTITY_REPLY_LEN: usize = 15;

/// Identity reply template. `None` positions are wildcards: device id,
/// manufacturer id, family code/number and software revision.
const IDENTITY_REPLY_PATTERN: [Option<u8>; IDENTITY_REPLY_LEN] = [
    Some(SYSEX_START),
    Some(UNIVERSAL_NON_REALTIME),
    None,
    Some(0x06),
    Some(0x02),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some(SYSEX_END),
];

/// Whether `msg` matches the fixed-length identity reply template.
pub fn is_identity_reply(msg: &[u8]) -> bool {
    msg.len() == IDENTITY_REPLY_LEN
        && msg
            .iter()
            .zip(IDENTITY_REPLY_PATTERN.iter())
            .all(|(byte, expected)| expected.is_none_or(|e| e == *byte))
}

/// Coarse classification of a complete message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    IdentityRequest,
    IdentityReply,
    Write,
    ReadRequest,
    Other,
}

impl MessageKind {
    /// Short label used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::IdentityRequest => "IDENTITY_REQUEST",
            MessageKind::IdentityReply => "IDENTITY_REPLY",
            MessageKind::Write => "DT1",
            MessageKind::ReadRequest => "RQ1",
            MessageKind::Other => "OTHER",
        }
    }
}

/// Classify a complete message by its envelope and header bytes only.
///
/// Checksums and lengths of address-map commands are not verified here.
pub fn classify(msg: &[u8]) -> MessageKind {
    if msg == IDENTITY_REQUEST.as_slice() {
        return MessageKind::IdentityRequest;
    }
    if is_identity_reply(msg) {
        return MessageKind::IdentityReply;
    }
    if msg.len() > 8
        && msg[0] == SYSEX_START
        && msg[1] == MANUFACTURER_ID
        && msg[3..7] == MODEL_ID
    {
        return match msg[7] {
            CMD_WRITE => MessageKind::Write,
            CMD_READ_REQUEST => MessageKind::ReadRequest,
            _ => MessageKind::Other,
        };
    }
    MessageKind::Other
}
