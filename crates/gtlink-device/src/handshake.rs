use std::time::Duration;

use gtlink_frame::{is_identity_reply, IDENTITY_REPLY_LEN, IDENTITY_REQUEST};
use gtlink_transport::Transmit;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DeviceError, Result};
use crate::router::Router;

/// Identity fields decoded from a universal identity reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentityReply {
    pub device_id: u8,
    pub manufacturer_id: u8,
    pub family_code: [u8; 2],
    pub family_number: [u8; 2],
    pub software_revision: [u8; 4],
}

impl IdentityReply {
    /// Decode a reply already known to match the identity template.
    pub fn from_bytes(msg: &[u8; IDENTITY_REPLY_LEN]) -> Self {
        Self {
            device_id: msg[2],
            manufacturer_id: msg[5],
            family_code: [msg[6], msg[7]],
            family_number: [msg[8], msg[9]],
            software_revision: [msg[10], msg[11], msg[12], msg[13]],
        }
    }

    /// Decode `msg` if it is an identity reply.
    pub fn parse(msg: &[u8]) -> Option<Self> {
        if !is_identity_reply(msg) {
            return None;
        }
        let bytes: &[u8; IDENTITY_REPLY_LEN] = msg.try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }
}

/// Configuration for the identity handshake.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Wait for a reply on each attempt. Default: 5s.
    pub timeout: Duration,
    /// Attempts after the first one. Default: 5.
    pub retries: u32,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 5,
        }
    }
}

/// Broadcast an identity request and wait for the device to answer.
///
/// Each attempt opens a fresh request slot, so a late reply to an earlier
/// attempt is routed as ordinary traffic. A request already pending fails
/// the whole handshake immediately.
pub fn device_inquiry(
    router: &Router,
    transmit: &dyn Transmit,
    config: &HandshakeConfig,
) -> Result<IdentityReply> {
    let attempts = config.retries.saturating_add(1);

    for attempt in 1..=attempts {
        let pending = router.begin_request()?;
        transmit.transmit(&IDENTITY_REQUEST)?;
        debug!(attempt, "identity request sent");

        match pending.wait(config.timeout) {
            Ok(reply) => {
                let identity = IdentityReply::from_bytes(&reply);
                info!(
                    device_id = identity.device_id,
                    manufacturer_id = identity.manufacturer_id,
                    attempt,
                    "device identified"
                );
                return Ok(identity);
            }
            Err(DeviceError::Timeout(timeout)) => {
                warn!(attempt, attempts, ?timeout, "no identity reply");
            }
            Err(err) => return Err(err),
        }
    }

    Err(DeviceError::HandshakeFailed(format!(
        "no identity reply after {attempts} attempts"
    )))
}
