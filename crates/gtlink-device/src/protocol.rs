use bytes::BytesMut;
use gtlink_frame::{encode_read_request, encode_write, parse_write, WriteCommand};
use gtlink_schema::{
    device_address_to_identity, identity_to_device_address, is_valid_device_address,
    is_valid_identity, resolve_parameter_metadata, ParamId, ParamInfo, SchemaError,
    BLOCK_SLOT_SIZE, PATCH_NAME_ADDRESS, PATCH_NAME_LEN, PATCH_NUMBER_ADDRESS,
};
use tracing::{debug, trace};

use crate::error::Result;
use crate::image::DeviceImage;

/// Change raised after an inbound write command touched the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// The device switched patches.
    PresetChange { patch_number: u32 },
    /// The patch name was rewritten.
    PresetNameUpdate,
    /// Bytes starting at `id` changed.
    ParameterUpdate { id: ParamId, len: usize },
}

impl DeviceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceEvent::PresetChange { .. } => "PRESET_CHANGE",
            DeviceEvent::PresetNameUpdate => "PRESET_NAME_UPDATE",
            DeviceEvent::ParameterUpdate { .. } => "PARAMETER_UPDATE",
        }
    }
}

/// Validate `msg` as a write command and apply it to `image`.
///
/// Invalid messages are logged at debug level and leave the mirror untouched.
pub fn decode_message(image: &mut DeviceImage, msg: &[u8], device_id: u8) -> Option<DeviceEvent> {
    match parse_write(msg, device_id) {
        Ok(cmd) => apply_write(image, &cmd),
        Err(err) => {
            debug!(error = %err, len = msg.len(), "dropping invalid SysEx message");
            None
        }
    }
}

/// Apply a validated write command to `image`.
///
/// Addresses outside the patch number, patch name and effect region belong
/// to unrelated device traffic and are ignored.
pub fn apply_write(image: &mut DeviceImage, cmd: &WriteCommand<'_>) -> Option<DeviceEvent> {
    match cmd.address {
        PATCH_NUMBER_ADDRESS => {
            let patch_number = image.set_patch_number(cmd.data);
            Some(DeviceEvent::PresetChange { patch_number })
        }
        PATCH_NAME_ADDRESS => {
            image.set_patch_name(cmd.data);
            Some(DeviceEvent::PresetNameUpdate)
        }
        address if is_valid_device_address(address) => {
            let id = device_address_to_identity(address);
            let len = image.write_effects(id.offset(), cmd.data);
            Some(DeviceEvent::ParameterUpdate { id, len })
        }
        address => {
            trace!(address, "ignoring write outside the mirrored regions");
            None
        }
    }
}

/// Encode a write of `value` to parameter `id`, sized per its descriptor.
pub fn encode_parameter_write(
    device_id: u8,
    id: ParamId,
    value: u32,
    dst: &mut BytesMut,
) -> Result<ParamInfo> {
    let info = resolve_parameter_metadata(id)?;
    encode_write(device_id, info.device_address(), value, info.size(), dst)?;
    Ok(info)
}

/// Encode a read request for the whole block slot starting at `id`.
pub fn encode_block_request(device_id: u8, id: ParamId, dst: &mut BytesMut) -> Result<()> {
    if !is_valid_identity(id) {
        return Err(SchemaError::InvalidIdentity(id).into());
    }
    if !id.is_block_aligned() {
        return Err(SchemaError::Unaligned(id).into());
    }
    encode_read_request(
        device_id,
        identity_to_device_address(id),
        BLOCK_SLOT_SIZE as u32,
        dst,
    )?;
    Ok(())
}

/// Encode a read request for a single parameter.
pub fn encode_parameter_request(device_id: u8, id: ParamId, dst: &mut BytesMut) -> Result<ParamInfo> {
    let info = resolve_parameter_metadata(id)?;
    encode_read_request(device_id, info.device_address(), info.size() as u32, dst)?;
    Ok(info)
}

/// Encode a read request for the patch name.
pub fn encode_patch_name_request(device_id: u8, dst: &mut BytesMut) -> Result<()> {
    encode_read_request(device_id, PATCH_NAME_ADDRESS, PATCH_NAME_LEN as u32, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use gtlink_frame::{encode_write_bytes, BROADCAST_DEVICE_ID};
    use gtlink_schema::param_id;

    use super::*;
    use crate::error::DeviceError;

    const SCENARIO_A: [u8; 15] = [
        0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x10, 0x00, 0x12, 0x00, 0x01, 0x5D, 0xF7,
    ];

    #[test]
    fn write_to_first_parameter_raises_update() {
        let mut image = DeviceImage::new();
        let event = decode_message(&mut image, &SCENARIO_A, 0x10).unwrap();
        assert_eq!(
            event,
            DeviceEvent::ParameterUpdate {
                id: ParamId::from_offset(0),
                len: 1
            }
        );
        assert_eq!(image.effects()[0], 1);
    }

    #[test]
    fn flipped_checksum_bit_is_dropped() {
        let mut image = DeviceImage::new();
        let mut msg = SCENARIO_A;
        msg[13] ^= 0x01;
        assert!(decode_message(&mut image, &msg, 0x10).is_none());
        assert!(image.effects().iter().all(|&b| b == 0));
    }

    #[test]
    fn foreign_device_id_is_dropped_unless_broadcast() {
        let mut image = DeviceImage::new();
        assert!(decode_message(&mut image, &SCENARIO_A, 0x11).is_none());
        assert!(decode_message(&mut image, &SCENARIO_A, BROADCAST_DEVICE_ID).is_some());
    }

    #[test]
    fn patch_number_and_name() {
        let mut image = DeviceImage::new();
        let mut msg = BytesMut::new();
        encode_write_bytes(0x10, PATCH_NUMBER_ADDRESS, &[0x00, 0x2A], &mut msg).unwrap();
        assert_eq!(
            decode_message(&mut image, &msg, 0x10),
            Some(DeviceEvent::PresetChange { patch_number: 42 })
        );
        assert_eq!(image.patch_number(), 42);

        msg.clear();
        encode_write_bytes(0x10, PATCH_NAME_ADDRESS, b"BLUES DRIVE     ", &mut msg).unwrap();
        assert_eq!(
            decode_message(&mut image, &msg, 0x10),
            Some(DeviceEvent::PresetNameUpdate)
        );
        assert_eq!(image.patch_name(), "BLUES DRIVE");
    }

    #[test]
    fn unrelated_address_is_ignored() {
        let mut image = DeviceImage::new();
        let mut msg = BytesMut::new();
        encode_write_bytes(0x10, 0x7F00_0001, &[0x01], &mut msg).unwrap();
        assert!(decode_message(&mut image, &msg, 0x10).is_none());

        msg.clear();
        encode_write_bytes(0x10, 0x1000_1100, &[0x01], &mut msg).unwrap();
        assert!(decode_message(&mut image, &msg, 0x10).is_none());
        assert!(image.effects().iter().all(|&b| b == 0));
    }

    #[test]
    fn encoded_write_decodes_back_to_mirror() {
        let id = param_id("DELAY2", "time").unwrap();
        let mut msg = BytesMut::new();
        let info = encode_parameter_write(0x10, id, 1234, &mut msg).unwrap();
        assert_eq!(info.size(), 4);

        let mut image = DeviceImage::new();
        let event = decode_message(&mut image, &msg, 0x10).unwrap();
        assert_eq!(event, DeviceEvent::ParameterUpdate { id, len: 4 });
        assert_eq!(image.param_value(&info), 1234);
    }

    #[test]
    fn parameter_write_rejects_unresolved_identity() {
        let mut msg = BytesMut::new();
        let inside_value = ParamId::from_offset(param_id("DELAY1", "time").unwrap().offset() as u32 + 1);
        let err = encode_parameter_write(0x10, inside_value, 1, &mut msg).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Schema(SchemaError::UnresolvedParameter { .. })
        ));
        assert!(msg.is_empty());
    }

    #[test]
    fn block_request_requires_alignment() {
        let mut msg = BytesMut::new();
        let block = gtlink_schema::block_id("REVERB").unwrap();
        encode_block_request(0x10, block, &mut msg).unwrap();
        assert_eq!(&msg[8..12], &(0x1000_1200u32 + 98 * 256).to_be_bytes());
        assert_eq!(&msg[12..16], &[0x00, 0x00, 0x01, 0x00]);

        msg.clear();
        let unaligned = ParamId::from_offset(block.offset() as u32 + 1);
        assert!(matches!(
            encode_block_request(0x10, unaligned, &mut msg),
            Err(DeviceError::Schema(SchemaError::Unaligned(_)))
        ));
        assert!(matches!(
            encode_block_request(0x10, ParamId::from_offset(30_000), &mut msg),
            Err(DeviceError::Schema(SchemaError::InvalidIdentity(_)))
        ));
    }

    #[test]
    fn parameter_and_name_requests() {
        let mut msg = BytesMut::new();
        let id = param_id("MSTDELAY", "d2_time").unwrap();
        encode_parameter_request(0x10, id, &mut msg).unwrap();
        assert_eq!(&msg[8..12], &(0x1000_1200u32 + 15 * 256 + 0x1C).to_be_bytes());
        assert_eq!(&msg[12..16], &[0, 0, 0, 4]);

        msg.clear();
        encode_patch_name_request(0x10, &mut msg).unwrap();
        assert_eq!(&msg[8..16], &[0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10]);
    }
}
