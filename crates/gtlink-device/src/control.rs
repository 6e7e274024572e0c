//! Device-initiated change notification toggles.

/// Position of the device id byte in the templates.
const DEVICE_ID_INDEX: usize = 2;

/// Write command turning parameter change broadcasts on.
pub const NOTIFY_ENABLE: [u8; 15] = [
    0xF0, 0x41, 0x7F, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x7F, 0x00, 0x00, 0x01, 0x01, 0x7F, 0xF7,
];

/// Write command turning parameter change broadcasts off.
pub const NOTIFY_DISABLE: [u8; 15] = [
    0xF0, 0x41, 0x7F, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x7F, 0x00, 0x00, 0x01, 0x00, 0x00, 0xF7,
];

/// Notification toggle addressed to `device_id`.
pub fn notification_message(enable: bool, device_id: u8) -> [u8; 15] {
    let mut msg = if enable { NOTIFY_ENABLE } else { NOTIFY_DISABLE };
    msg[DEVICE_ID_INDEX] = device_id;
    msg
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use gtlink_frame::{encode_write_bytes, parse_write};

    use super::*;

    #[test]
    fn templates_are_valid_write_commands() {
        for (template, data) in [(NOTIFY_ENABLE, 0x01), (NOTIFY_DISABLE, 0x00)] {
            let cmd = parse_write(&template, 0x7F).unwrap();
            assert_eq!(cmd.address, 0x7F00_0001);
            assert_eq!(cmd.data, &[data]);

            let mut encoded = BytesMut::new();
            encode_write_bytes(0x7F, 0x7F00_0001, &[data], &mut encoded).unwrap();
            assert_eq!(encoded.as_ref(), &template);
        }
    }

    #[test]
    fn only_device_id_is_patched() {
        let msg = notification_message(true, 0x10);
        assert_eq!(msg[2], 0x10);
        assert_eq!(msg[..2], NOTIFY_ENABLE[..2]);
        assert_eq!(msg[3..], NOTIFY_ENABLE[3..]);
        assert!(parse_write(&msg, 0x10).is_ok());

        let msg = notification_message(false, 0x10);
        assert_eq!(msg[12], 0x00);
    }
}
