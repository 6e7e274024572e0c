use bytes::{BufMut, BytesMut};

use crate::command::{
    BROADCAST_DEVICE_ID, CMD_READ_REQUEST, CMD_WRITE, MANUFACTURER_ID, MODEL_ID, SYSEX_END,
    SYSEX_START,
};
use crate::error::{FrameError, Result};

/// Command header: start + manufacturer + device id + model id (4) + command = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Device addresses are 4 bytes, big-endian.
pub const ADDRESS_SIZE: usize = 4;

/// Outbound command size cap.
pub const MAX_COMMAND_SIZE: usize = 64;

/// Widest parameter value.
pub const MAX_VALUE_SIZE: usize = 4;

/// Smallest inbound write: header, address, one data byte, checksum, end.
pub const MIN_WRITE_SIZE: usize = HEADER_SIZE + ADDRESS_SIZE + 1 + 2;

/// `(128 - (sum mod 128)) mod 128`.
///
/// Adding the result to the sum of `bytes` always yields a multiple of 128.
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u32, |acc, &b| acc + u32::from(b));
    ((128 - sum % 128) % 128) as u8
}

/// A validated inbound write command, borrowing from the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteCommand<'a> {
    /// Device id byte found in the header.
    pub device_id: u8,
    /// Device byte address.
    pub address: u32,
    /// Payload between the address and the checksum.
    pub data: &'a [u8],
}

/// Encode a write command carrying `size` big-endian bytes of `value`.
///
/// Wire format:
/// ```text
/// F0 41 <dev> 00 00 00 4F 12 <a0 a1 a2 a3> <v0..v(size-1)> <sum> F7
/// ```
pub fn encode_write(
    device_id: u8,
    address: u32,
    value: u32,
    size: usize,
    dst: &mut BytesMut,
) -> Result<()> {
    if size == 0 || size > MAX_VALUE_SIZE {
        return Err(FrameError::InvalidValueSize(size));
    }
    let be = value.to_be_bytes();
    encode_write_bytes(device_id, address, &be[MAX_VALUE_SIZE - size..], dst)
}

/// Encode a write command with an arbitrary payload.
pub fn encode_write_bytes(
    device_id: u8,
    address: u32,
    data: &[u8],
    dst: &mut BytesMut,
) -> Result<()> {
    let total = HEADER_SIZE + ADDRESS_SIZE + data.len() + 2;
    if total > MAX_COMMAND_SIZE {
        return Err(FrameError::MessageTooLong {
            size: total,
            max: MAX_COMMAND_SIZE,
        });
    }

    dst.reserve(total);
    put_header(CMD_WRITE, device_id, dst);
    let body_start = dst.len();
    dst.put_u32(address);
    dst.put_slice(data);
    let sum = checksum(&dst[body_start..]);
    dst.put_u8(sum);
    dst.put_u8(SYSEX_END);
    Ok(())
}

/// Encode a read request for `size` bytes starting at `address`.
///
/// Wire format:
/// ```text
/// F0 41 <dev> 00 00 00 4F 11 <a0 a1 a2 a3> <s0 s1 s2 s3> <sum> F7
/// ```
pub fn encode_read_request(device_id: u8, address: u32, size: u32, dst: &mut BytesMut) -> Result<()> {
    dst.reserve(HEADER_SIZE + 2 * ADDRESS_SIZE + 2);
    put_header(CMD_READ_REQUEST, device_id, dst);
    let body_start = dst.len();
    dst.put_u32(address);
    dst.put_u32(size);
    let sum = checksum(&dst[body_start..]);
    dst.put_u8(sum);
    dst.put_u8(SYSEX_END);
    Ok(())
}

/// Validate an inbound write command addressed to `device_id`.
///
/// A `device_id` of `0x7F` accepts any device. The checksum covers the
/// address and data bytes and sits just before the end marker.
pub fn parse_write(msg: &[u8], device_id: u8) -> Result<WriteCommand<'_>> {
    if msg.len() < MIN_WRITE_SIZE {
        return Err(FrameError::TooShort {
            len: msg.len(),
            min: MIN_WRITE_SIZE,
        });
    }
    if msg[0] != SYSEX_START || msg[msg.len() - 1] != SYSEX_END {
        return Err(FrameError::NotSysex);
    }
    if msg[1] != MANUFACTURER_ID || msg[3..7] != MODEL_ID || msg[7] != CMD_WRITE {
        return Err(FrameError::InvalidHeader);
    }
    if device_id != BROADCAST_DEVICE_ID && msg[2] != device_id {
        return Err(FrameError::DeviceIdMismatch {
            expected: device_id,
            actual: msg[2],
        });
    }

    let sum_at = msg.len() - 2;
    let expected = checksum(&msg[HEADER_SIZE..sum_at]);
    if msg[sum_at] != expected {
        return Err(FrameError::ChecksumMismatch {
            expected,
            actual: msg[sum_at],
        });
    }

    let address = u32::from_be_bytes([msg[8], msg[9], msg[10], msg[11]]);
    Ok(WriteCommand {
        device_id: msg[2],
        address,
        data: &msg[HEADER_SIZE + ADDRESS_SIZE..sum_at],
    })
}

fn put_header(command: u8, device_id: u8, dst: &mut BytesMut) {
    dst.put_u8(SYSEX_START);
    dst.put_u8(MANUFACTURER_ID);
    dst.put_u8(device_id);
    dst.put_slice(&MODEL_ID);
    dst.put_u8(command);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_completes_to_multiple_of_128() {
        let samples: [&[u8]; 5] = [
            &[],
            &[0x00],
            &[0x10, 0x00, 0x12, 0x00, 0x01],
            &[0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F],
            &[0x40; 300],
        ];
        for bytes in samples {
            let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum();
            assert_eq!((sum + u32::from(checksum(bytes))) % 128, 0);
            assert!(checksum(bytes) < 128);
        }
    }

    #[test]
    fn checksum_known_values() {
        assert_eq!(checksum(&[0x10, 0x00, 0x12, 0x00, 0x01]), 0x5D);
        assert_eq!(checksum(&[0x7F, 0x00, 0x00, 0x01, 0x01]), 0x7F);
        assert_eq!(checksum(&[0x7F, 0x00, 0x00, 0x01, 0x00]), 0x00);
    }

    #[test]
    fn encode_single_byte_write() {
        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1200, 1, 1, &mut buf).unwrap();
        assert_eq!(
            buf.as_ref(),
            &[0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x10, 0x00, 0x12, 0x00, 0x01, 0x5D, 0xF7]
        );
    }

    #[test]
    fn encode_multi_byte_write_is_big_endian() {
        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1301, 0x0102_0304, 4, &mut buf).unwrap();
        assert_eq!(&buf[12..16], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(buf.len(), 18);

        buf.clear();
        encode_write(0x10, 0x1000_1301, 0x0203, 2, &mut buf).unwrap();
        assert_eq!(&buf[12..14], &[0x02, 0x03]);
    }

    #[test]
    fn encode_write_rejects_bad_widths() {
        let mut buf = BytesMut::new();
        assert!(matches!(
            encode_write(0x10, 0, 0, 5, &mut buf),
            Err(FrameError::InvalidValueSize(5))
        ));
        assert!(matches!(
            encode_write(0x10, 0, 0, 0, &mut buf),
            Err(FrameError::InvalidValueSize(0))
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn encode_write_bytes_caps_total_length() {
        let mut buf = BytesMut::new();
        encode_write_bytes(0x10, 0x1000_0000, &[0x20; 50], &mut buf).unwrap();
        assert_eq!(buf.len(), MAX_COMMAND_SIZE);

        let mut buf = BytesMut::new();
        let err = encode_write_bytes(0x10, 0x1000_0000, &[0x20; 51], &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::MessageTooLong { size: 65, max: 64 }));
    }

    #[test]
    fn encode_read_request_layout() {
        let mut buf = BytesMut::new();
        encode_read_request(0x10, 0x1000_0000, 16, &mut buf).unwrap();
        assert_eq!(
            buf.as_ref(),
            &[
                0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x11, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x10, 0x60, 0xF7
            ]
        );
    }

    #[test]
    fn parse_accepts_encoded_write() {
        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1200, 0x42, 1, &mut buf).unwrap();

        let cmd = parse_write(&buf, 0x10).unwrap();
        assert_eq!(cmd.device_id, 0x10);
        assert_eq!(cmd.address, 0x1000_1200);
        assert_eq!(cmd.data, &[0x42]);
    }

    #[test]
    fn parse_rejects_flipped_checksum_bit() {
        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1200, 1, 1, &mut buf).unwrap();
        let at = buf.len() - 2;
        buf[at] ^= 0x01;

        let err = parse_write(&buf, 0x10).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ChecksumMismatch {
                expected: 0x5D,
                actual: 0x5C
            }
        ));
    }

    #[test]
    fn parse_device_id_wildcard() {
        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1200, 1, 1, &mut buf).unwrap();

        assert!(parse_write(&buf, BROADCAST_DEVICE_ID).is_ok());
        assert!(matches!(
            parse_write(&buf, 0x11),
            Err(FrameError::DeviceIdMismatch {
                expected: 0x11,
                actual: 0x10
            })
        ));
    }

    #[test]
    fn parse_rejects_short_and_wrong_header() {
        let short = [0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x12, 0xF7];
        assert!(matches!(
            parse_write(&short, 0x10),
            Err(FrameError::TooShort { len: 9, .. })
        ));

        let mut buf = BytesMut::new();
        encode_read_request(0x10, 0x1000_0000, 16, &mut buf).unwrap();
        assert!(matches!(
            parse_write(&buf, 0x10),
            Err(FrameError::InvalidHeader)
        ));

        let mut buf = BytesMut::new();
        encode_write(0x10, 0x1000_1200, 1, 1, &mut buf).unwrap();
        let last = buf.len() - 1;
        buf[last] = 0x00;
        assert!(matches!(parse_write(&buf, 0x10), Err(FrameError::NotSysex)));
    }
}
