use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::command::{SYSEX_END, SYSEX_START};
use crate::error::FrameError;
use crate::framer::{FramerConfig, SysexFramer};

/// `tokio_util` codec yielding complete SysEx messages.
///
/// Decoding runs every byte through a [`SysexFramer`], so filler and stray
/// bytes are dropped exactly as on the blocking path.
pub struct SysexCodec {
    framer: SysexFramer,
}

impl SysexCodec {
    pub fn new() -> Self {
        Self::with_config(&FramerConfig::default())
    }

    pub fn with_config(config: &FramerConfig) -> Self {
        Self {
            framer: SysexFramer::with_config(config),
        }
    }
}

impl Default for SysexCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for SysexCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut consumed = 0usize;
        let mut found = None;
        for &byte in src.iter() {
            consumed += 1;
            if let Some(msg) = self.framer.push(byte) {
                found = Some(Bytes::copy_from_slice(msg));
                break;
            }
        }
        src.advance(consumed);
        Ok(found)
    }
}

impl<'a> Encoder<&'a [u8]> for SysexCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &'a [u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.len() < 2 || item[0] != SYSEX_START || item[item.len() - 1] != SYSEX_END {
            return Err(FrameError::NotSysex);
        }
        let max = self.framer.max_message_size();
        if item.len() > max {
            return Err(FrameError::MessageTooLong {
                size: item.len(),
                max,
            });
        }
        dst.put_slice(item);
        Ok(())
    }
}
