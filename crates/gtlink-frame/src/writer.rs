use std::io::{ErrorKind, Write};

use gtlink_transport::{Transmit, TransportError};
use parking_lot::Mutex;

use crate::command::{SYSEX_END, SYSEX_START};
use crate::error::{FrameError, Result};
use crate::framer::DEFAULT_MAX_MESSAGE;

/// Writes complete SysEx messages to any `Write` stream.
///
/// The stream sits behind a lock so one writer can be shared between the
/// handshake, the refresh helpers and raw sends.
pub struct SysexWriter<T> {
    inner: Mutex<T>,
    max_message_size: usize,
}

impl<T: Write> SysexWriter<T> {
    pub fn new(inner: T) -> Self {
        Self::with_max_message_size(inner, DEFAULT_MAX_MESSAGE)
    }

    pub fn with_max_message_size(inner: T, max_message_size: usize) -> Self {
        Self {
            inner: Mutex::new(inner),
            max_message_size,
        }
    }

    /// Validate the envelope and write the whole message (blocking), then flush.
    pub fn send(&self, msg: &[u8]) -> Result<()> {
        if msg.len() < 2 || msg[0] != SYSEX_START || msg[msg.len() - 1] != SYSEX_END {
            return Err(FrameError::NotSysex);
        }
        if msg.len() > self.max_message_size {
            return Err(FrameError::MessageTooLong {
                size: msg.len(),
                max: self.max_message_size,
            });
        }

        let mut inner = self.inner.lock();
        let mut offset = 0usize;
        while offset < msg.len() {
            match inner.write(&msg[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        loop {
            match inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Write + Send> Transmit for SysexWriter<T> {
    fn transmit(&self, bytes: &[u8]) -> gtlink_transport::Result<()> {
        self.send(bytes).map_err(|err| match err {
            FrameError::Io(io) => TransportError::Io(io),
            FrameError::ConnectionClosed => TransportError::Shutdown,
            other => TransportError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                other.to_string(),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::reader::SysexReader;

    const IDENTITY: [u8; 6] = [0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7];

    #[test]
    fn write_single_message() {
        let writer = SysexWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(&IDENTITY).unwrap();
        assert_eq!(writer.into_inner().into_inner(), IDENTITY.to_vec());
    }

    #[test]
    fn rejects_missing_envelope() {
        let writer = SysexWriter::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            writer.send(&[0x41, 0x10]),
            Err(FrameError::NotSysex)
        ));
        assert!(matches!(writer.send(&[0xF0]), Err(FrameError::NotSysex)));
        assert!(matches!(
            writer.send(&[0xF0, 0x01]),
            Err(FrameError::NotSysex)
        ));
        assert!(writer.into_inner().into_inner().is_empty());
    }

    #[test]
    fn message_too_long_rejected() {
        let writer = SysexWriter::with_max_message_size(Cursor::new(Vec::<u8>::new()), 4);
        let err = writer.send(&IDENTITY).unwrap_err();
        assert!(matches!(err, FrameError::MessageTooLong { size: 6, max: 4 }));
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let writer = SysexWriter::new(sink);

        writer.send(&IDENTITY).unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let writer = SysexWriter::new(InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        });
        writer.send(&IDENTITY).unwrap();
        assert_eq!(writer.into_inner().data, IDENTITY.to_vec());
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let writer = SysexWriter::new(ZeroWriter);
        let err = writer.send(&IDENTITY).unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn transmit_maps_errors() {
        let writer = SysexWriter::new(ZeroWriter);
        assert!(matches!(
            writer.transmit(&IDENTITY),
            Err(TransportError::Shutdown)
        ));

        let writer = SysexWriter::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            writer.transmit(&[0x00]),
            Err(TransportError::Io(e)) if e.kind() == ErrorKind::InvalidInput
        ));
    }

    #[test]
    fn written_bytes_decode() {
        let writer = SysexWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(&[0xF0, 0x01, 0xF7]).unwrap();
        writer.send(&IDENTITY).unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = SysexReader::new(Cursor::new(wire));
        assert_eq!(reader.read_message().unwrap().as_ref(), &[0xF0, 0x01, 0xF7]);
        assert_eq!(reader.read_message().unwrap().as_ref(), &IDENTITY);
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
