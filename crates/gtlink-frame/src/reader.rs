use std::io::{ErrorKind, Read};

use bytes::Bytes;

use crate::error::{FrameError, Result};
use crate::framer::{FramerConfig, FramerStats, SysexFramer};

const READ_CHUNK_SIZE: usize = 256;

/// Reads complete SysEx messages from any `Read` stream.
///
/// Handles partial reads, filler bytes and stray data internally; callers
/// always get whole `0xF0 … 0xF7` messages.
pub struct SysexReader<T> {
    inner: T,
    framer: SysexFramer,
    chunk: Box<[u8]>,
    pos: usize,
    filled: usize,
}

impl<T: Read> SysexReader<T> {
    /// Create a reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, &FramerConfig::default())
    }

    /// Create a reader with explicit framer configuration.
    pub fn with_config(inner: T, config: &FramerConfig) -> Self {
        Self {
            inner,
            framer: SysexFramer::with_config(config),
            chunk: vec![0u8; READ_CHUNK_SIZE].into_boxed_slice(),
            pos: 0,
            filled: 0,
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` at end of stream, including
    /// when a message was cut off.
    pub fn read_message(&mut self) -> Result<Bytes> {
        loop {
            while self.pos < self.filled {
                let byte = self.chunk[self.pos];
                self.pos += 1;
                if let Some(msg) = self.framer.push(byte) {
                    return Ok(Bytes::copy_from_slice(msg));
                }
            }

            let read = match self.inner.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.pos = 0;
            self.filled = read;
        }
    }

    /// Anomaly counters of the underlying framer.
    pub fn stats(&self) -> FramerStats {
        self.framer.stats()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Iterator for SysexReader<T> {
    type Item = Result<Bytes>;

    /// Yields messages until the stream closes; other errors are yielded once.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_message() {
            Ok(msg) => Some(Ok(msg)),
            Err(FrameError::ConnectionClosed) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
