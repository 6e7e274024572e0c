use tracing::{debug, error};

use crate::command::{ACTIVE_SENSING, SYSEX_END, SYSEX_START};

/// Default maximum message size, end marker included.
pub const DEFAULT_MAX_MESSAGE: usize = 512;

/// Configuration for the framer.
#[derive(Debug, Clone)]
pub struct FramerConfig {
    /// Maximum message length in bytes. Default: 512.
    pub max_message_size: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerState {
    Idle,
    InMessage,
}

/// Counters for anomalies the framer recovered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramerStats {
    pub emitted: u64,
    pub overflows: u64,
    /// Start markers seen mid-message.
    pub restarts: u64,
    /// End markers seen outside a message.
    pub stray_ends: u64,
}

/// Rebuilds complete `0xF0 … 0xF7` messages from a byte stream.
///
/// Works on a fixed buffer allocated once; emitted messages borrow from it
/// until the next call to [`push`](Self::push).
pub struct SysexFramer {
    buf: Box<[u8]>,
    len: usize,
    state: FramerState,
    overflowed: bool,
    stats: FramerStats,
}

impl SysexFramer {
    pub fn new() -> Self {
        Self::with_config(&FramerConfig::default())
    }

    pub fn with_config(config: &FramerConfig) -> Self {
        Self {
            buf: vec![0u8; config.max_message_size.max(2)].into_boxed_slice(),
            len: 0,
            state: FramerState::Idle,
            overflowed: false,
            stats: FramerStats::default(),
        }
    }

    /// Feed one byte. Returns the completed message when `byte` closes one.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        match byte {
            ACTIVE_SENSING => return None,
            SYSEX_START => {
                if self.state == FramerState::InMessage {
                    debug!(discarded = self.len, "unexpected SysEx start, message discarded");
                    self.stats.restarts += 1;
                }
                self.len = 0;
                self.state = FramerState::InMessage;
                self.append(byte);
            }
            SYSEX_END => {
                if self.state == FramerState::Idle {
                    debug!("unexpected SysEx end outside a message");
                    self.stats.stray_ends += 1;
                    return None;
                }
                self.append(byte);
                let complete = self.len;
                self.len = 0;
                self.state = FramerState::Idle;
                self.stats.emitted += 1;
                return Some(&self.buf[..complete]);
            }
            _ => {
                if self.state == FramerState::InMessage {
                    self.append(byte);
                }
            }
        }

        if self.len >= self.buf.len() {
            error!(max = self.buf.len(), "SysEx buffer overflow, message discarded");
            self.len = 0;
            self.state = FramerState::Idle;
            self.overflowed = true;
            self.stats.overflows += 1;
        }
        None
    }

    /// Current state.
    pub fn state(&self) -> FramerState {
        self.state
    }

    /// Returns and clears the overflow flag.
    pub fn take_overflow(&mut self) -> bool {
        std::mem::take(&mut self.overflowed)
    }

    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    /// Maximum message length this framer accepts.
    pub fn max_message_size(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partial message and return to idle.
    pub fn reset(&mut self) {
        self.len = 0;
        self.state = FramerState::Idle;
    }

    fn append(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }
}

impl Default for SysexFramer {
    fn default() -> Self {
        Self::new()
    }
}
