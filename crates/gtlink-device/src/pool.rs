use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::Mutex;

/// Fixed set of reusable message buffers for the asynchronous path.
///
/// Buffers are allocated once. A slot holding `Some` is free; acquiring moves
/// its storage into a [`PooledBuffer`], which puts it back when released or
/// dropped.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    slots: Box<[Mutex<Option<Box<[u8]>>>]>,
    buffer_size: usize,
}

impl BufferPool {
    /// Allocate `count` buffers of `buffer_size` bytes each.
    pub fn new(count: usize, buffer_size: usize) -> Self {
        let slots = (0..count)
            .map(|_| Mutex::new(Some(vec![0u8; buffer_size].into_boxed_slice())))
            .collect();
        Self {
            inner: Arc::new(PoolInner { slots, buffer_size }),
        }
    }

    /// Copy `msg` into the first free buffer.
    ///
    /// Returns `None` when every buffer is in use or `msg` does not fit.
    pub fn acquire(&self, msg: &[u8]) -> Option<PooledBuffer> {
        if msg.len() > self.inner.buffer_size {
            return None;
        }

        for (slot, entry) in self.inner.slots.iter().enumerate() {
            let Some(mut storage) = entry.lock().take() else {
                continue;
            };
            storage[..msg.len()].copy_from_slice(msg);
            return Some(PooledBuffer {
                pool: Arc::clone(&self.inner),
                slot,
                storage: Some(storage),
                len: msg.len(),
            });
        }
        None
    }

    /// Total number of buffers.
    pub fn capacity(&self) -> usize {
        self.inner.slots.len()
    }

    /// Number of buffers currently free.
    pub fn available(&self) -> usize {
        self.inner
            .slots
            .iter()
            .filter(|entry| entry.lock().is_some())
            .count()
    }

    /// Size of each buffer in bytes.
    pub fn buffer_size(&self) -> usize {
        self.inner.buffer_size
    }
}

/// One in-use pool buffer holding a complete message.
pub struct PooledBuffer {
    pool: Arc<PoolInner>,
    slot: usize,
    storage: Option<Box<[u8]>>,
    len: usize,
}

impl PooledBuffer {
    /// Index of the pool slot backing this buffer.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Return the buffer to its pool.
    pub fn release(self) {}
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.storage {
            Some(storage) => &storage[..self.len],
            None => &[],
        }
    }
}

impl AsRef<[u8]> for PooledBuffer {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("slot", &self.slot)
            .field("len", &self.len)
            .finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(storage) = self.storage.take() {
            if let Some(entry) = self.pool.slots.get(self.slot) {
                *entry.lock() = Some(storage);
            }
        }
    }
}
