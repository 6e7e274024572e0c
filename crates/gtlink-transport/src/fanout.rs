use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::SendTimeoutError;
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::error::{Result, TransportError};
use crate::traits::ByteSink;

/// Default number of consumer slots.
pub const DEFAULT_MAX_CONSUMERS: usize = 10;

/// Identifier handed out by [`ByteSource::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumerId(usize);

impl ConsumerId {
    /// Slot index backing this registration.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Configuration for the byte fan-out hub.
#[derive(Debug, Clone)]
pub struct ByteSourceConfig {
    /// Maximum number of simultaneously registered consumers. Default: 10.
    pub max_consumers: usize,
    /// Bounded wait when a consumer queue is full. Default: 100ms.
    pub enqueue_timeout: Duration,
    /// Size of each read from the underlying stream. Default: 32 bytes.
    pub read_chunk: usize,
}

impl Default for ByteSourceConfig {
    fn default() -> Self {
        Self {
            max_consumers: DEFAULT_MAX_CONSUMERS,
            enqueue_timeout: Duration::from_millis(100),
            read_chunk: 32,
        }
    }
}

/// Fans a received byte stream out to every registered consumer.
///
/// Cloning yields another handle to the same registration table.
#[derive(Clone)]
pub struct ByteSource {
    inner: Arc<Inner>,
}

struct Inner {
    consumers: Mutex<Vec<Option<ByteSink>>>,
    config: ByteSourceConfig,
}

impl ByteSource {
    /// Create a hub with default configuration.
    pub fn new() -> Self {
        Self::with_config(ByteSourceConfig::default())
    }

    /// Create a hub with explicit configuration.
    pub fn with_config(config: ByteSourceConfig) -> Self {
        let slots = vec![None; config.max_consumers];
        Self {
            inner: Arc::new(Inner {
                consumers: Mutex::new(slots),
                config,
            }),
        }
    }

    /// Register a consumer queue in the first free slot.
    pub fn register(&self, sink: ByteSink) -> Result<ConsumerId> {
        let mut consumers = self.inner.consumers.lock();
        match consumers.iter().position(Option::is_none) {
            Some(slot) => {
                consumers[slot] = Some(sink);
                debug!(slot, "byte consumer registered");
                Ok(ConsumerId(slot))
            }
            None => Err(TransportError::ConsumerLimit {
                max: self.inner.config.max_consumers,
            }),
        }
    }

    /// Remove a previously registered consumer.
    pub fn deregister(&self, id: ConsumerId) -> Result<()> {
        let mut consumers = self.inner.consumers.lock();
        match consumers.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                debug!(slot = id.0, "byte consumer deregistered");
                Ok(())
            }
            _ => Err(TransportError::UnknownConsumer(id.0)),
        }
    }

    /// Number of registered consumers.
    pub fn consumer_count(&self) -> usize {
        self.inner
            .consumers
            .lock()
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Offer `bytes` to every consumer, in order.
    ///
    /// A full queue gets a bounded wait per byte; bytes that still do not fit
    /// are dropped for that consumer only. Consumers whose receiving side is
    /// gone are unregistered.
    pub fn dispatch(&self, bytes: &[u8]) {
        let timeout = self.inner.config.enqueue_timeout;
        let mut consumers = self.inner.consumers.lock();

        for (slot, entry) in consumers.iter_mut().enumerate() {
            let Some(sink) = entry else {
                continue;
            };

            let mut dropped = 0usize;
            let mut disconnected = false;
            for &byte in bytes {
                match sink.send_timeout(byte, timeout) {
                    Ok(()) => {}
                    Err(SendTimeoutError::Timeout(_)) => dropped += 1,
                    Err(SendTimeoutError::Disconnected(_)) => {
                        disconnected = true;
                        break;
                    }
                }
            }

            if disconnected {
                debug!(slot, "byte consumer disconnected, removing");
                *entry = None;
            } else if dropped > 0 {
                warn!(slot, dropped, "consumer queue full, bytes dropped");
            }
        }
    }

    /// Spawn the receive worker reading from `reader` until end of stream,
    /// a hard I/O error, or [`ReceiveWorker::stop`].
    pub fn spawn<R>(&self, mut reader: R) -> Result<ReceiveWorker>
    where
        R: Read + Send + 'static,
    {
        let source = self.clone();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let chunk = self.inner.config.read_chunk.max(1);

        let handle = std::thread::Builder::new()
            .name("gtlink-rx".to_string())
            .spawn(move || {
                let mut buf = vec![0u8; chunk];
                while flag.load(Ordering::Acquire) {
                    match reader.read(&mut buf) {
                        Ok(0) => {
                            debug!("byte stream reached end");
                            break;
                        }
                        Ok(n) => source.dispatch(&buf[..n]),
                        Err(err)
                            if matches!(
                                err.kind(),
                                ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock
                            ) =>
                        {
                            continue;
                        }
                        Err(err) => {
                            error!(error = %err, "byte stream read failed");
                            break;
                        }
                    }
                }
                flag.store(false, Ordering::Release);
            })?;

        Ok(ReceiveWorker {
            running,
            handle: Some(handle),
        })
    }
}

impl Default for ByteSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the thread pumping bytes into a [`ByteSource`].
pub struct ReceiveWorker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ReceiveWorker {
    /// Whether the worker is still reading.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the worker to stop after its current read returns.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Stop the worker and wait for it to exit.
    pub fn join(mut self) -> Result<()> {
        self.stop();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| TransportError::Shutdown),
            None => Ok(()),
        }
    }
}

impl Drop for ReceiveWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
