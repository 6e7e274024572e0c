use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use gtlink_frame::{is_identity_reply, DEFAULT_MAX_MESSAGE, IDENTITY_REPLY_LEN};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{DeviceError, Result};
use crate::pool::{BufferPool, PooledBuffer};

/// Identity reply bytes delivered to a pending request.
pub type ReplyBuffer = [u8; IDENTITY_REPLY_LEN];

/// Configuration for message routing.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Number of asynchronous message buffers. Default: 8.
    pub pool_size: usize,
    /// Size of each buffer. Default: 512.
    pub buffer_size: usize,
    /// Depth of the hand-off queue to the consumer. Default: 8.
    pub handoff_capacity: usize,
    /// Wait for the pending-request lock while classifying. Default: 10ms.
    pub classify_lock_timeout: Duration,
    /// Wait on a full hand-off queue before dropping. Default: 100ms.
    pub enqueue_timeout: Duration,
    /// Wait for the pending-request lock when opening a request. Default: 100ms.
    pub request_lock_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            buffer_size: DEFAULT_MAX_MESSAGE,
            handoff_capacity: 8,
            classify_lock_timeout: Duration::from_millis(10),
            enqueue_timeout: Duration::from_millis(100),
            request_lock_timeout: Duration::from_millis(100),
        }
    }
}

/// What [`Router::route`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Delivered to the pending synchronous request.
    Completed,
    /// Queued for the asynchronous consumer.
    HandedOff,
    /// Dropped: no free buffer.
    NoBuffer,
    /// Dropped: the hand-off queue stayed full.
    QueueFull,
}

/// Routing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouterStats {
    pub completed: u64,
    pub handed_off: u64,
    pub dropped_no_buffer: u64,
    pub dropped_queue_full: u64,
}

#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    handed_off: AtomicU64,
    dropped_no_buffer: AtomicU64,
    dropped_queue_full: AtomicU64,
}

struct Pending {
    seq: u64,
    done: Sender<ReplyBuffer>,
}

/// Splits completed messages between the pending synchronous request and
/// the asynchronous consumer.
pub struct Router {
    pending: Mutex<Option<Pending>>,
    next_seq: AtomicU64,
    pool: BufferPool,
    handoff: Sender<PooledBuffer>,
    counters: Counters,
    config: RouterConfig,
}

impl Router {
    /// Create a router and the receiving end of its hand-off queue.
    pub fn new(config: RouterConfig) -> (Self, Receiver<PooledBuffer>) {
        let (handoff, rx) = bounded(config.handoff_capacity);
        let router = Self {
            pending: Mutex::new(None),
            next_seq: AtomicU64::new(0),
            pool: BufferPool::new(config.pool_size, config.buffer_size),
            handoff,
            counters: Counters::default(),
            config,
        };
        (router, rx)
    }

    /// Route one complete message.
    pub fn route(&self, msg: &[u8]) -> RouteOutcome {
        if self.try_complete(msg) {
            self.counters.completed.fetch_add(1, Ordering::Relaxed);
            return RouteOutcome::Completed;
        }
        self.hand_off(msg)
    }

    fn try_complete(&self, msg: &[u8]) -> bool {
        let Some(mut slot) = self.pending.try_lock_for(self.config.classify_lock_timeout) else {
            debug!("request lock busy, routing message as async");
            return false;
        };
        if slot.is_none() || !is_identity_reply(msg) {
            return false;
        }
        let Ok(reply) = ReplyBuffer::try_from(msg) else {
            return false;
        };
        let Some(pending) = slot.take() else {
            return false;
        };
        drop(slot);

        if pending.done.try_send(reply).is_err() {
            debug!(seq = pending.seq, "pending request abandoned before completion");
        }
        true
    }

    fn hand_off(&self, msg: &[u8]) -> RouteOutcome {
        let Some(buffer) = self.pool.acquire(msg) else {
            warn!(len = msg.len(), "buffer pool not available, message dropped");
            self.counters.dropped_no_buffer.fetch_add(1, Ordering::Relaxed);
            return RouteOutcome::NoBuffer;
        };

        match self.handoff.send_timeout(buffer, self.config.enqueue_timeout) {
            Ok(()) => {
                self.counters.handed_off.fetch_add(1, Ordering::Relaxed);
                RouteOutcome::HandedOff
            }
            Err(SendTimeoutError::Timeout(buffer) | SendTimeoutError::Disconnected(buffer)) => {
                warn!(
                    slot = buffer.slot(),
                    "message queue unavailable, message dropped"
                );
                self.counters.dropped_queue_full.fetch_add(1, Ordering::Relaxed);
                RouteOutcome::QueueFull
            }
        }
    }

    /// Open the single synchronous request slot.
    ///
    /// Fails immediately with [`DeviceError::RequestPending`] while another
    /// request is open.
    pub fn begin_request(&self) -> Result<PendingReply<'_>> {
        let timeout = self.config.request_lock_timeout;
        let Some(mut slot) = self.pending.try_lock_for(timeout) else {
            error!(?timeout, "request lock not acquired");
            return Err(DeviceError::LockTimeout(timeout));
        };
        if slot.is_some() {
            error!("synchronous request already pending");
            return Err(DeviceError::RequestPending);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let (done, rx) = bounded(1);
        *slot = Some(Pending { seq, done });
        Ok(PendingReply {
            router: self,
            seq,
            rx,
        })
    }

    /// Whether a synchronous request is open.
    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    pub fn stats(&self) -> RouterStats {
        RouterStats {
            completed: self.counters.completed.load(Ordering::Relaxed),
            handed_off: self.counters.handed_off.load(Ordering::Relaxed),
            dropped_no_buffer: self.counters.dropped_no_buffer.load(Ordering::Relaxed),
            dropped_queue_full: self.counters.dropped_queue_full.load(Ordering::Relaxed),
        }
    }

    /// Free buffers left in the asynchronous pool.
    pub fn buffers_available(&self) -> usize {
        self.pool.available()
    }

    fn clear_pending(&self, seq: u64) {
        let mut slot = self.pending.lock();
        if slot.as_ref().is_some_and(|pending| pending.seq == seq) {
            *slot = None;
        }
    }
}

/// Handle to an open synchronous request.
///
/// Dropping the handle cancels the request.
pub struct PendingReply<'a> {
    router: &'a Router,
    seq: u64,
    rx: Receiver<ReplyBuffer>,
}

impl PendingReply<'_> {
    /// Block until the reply arrives or `timeout` elapses.
    ///
    /// The request slot is cleared either way.
    pub fn wait(self, timeout: Duration) -> Result<ReplyBuffer> {
        match self.rx.recv_timeout(timeout) {
            Ok(reply) => Ok(reply),
            Err(RecvTimeoutError::Timeout) => {
                self.router.clear_pending(self.seq);
                // The router may have completed us between the timeout and the clear.
                self.rx
                    .try_recv()
                    .map_err(|_| DeviceError::Timeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(DeviceError::Shutdown),
        }
    }

    /// Abandon the request.
    pub fn cancel(self) {}
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        self.router.clear_pending(self.seq);
    }
}
