use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use bytes::BytesMut;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use gtlink_frame::{FramerConfig, FramerStats, SysexFramer, BROADCAST_DEVICE_ID};
use gtlink_schema::{resolve_parameter_metadata, ParamId};
use gtlink_transport::{ByteSink, ByteSource, ConsumerId, Transmit};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use tracing::{debug, error, info, warn};

use crate::control::notification_message;
use crate::error::{DeviceError, Result};
use crate::handshake::{device_inquiry, HandshakeConfig, IdentityReply};
use crate::image::DeviceImage;
use crate::pool::PooledBuffer;
use crate::protocol::{
    decode_message, encode_block_request, encode_parameter_request, encode_parameter_write,
    encode_patch_name_request, DeviceEvent,
};
use crate::router::{Router, RouterConfig, RouterStats};

/// Event callback, run on the consumer worker.
pub type EventCallback = Arc<dyn Fn(&DeviceEvent) + Send + Sync>;

/// Configuration for a device context.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Initial outgoing device id. Default: broadcast (`0x7F`).
    pub device_id: u8,
    /// Depth of the inbound byte queue. Default: 256.
    pub byte_queue_capacity: usize,
    pub framer: FramerConfig,
    pub router: RouterConfig,
    /// Used by [`Device::connect`].
    pub handshake: HandshakeConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_id: BROADCAST_DEVICE_ID,
            byte_queue_capacity: 256,
            framer: FramerConfig::default(),
            router: RouterConfig::default(),
            handshake: HandshakeConfig::default(),
        }
    }
}

struct Shared {
    router: Router,
    image: RwLock<DeviceImage>,
    callback: RwLock<Option<EventCallback>>,
    device_id: AtomicU8,
    framer_stats: Mutex<FramerStats>,
    transmit: Arc<dyn Transmit>,
}

impl Shared {
    fn handle(&self, buffer: PooledBuffer) {
        let device_id = self.device_id.load(Ordering::Acquire);
        let event = {
            let mut image = self.image.write();
            decode_message(&mut image, &buffer, device_id)
        };
        buffer.release();

        let Some(event) = event else {
            return;
        };
        debug!(event = event.name(), "device event");
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }
}

/// The device context: one mirror, one router and the two workers feeding
/// them.
///
/// Bytes pushed into the sink returned by [`Device::start`] are framed and
/// routed on the `gtlink-framer` thread; write commands are decoded into the
/// mirror on the `gtlink-events` thread, which also runs the event callback.
pub struct Device {
    shared: Arc<Shared>,
    sink: ByteSink,
    shutdown: Mutex<Option<Sender<()>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    registration: Mutex<Option<(ByteSource, ConsumerId)>>,
    handshake: HandshakeConfig,
}

impl Device {
    /// Spawn the workers and return the context with its inbound byte sink.
    pub fn start(config: DeviceConfig, transmit: Arc<dyn Transmit>) -> Result<(Self, ByteSink)> {
        let (sink, bytes) = bounded(config.byte_queue_capacity);
        let (router, handoff) = Router::new(config.router);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);

        let shared = Arc::new(Shared {
            router,
            image: RwLock::new(DeviceImage::new()),
            callback: RwLock::new(None),
            device_id: AtomicU8::new(config.device_id),
            framer_stats: Mutex::new(FramerStats::default()),
            transmit,
        });

        let framer = {
            let shared = Arc::clone(&shared);
            let shutdown = shutdown_rx.clone();
            let framer_config = config.framer;
            std::thread::Builder::new()
                .name("gtlink-framer".to_string())
                .spawn(move || run_framer(&shared, &framer_config, &bytes, &shutdown))
                .map_err(gtlink_transport::TransportError::from)?
        };

        let events = {
            let shared = Arc::clone(&shared);
            std::thread::Builder::new()
                .name("gtlink-events".to_string())
                .spawn(move || run_consumer(&shared, &handoff, &shutdown_rx))
        };
        let events = match events {
            Ok(handle) => handle,
            Err(err) => {
                drop(shutdown_tx);
                let _ = framer.join();
                return Err(gtlink_transport::TransportError::from(err).into());
            }
        };

        let device = Self {
            shared,
            sink: sink.clone(),
            shutdown: Mutex::new(Some(shutdown_tx)),
            workers: Mutex::new(vec![framer, events]),
            registration: Mutex::new(None),
            handshake: config.handshake,
        };
        info!(device_id = config.device_id, "device context started");
        Ok((device, sink))
    }

    /// Start a context fed by `source`, identify the device and adopt its id.
    ///
    /// Fails if no identity reply arrives within the configured retries.
    pub fn connect(
        config: DeviceConfig,
        source: &ByteSource,
        transmit: Arc<dyn Transmit>,
    ) -> Result<(Self, IdentityReply)> {
        let (device, _sink) = Self::start(config, transmit)?;
        device.register_consumer(source)?;

        let identity = device.device_inquiry(&device.handshake)?;
        device.set_device_id(identity.device_id);
        Ok((device, identity))
    }

    /// Run the identity handshake. Does not change the device id.
    pub fn device_inquiry(&self, config: &HandshakeConfig) -> Result<IdentityReply> {
        device_inquiry(&self.shared.router, self.shared.transmit.as_ref(), config)
    }

    /// Register this context's byte sink with `source`.
    ///
    /// A previous registration is replaced.
    pub fn register_consumer(&self, source: &ByteSource) -> Result<ConsumerId> {
        self.deregister_consumer()?;
        let id = source.register(self.sink.clone())?;
        *self.registration.lock() = Some((source.clone(), id));
        Ok(id)
    }

    /// Remove this context's byte sink from its source, if registered.
    pub fn deregister_consumer(&self) -> Result<()> {
        if let Some((source, id)) = self.registration.lock().take() {
            source.deregister(id)?;
        }
        Ok(())
    }

    /// Another handle to the inbound byte sink.
    pub fn byte_sink(&self) -> ByteSink {
        self.sink.clone()
    }

    /// Send raw bytes to the device.
    pub fn send_raw(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_running()?;
        self.shared.transmit.transmit(bytes)?;
        Ok(())
    }

    pub fn device_id(&self) -> u8 {
        self.shared.device_id.load(Ordering::Acquire)
    }

    pub fn set_device_id(&self, id: u8) {
        self.shared.device_id.store(id, Ordering::Release);
        info!(device_id = id, "device id set");
    }

    /// Current mirrored value of parameter `id`.
    pub fn get_parameter(&self, id: ParamId) -> Result<u32> {
        let info = resolve_parameter_metadata(id).inspect_err(|err| {
            error!(error = %err, "invalid parameter");
        })?;
        Ok(self.shared.image.read().param_value(&info))
    }

    /// Send a write of `value` to parameter `id`.
    ///
    /// The mirror changes only once the device echoes the write back.
    pub fn set_parameter(&self, id: ParamId, value: u32) -> Result<()> {
        let mut msg = BytesMut::new();
        let info = encode_parameter_write(self.device_id(), id, value, &mut msg)
            .inspect_err(|err| error!(error = %err, %id, "failed to encode parameter write"))?;
        debug!(
            block = info.instance.name,
            param = info.param.name,
            value,
            "parameter write"
        );
        self.send_raw(&msg)
    }

    /// Ask the device for the whole block slot starting at `id`.
    pub fn refresh_block(&self, id: ParamId) -> Result<()> {
        let mut msg = BytesMut::new();
        encode_block_request(self.device_id(), id, &mut msg)
            .inspect_err(|err| error!(error = %err, %id, "invalid block"))?;
        self.send_raw(&msg)
    }

    /// Ask the device for the current value of parameter `id`.
    pub fn refresh_parameter(&self, id: ParamId) -> Result<()> {
        let mut msg = BytesMut::new();
        encode_parameter_request(self.device_id(), id, &mut msg)
            .inspect_err(|err| error!(error = %err, %id, "invalid parameter"))?;
        self.send_raw(&msg)
    }

    /// Ask the device for the current patch name.
    pub fn refresh_patch_name(&self) -> Result<()> {
        let mut msg = BytesMut::new();
        encode_patch_name_request(self.device_id(), &mut msg)?;
        self.send_raw(&msg)
    }

    /// Install the event callback, replacing any previous one.
    ///
    /// The callback runs on the consumer worker and must return promptly.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: Fn(&DeviceEvent) + Send + Sync + 'static,
    {
        *self.shared.callback.write() = Some(Arc::new(callback));
    }

    pub fn clear_callback(&self) {
        *self.shared.callback.write() = None;
    }

    pub fn enable_notifications(&self) -> Result<()> {
        self.send_raw(&notification_message(true, self.device_id()))?;
        info!("parameter change notification enabled");
        Ok(())
    }

    pub fn disable_notifications(&self) -> Result<()> {
        self.send_raw(&notification_message(false, self.device_id()))?;
        info!("parameter change notification disabled");
        Ok(())
    }

    pub fn patch_number(&self) -> u32 {
        self.shared.image.read().patch_number()
    }

    pub fn patch_name(&self) -> String {
        self.shared.image.read().patch_name()
    }

    /// Read access to the whole mirror. Hold the guard briefly; the consumer
    /// worker waits on it.
    pub fn image(&self) -> RwLockReadGuard<'_, DeviceImage> {
        self.shared.image.read()
    }

    pub fn router_stats(&self) -> RouterStats {
        self.shared.router.stats()
    }

    /// Counters of the framer worker, updated after every message.
    pub fn framer_stats(&self) -> FramerStats {
        *self.shared.framer_stats.lock()
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.lock().is_some()
    }

    /// Stop both workers and deregister from the byte source.
    ///
    /// Idempotent; also run on drop.
    pub fn shutdown(&self) -> Result<()> {
        let deregistered = self.deregister_consumer();

        let Some(shutdown) = self.shutdown.lock().take() else {
            return deregistered;
        };
        drop(shutdown);

        let workers = std::mem::take(&mut *self.workers.lock());
        let mut panicked = false;
        for worker in workers {
            if worker.join().is_err() {
                panicked = true;
            }
        }
        info!("device context stopped");

        deregistered?;
        if panicked {
            return Err(DeviceError::Shutdown);
        }
        Ok(())
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(DeviceError::Shutdown)
        }
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(error = %err, "device shutdown incomplete");
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("device_id", &self.device_id())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn run_framer(
    shared: &Shared,
    config: &FramerConfig,
    bytes: &Receiver<u8>,
    shutdown: &Receiver<()>,
) {
    let mut framer = SysexFramer::with_config(config);
    loop {
        select! {
            recv(bytes) -> byte => {
                let Ok(byte) = byte else {
                    debug!("byte sinks closed");
                    break;
                };
                if let Some(msg) = framer.push(byte) {
                    shared.router.route(msg);
                    *shared.framer_stats.lock() = framer.stats();
                } else if framer.take_overflow() {
                    *shared.framer_stats.lock() = framer.stats();
                }
            }
            recv(shutdown) -> _ => break,
        }
    }
    *shared.framer_stats.lock() = framer.stats();
    debug!("framer worker exiting");
}

fn run_consumer(shared: &Shared, handoff: &Receiver<PooledBuffer>, shutdown: &Receiver<()>) {
    loop {
        select! {
            recv(handoff) -> buffer => {
                let Ok(buffer) = buffer else {
                    break;
                };
                shared.handle(buffer);
            }
            recv(shutdown) -> _ => break,
        }
    }
    debug!("consumer worker exiting");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::BytesMut;
    use gtlink_frame::encode_write_bytes;
    use gtlink_schema::param_id;

    use super::*;

    fn capture() -> (Arc<dyn Transmit>, Arc<Mutex<Vec<Vec<u8>>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&sent);
        let tx: Arc<dyn Transmit> = Arc::new(move |bytes: &[u8]| -> gtlink_transport::Result<()> {
            log.lock().push(bytes.to_vec());
            Ok(())
        });
        (tx, sent)
    }

    fn feed(sink: &ByteSink, bytes: &[u8]) {
        for &b in bytes {
            sink.send(b).unwrap();
        }
    }

    #[test]
    fn inbound_write_reaches_mirror_and_callback() {
        let (tx, _sent) = capture();
        let (device, sink) = Device::start(
            DeviceConfig {
                device_id: 0x10,
                ..DeviceConfig::default()
            },
            tx,
        )
        .unwrap();

        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        device.set_callback(move |event| {
            let _ = event_tx.send(*event);
        });

        feed(
            &sink,
            &[
                0xFE, 0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x10, 0x00, 0x12, 0x00, 0x01,
                0x5D, 0xF7,
            ],
        );

        let event = event_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event.name(), "PARAMETER_UPDATE");
        assert_eq!(device.get_parameter(ParamId::from_offset(0)).unwrap(), 1);
        assert_eq!(device.router_stats().handed_off, 1);
        device.shutdown().unwrap();
    }

    #[test]
    fn set_parameter_transmits_without_touching_mirror() {
        let (tx, sent) = capture();
        let (device, _sink) = Device::start(
            DeviceConfig {
                device_id: 0x10,
                ..DeviceConfig::default()
            },
            tx,
        )
        .unwrap();

        let id = param_id("COMP", "sw").unwrap();
        device.set_parameter(id, 1).unwrap();
        assert_eq!(
            sent.lock()[0],
            vec![0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x4F, 0x12, 0x10, 0x00, 0x12, 0x00, 0x01, 0x5D, 0xF7]
        );
        assert_eq!(device.get_parameter(id).unwrap(), 0);
    }

    #[test]
    fn misuse_is_reported_to_caller() {
        let (tx, sent) = capture();
        let (device, _sink) = Device::start(DeviceConfig::default(), tx).unwrap();

        let bad = ParamId::from_slot(0, 0x80);
        assert!(matches!(
            device.set_parameter(bad, 1),
            Err(DeviceError::Schema(_))
        ));
        assert!(matches!(
            device.get_parameter(ParamId::from_offset(99_999)),
            Err(DeviceError::Schema(_))
        ));
        assert!(matches!(
            device.refresh_block(ParamId::from_offset(1)),
            Err(DeviceError::Schema(_))
        ));
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn notifications_and_refresh_use_current_id() {
        let (tx, sent) = capture();
        let (device, _sink) = Device::start(DeviceConfig::default(), tx).unwrap();
        device.set_device_id(0x10);

        device.enable_notifications().unwrap();
        device.refresh_patch_name().unwrap();
        device.refresh_block(gtlink_schema::block_id("COMP").unwrap()).unwrap();
        device.disable_notifications().unwrap();

        let sent = sent.lock();
        assert_eq!(sent.len(), 4);
        assert!(sent.iter().all(|msg| msg[2] == 0x10));
        assert_eq!(sent[0][12], 0x01);
        assert_eq!(sent[2][7], 0x11);
        assert_eq!(sent[3][12], 0x00);
    }

    #[test]
    fn patch_state_follows_inbound_writes() {
        let (tx, _sent) = capture();
        let (device, sink) = Device::start(DeviceConfig::default(), tx).unwrap();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        device.set_callback(move |event| {
            let _ = event_tx.send(*event);
        });

        let mut msg = BytesMut::new();
        encode_write_bytes(0x10, 0x0000_0000, &[0x00, 0x07], &mut msg).unwrap();
        encode_write_bytes(0x10, 0x1000_0000, b"JAZZ CHORUS     ", &mut msg).unwrap();
        feed(&sink, &msg);

        let first = event_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let second = event_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, DeviceEvent::PresetChange { patch_number: 7 });
        assert_eq!(second, DeviceEvent::PresetNameUpdate);
        assert_eq!(device.patch_number(), 7);
        assert_eq!(device.patch_name(), "JAZZ CHORUS");
    }

    #[test]
    fn shutdown_is_idempotent_and_blocks_sends() {
        let (tx, _sent) = capture();
        let (device, _sink) = Device::start(DeviceConfig::default(), tx).unwrap();
        assert!(device.is_running());
        device.shutdown().unwrap();
        device.shutdown().unwrap();
        assert!(!device.is_running());
        assert!(matches!(
            device.send_raw(&[0xF0, 0xF7]),
            Err(DeviceError::Shutdown)
        ));
    }

    #[test]
    fn registration_follows_context_lifetime() {
        let (tx, _sent) = capture();
        let source = ByteSource::new();
        let (device, _sink) = Device::start(DeviceConfig::default(), tx).unwrap();

        device.register_consumer(&source).unwrap();
        assert_eq!(source.consumer_count(), 1);
        device.register_consumer(&source).unwrap();
        assert_eq!(source.consumer_count(), 1);

        drop(device);
        assert_eq!(source.consumer_count(), 0);
    }
}
