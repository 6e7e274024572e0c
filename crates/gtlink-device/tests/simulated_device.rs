use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use crossbeam_channel::{unbounded, Receiver};
use gtlink_device::{
    Device, DeviceConfig, DeviceError, DeviceEvent, HandshakeConfig, RouterConfig,
};
use gtlink_frame::{encode_write_bytes, parse_write, IDENTITY_REQUEST};
use gtlink_schema::{block_id, identity_to_device_address, param_id, resolve_parameter_metadata};
use gtlink_transport::{ByteSource, Transmit};
use parking_lot::Mutex;

const DEVICE_ID: u8 = 0x10;
const WAIT: Duration = Duration::from_secs(2);

/// In-process stand-in for the hardware: answers identity and read requests
/// and echoes writes back, all through the shared byte source.
struct SimulatedDevice {
    source: ByteSource,
    memory: Mutex<HashMap<u32, u8>>,
    answer_identity: bool,
}

impl SimulatedDevice {
    fn new(source: &ByteSource, answer_identity: bool) -> Arc<Self> {
        Arc::new(Self {
            source: source.clone(),
            memory: Mutex::new(HashMap::new()),
            answer_identity,
        })
    }

    fn transmitter(self: &Arc<Self>) -> Arc<dyn Transmit> {
        let sim = Arc::clone(self);
        Arc::new(move |bytes: &[u8]| -> gtlink_transport::Result<()> {
            sim.on_message(bytes);
            Ok(())
        })
    }

    fn poke(&self, address: u32, data: &[u8]) {
        let mut memory = self.memory.lock();
        for (i, &b) in data.iter().enumerate() {
            memory.insert(address + i as u32, b);
        }
    }

    fn on_message(&self, msg: &[u8]) {
        if msg == IDENTITY_REQUEST {
            if self.answer_identity {
                self.source.dispatch(&[
                    0xF0, 0x7E, DEVICE_ID, 0x06, 0x02, 0x41, 0x4F, 0x03, 0x00, 0x00, 0x01, 0x00,
                    0x00, 0x00, 0xF7,
                ]);
            }
            return;
        }

        if msg.len() == 18 && msg[7] == 0x11 {
            let address = u32::from_be_bytes([msg[8], msg[9], msg[10], msg[11]]);
            let size = u32::from_be_bytes([msg[12], msg[13], msg[14], msg[15]]);
            self.answer_read(address, size);
            return;
        }

        if let Ok(cmd) = parse_write(msg, DEVICE_ID) {
            self.poke(cmd.address, cmd.data);
            self.source.dispatch(msg);
        }
    }

    fn answer_read(&self, address: u32, size: u32) {
        let data: Vec<u8> = {
            let memory = self.memory.lock();
            (0..size)
                .map(|i| memory.get(&(address + i)).copied().unwrap_or(0))
                .collect()
        };

        let mut reply = BytesMut::new();
        for (i, chunk) in data.chunks(32).enumerate() {
            encode_write_bytes(DEVICE_ID, address + (i * 32) as u32, chunk, &mut reply)
                .expect("chunk should encode");
        }
        self.source.dispatch(&reply);
    }
}

fn quick_config() -> DeviceConfig {
    DeviceConfig {
        handshake: HandshakeConfig {
            timeout: Duration::from_millis(200),
            retries: 1,
        },
        // Block answers arrive as a burst of chunks.
        router: RouterConfig {
            pool_size: 16,
            handoff_capacity: 16,
            ..RouterConfig::default()
        },
        ..DeviceConfig::default()
    }
}

fn connect(
    answer_identity: bool,
) -> (Arc<SimulatedDevice>, ByteSource, gtlink_device::Result<Device>) {
    let source = ByteSource::new();
    let sim = SimulatedDevice::new(&source, answer_identity);
    let device = Device::connect(quick_config(), &source, sim.transmitter())
        .map(|(device, _identity)| device);
    (sim, source, device)
}

fn events(device: &Device) -> Receiver<DeviceEvent> {
    let (tx, rx) = unbounded();
    device.set_callback(move |event| {
        let _ = tx.send(*event);
    });
    rx
}

#[test]
fn connect_adopts_identified_device_id() {
    let (_sim, source, device) = connect(true);
    let device = device.expect("simulated device should answer");

    assert_eq!(device.device_id(), DEVICE_ID);
    assert_eq!(source.consumer_count(), 1);
    assert_eq!(device.router_stats().completed, 1);

    device.shutdown().expect("shutdown should succeed");
    assert_eq!(source.consumer_count(), 0);
}

#[test]
fn connect_reports_identity_fields() {
    let source = ByteSource::new();
    let sim = SimulatedDevice::new(&source, true);
    let (_device, identity) =
        Device::connect(quick_config(), &source, sim.transmitter()).expect("connect");

    assert_eq!(identity.device_id, DEVICE_ID);
    assert_eq!(identity.manufacturer_id, 0x41);
    assert_eq!(identity.family_code, [0x4F, 0x03]);
    assert_eq!(identity.software_revision, [0x01, 0x00, 0x00, 0x00]);
}

#[test]
fn silent_device_fails_the_handshake() {
    let (_sim, source, device) = connect(false);
    assert!(matches!(device, Err(DeviceError::HandshakeFailed(_))));
    assert_eq!(source.consumer_count(), 0);
}

#[test]
fn set_parameter_round_trips_through_echo() {
    let (_sim, _source, device) = connect(true);
    let device = device.expect("connect");
    let rx = events(&device);

    let id = param_id("DELAY1", "time").expect("known parameter");
    device.set_parameter(id, 480).expect("write should send");

    let event = rx.recv_timeout(WAIT).expect("echo should raise an event");
    assert_eq!(event, DeviceEvent::ParameterUpdate { id, len: 4 });
    assert_eq!(device.get_parameter(id).expect("resolvable"), 480);
}

#[test]
fn refresh_parameter_pulls_device_value() {
    let (sim, _source, device) = connect(true);
    let device = device.expect("connect");
    let rx = events(&device);

    let id = param_id("REVERB", "low_damp").expect("known parameter");
    let info = resolve_parameter_metadata(id).expect("resolvable");
    sim.poke(info.device_address(), &[0x2A]);

    device.refresh_parameter(id).expect("request should send");
    rx.recv_timeout(WAIT).expect("answer should raise an event");
    assert_eq!(device.get_parameter(id).expect("resolvable"), 0x2A);
}

#[test]
fn refresh_block_fills_every_parameter() {
    let (sim, _source, device) = connect(true);
    let device = device.expect("connect");
    let rx = events(&device);

    let block = block_id("CHORUS").expect("known block");
    let base = identity_to_device_address(block);
    let pattern: Vec<u8> = (0..=255u8).map(|b| b & 0x7F).collect();
    sim.poke(base, &pattern);

    device.refresh_block(block).expect("request should send");
    for _ in 0..8 {
        rx.recv_timeout(WAIT).expect("one event per answered chunk");
    }

    let image = device.image();
    let start = block.offset();
    assert_eq!(&image.effects()[start..start + 256], pattern.as_slice());
}

#[test]
fn refresh_patch_name() {
    let (sim, _source, device) = connect(true);
    let device = device.expect("connect");
    let rx = events(&device);

    sim.poke(0x1000_0000, b"CRUNCH RHYTHM   ");
    device.refresh_patch_name().expect("request should send");

    assert_eq!(
        rx.recv_timeout(WAIT).expect("name update"),
        DeviceEvent::PresetNameUpdate
    );
    assert_eq!(device.patch_name(), "CRUNCH RHYTHM");
}

#[test]
fn unsolicited_identity_reply_is_not_an_event() {
    let (_sim, source, device) = connect(true);
    let device = device.expect("connect");
    let rx = events(&device);

    source.dispatch(&[
        0xF0, 0x7E, 0x05, 0x06, 0x02, 0x41, 0x00, 0x00, 0x00, 0x4F, 0x01, 0x02, 0x03, 0x04, 0xF7,
    ]);
    // A valid write behind it proves the reply was consumed first.
    let mut msg = BytesMut::new();
    encode_write_bytes(DEVICE_ID, 0x0000_0000, &[0x03], &mut msg).expect("encode");
    source.dispatch(&msg);

    assert_eq!(
        rx.recv_timeout(WAIT).expect("patch change"),
        DeviceEvent::PresetChange { patch_number: 3 }
    );
    assert_eq!(device.router_stats().handed_off, 2);
    assert_eq!(device.router_stats().completed, 1);
}
