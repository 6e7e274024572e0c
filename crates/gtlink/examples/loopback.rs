//! Drive a device context without hardware.
//!
//! The transmitter closure plays the device: it answers the identity request
//! and echoes every write command back, so each `set_parameter` comes back
//! as a parameter update event.
//!
//! Run with:
//!   cargo run --example loopback

use std::sync::Arc;
use std::time::Duration;

use gtlink::device::{Device, DeviceConfig};
use gtlink::frame::IDENTITY_REQUEST;
use gtlink::schema::{param_id, resolve_parameter_metadata};
use gtlink::transport::{ByteSource, Transmit};

const IDENTITY_REPLY: [u8; 15] = [
    0xF0, 0x7E, 0x10, 0x06, 0x02, 0x41, 0x4F, 0x03, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xF7,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = ByteSource::new();
    let wire = source.clone();
    let transmit: Arc<dyn Transmit> = Arc::new(move |bytes: &[u8]| -> gtlink::transport::Result<()> {
        if bytes == IDENTITY_REQUEST {
            wire.dispatch(&IDENTITY_REPLY);
        } else {
            wire.dispatch(bytes);
        }
        Ok(())
    });

    let (device, identity) = Device::connect(DeviceConfig::default(), &source, transmit)?;
    eprintln!("Connected to device {:#04x}", identity.device_id);

    device.set_callback(|event| eprintln!("event: {event:?}"));

    let id = param_id("DELAY1", "time")?;
    device.set_parameter(id, 480)?;
    std::thread::sleep(Duration::from_millis(100));

    let info = resolve_parameter_metadata(id)?;
    eprintln!(
        "{}.{} = {}",
        info.instance.name,
        info.param.name,
        device.get_parameter(id)?
    );

    device.shutdown()?;
    Ok(())
}
