//! Print every change the device reports over a serial port.
//!
//! Run with:
//!   cargo run --example serial-monitor --features serial -- /dev/ttyUSB0

use std::sync::Arc;

use gtlink::device::{Device, DeviceConfig};
use gtlink::transport::{ByteSource, SerialConfig, SerialLink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: serial-monitor <PORT>")?;

    let link = SerialLink::open(&SerialConfig::new(path))?;
    let source = ByteSource::new();
    let worker = source.spawn(link.reader()?)?;

    let (device, identity) = Device::connect(DeviceConfig::default(), &source, Arc::new(link))?;
    eprintln!("Device {:#04x} answered", identity.device_id);

    device.set_callback(|event| println!("{}: {event:?}", event.name()));
    device.enable_notifications()?;
    device.refresh_patch_name()?;

    // Runs until the port goes away.
    while worker.is_running() {
        std::thread::sleep(std::time::Duration::from_millis(250));
    }

    device.shutdown()?;
    Ok(())
}
