use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, RecvTimeoutError};
use tracing::{info, warn};

use crate::cmd::{MonitorArgs, Session};
use crate::exit::{device_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_record, EventOutput, OutputFormat};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let session = Session::open(&args.port)?;
    let device = &session.device;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let (tx, rx) = unbounded();
    device.set_callback(move |event| {
        let _ = tx.send(*event);
    });

    if !args.no_notify {
        device
            .enable_notifications()
            .map_err(|err| device_error("enable notifications failed", err))?;
    }
    device
        .refresh_patch_name()
        .map_err(|err| device_error("patch name request failed", err))?;
    info!(device_id = device.device_id(), "monitoring device events");

    let mut printed = 0usize;
    while running.load(Ordering::SeqCst) {
        let event = match rx.recv_timeout(POLL_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        print_record(&EventOutput::from_event(device, &event), format);
        printed = printed.saturating_add(1);

        if args.count.is_some_and(|count| printed >= count) {
            break;
        }
    }

    device.clear_callback();
    let stats = device.router_stats();
    info!(
        events = printed,
        handed_off = stats.handed_off,
        dropped_no_buffer = stats.dropped_no_buffer,
        dropped_queue_full = stats.dropped_queue_full,
        "monitor stopped"
    );
    if !args.no_notify {
        if let Err(err) = device.disable_notifications() {
            warn!(error = %err, "failed to disable notifications");
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
