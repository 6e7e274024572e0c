use crossbeam_channel::bounded;
use gtlink_device::{DeviceError, DeviceEvent};
use gtlink_schema::{param_id, resolve_parameter_metadata};

use crate::cmd::set::ValueOutput;
use crate::cmd::{parse_duration, GetArgs, Session};
use crate::exit::{device_error, schema_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run(args: GetArgs, format: OutputFormat) -> CliResult<i32> {
    let id = param_id(&args.block, &args.param).map_err(|err| schema_error("lookup failed", err))?;
    let info = resolve_parameter_metadata(id).map_err(|err| schema_error("lookup failed", err))?;
    let timeout = parse_duration(&args.timeout)?;

    let session = Session::open(&args.port)?;
    let device = &session.device;

    let start = id.offset();
    let end = start + info.size();
    let (tx, rx) = bounded(1);
    device.set_callback(move |event| {
        if let DeviceEvent::ParameterUpdate { id, len } = *event {
            let first = id.offset();
            if first < end && first + len > start {
                let _ = tx.try_send(());
            }
        }
    });

    device
        .refresh_parameter(id)
        .map_err(|err| device_error("read request failed", err))?;
    rx.recv_timeout(timeout)
        .map_err(|_| device_error("read failed", DeviceError::Timeout(timeout)))?;
    device.clear_callback();

    let value = device
        .get_parameter(id)
        .map_err(|err| device_error("read failed", err))?;

    print_record(
        &ValueOutput {
            block: info.instance.name,
            param: info.param.name,
            id: id.to_string(),
            address: format!("{:#010x}", info.device_address()),
            size: info.size(),
            value,
        },
        format,
    );
    Ok(SUCCESS)
}
