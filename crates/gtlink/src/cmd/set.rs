use gtlink_schema::{param_id, resolve_parameter_metadata};
use serde::Serialize;

use crate::cmd::{parse_number, SetArgs, Session};
use crate::exit::{device_error, schema_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_record, OutputFormat, Record};

#[derive(Serialize)]
pub(crate) struct ValueOutput {
    pub block: &'static str,
    pub param: &'static str,
    pub id: String,
    pub address: String,
    pub size: usize,
    pub value: u32,
}

impl Record for ValueOutput {
    fn headers() -> &'static [&'static str] {
        &["BLOCK", "PARAM", "ID", "ADDRESS", "SIZE", "VALUE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.block.to_string(),
            self.param.to_string(),
            self.id.clone(),
            self.address.clone(),
            self.size.to_string(),
            self.value.to_string(),
        ]
    }
}

pub fn run(args: SetArgs, format: OutputFormat) -> CliResult<i32> {
    let id = param_id(&args.block, &args.param).map_err(|err| schema_error("lookup failed", err))?;
    let info = resolve_parameter_metadata(id).map_err(|err| schema_error("lookup failed", err))?;
    let value = parse_number(&args.value).map_err(|msg| CliError::new(USAGE, msg))?;

    let session = Session::open(&args.port)?;
    session
        .device
        .set_parameter(id, value)
        .map_err(|err| device_error("write failed", err))?;

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
