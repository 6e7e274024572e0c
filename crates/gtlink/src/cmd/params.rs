use gtlink_schema::{block_id, identity_to_device_address, instance, ParamId};
use serde::Serialize;

use crate::cmd::ParamsArgs;
use crate::exit::{schema_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_records, OutputFormat, Record};

#[derive(Serialize)]
struct ParamOutput {
    name: &'static str,
    offset: u8,
    size: u8,
    id: String,
    address: String,
}

impl Record for ParamOutput {
    fn headers() -> &'static [&'static str] {
        &["NAME", "OFFSET", "SIZE", "ID", "ADDRESS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.to_string(),
            format!("{:#04x}", self.offset),
            self.size.to_string(),
            self.id.clone(),
            self.address.clone(),
        ]
    }
}

pub fn run(args: ParamsArgs, format: OutputFormat) -> CliResult<i32> {
    let base = block_id(&args.block).map_err(|err| schema_error("lookup failed", err))?;
    let slot = base.slot();
    let inst = instance(slot)
        .ok_or_else(|| CliError::new(INTERNAL, format!("block slot {slot} missing")))?;

    let rows: Vec<ParamOutput> = inst
        .block_type
        .params()
        .iter()
        .map(|param| {
            let id = ParamId::from_slot(slot, usize::from(param.offset));
            ParamOutput {
                name: param.name,
                offset: param.offset,
                size: param.size,
                id: id.to_string(),
                address: format!("{:#010x}", identity_to_device_address(id)),
            }
        })
        .collect();

    print_records(&rows, format);
    Ok(SUCCESS)
}
