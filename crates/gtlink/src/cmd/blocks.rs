use gtlink_schema::{identity_to_device_address, instances, BlockType, ParamId};
use serde::Serialize;

use crate::cmd::BlocksArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_records, OutputFormat, Record};

#[derive(Serialize)]
struct BlockOutput {
    slot: usize,
    name: &'static str,
    block_type: &'static str,
    address: String,
    params: usize,
}

impl Record for BlockOutput {
    fn headers() -> &'static [&'static str] {
        &["SLOT", "NAME", "TYPE", "ADDRESS", "PARAMS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.slot.to_string(),
            self.name.to_string(),
            self.block_type.to_string(),
            self.address.clone(),
            self.params.to_string(),
        ]
    }
}

pub fn run(args: BlocksArgs, format: OutputFormat) -> CliResult<i32> {
    let filter = match args.block_type.as_deref() {
        Some(name) => Some(
            BlockType::from_name(name)
                .ok_or_else(|| CliError::new(USAGE, format!("unknown block type '{name}'")))?,
        ),
        None => None,
    };

    let rows: Vec<BlockOutput> = instances()
        .iter()
        .enumerate()
        .filter(|(_, inst)| filter.is_none_or(|ty| inst.block_type == ty))
        .map(|(slot, inst)| BlockOutput {
            slot,
            name: inst.name,
            block_type: inst.block_type.name(),
            address: format!(
                "{:#010x}",
                identity_to_device_address(ParamId::from_slot(slot, 0))
            ),
            params: inst.block_type.params().len(),
        })
        .collect();

    print_records(&rows, format);
    Ok(SUCCESS)
}
