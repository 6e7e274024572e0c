use gtlink_device::IdentityReply;
use serde::Serialize;

use crate::cmd::{IdentifyArgs, Session};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{hex, print_record, OutputFormat, Record};

#[derive(Serialize)]
struct IdentityOutput {
    port: String,
    device_id: u8,
    manufacturer_id: u8,
    family_code: String,
    family_number: String,
    software_revision: String,
}

impl IdentityOutput {
    fn new(port: &str, reply: &IdentityReply) -> Self {
        Self {
            port: port.to_string(),
            device_id: reply.device_id,
            manufacturer_id: reply.manufacturer_id,
            family_code: hex(&reply.family_code),
            family_number: hex(&reply.family_number),
            software_revision: hex(&reply.software_revision),
        }
    }
}

impl Record for IdentityOutput {
    fn headers() -> &'static [&'static str] {
        &["PORT", "DEVICE_ID", "MANUFACTURER", "FAMILY", "NUMBER", "REVISION"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.port.clone(),
            format!("{:#04x}", self.device_id),
            format!("{:#04x}", self.manufacturer_id),
            self.family_code.clone(),
            self.family_number.clone(),
            self.software_revision.clone(),
        ]
    }
}

pub fn run(args: IdentifyArgs, format: OutputFormat) -> CliResult<i32> {
    let session = Session::open(&args.port)?;
    print_record(&IdentityOutput::new(&args.port.port, &session.identity), format);
    Ok(SUCCESS)
}
