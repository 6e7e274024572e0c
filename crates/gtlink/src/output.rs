use std::fmt::Write as _;
use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gtlink_device::{Device, DeviceEvent};
use gtlink_schema::resolve_parameter_metadata;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Something printable as one row of a listing.
pub trait Record: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;

    fn pretty(&self) -> String {
        Self::headers()
            .iter()
            .zip(self.cells())
            .map(|(header, cell)| format!("{}={cell}", header.to_ascii_lowercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Print a whole listing at once: a JSON array, one table, or one line per
/// record. Raw output is tab-separated cells without a header.
pub fn print_records<T: Record>(records: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(T::headers().to_vec());
            for record in records {
                table.add_row(record.cells());
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!("{}", record.pretty());
            }
        }
        OutputFormat::Raw => {
            for record in records {
                println!("{}", record.cells().join("\t"));
            }
        }
    }
}

/// Print a single record as it arrives. JSON output is one object per line.
pub fn print_record<T: Record>(record: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
            );
        }
        other => print_records(std::slice::from_ref(record), other),
    }
}

#[derive(Serialize)]
pub struct EventOutput {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    pub timestamp: String,
}

impl EventOutput {
    /// Describe `event` using the mirror state it left behind.
    pub fn from_event(device: &Device, event: &DeviceEvent) -> Self {
        let mut out = Self {
            event: event.name(),
            patch_number: None,
            patch_name: None,
            id: None,
            block: None,
            param: None,
            len: None,
            value: None,
            timestamp: now_unix_seconds(),
        };

        match *event {
            DeviceEvent::PresetChange { patch_number } => out.patch_number = Some(patch_number),
            DeviceEvent::PresetNameUpdate => out.patch_name = Some(device.patch_name()),
            DeviceEvent::ParameterUpdate { id, len } => {
                out.id = Some(id.to_string());
                out.len = Some(len);
                match resolve_parameter_metadata(id) {
                    Ok(info) => {
                        out.block = Some(info.instance.name);
                        out.param = Some(info.param.name);
                        out.value = Some(device.image().param_value(&info));
                    }
                    Err(_) => {
                        out.block = gtlink_schema::instance(id.slot()).map(|inst| inst.name);
                    }
                }
            }
        }
        out
    }
}

impl Record for EventOutput {
    fn headers() -> &'static [&'static str] {
        &["EVENT", "BLOCK", "PARAM", "ID", "LEN", "VALUE"]
    }

    fn cells(&self) -> Vec<String> {
        let detail = match self.event {
            "PRESET_CHANGE" => self.patch_number.map(|n| n.to_string()),
            "PRESET_NAME_UPDATE" => self.patch_name.clone(),
            _ => self.value.map(|v| v.to_string()),
        };
        vec![
            self.event.to_string(),
            opt(self.block),
            opt(self.param),
            self.id.clone().unwrap_or_else(|| "-".to_string()),
            self.len.map_or_else(|| "-".to_string(), |n| n.to_string()),
            detail.unwrap_or_else(|| "-".to_string()),
        ]
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Space separated upper-case hex, e.g. `F0 41 10`.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

pub fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        size: u8,
    }

    impl Record for Row {
        fn headers() -> &'static [&'static str] {
            &["NAME", "SIZE"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.name.to_string(), self.size.to_string()]
        }
    }

    #[test]
    fn hex_formats_bytes() {
        assert_eq!(hex(&[0xF0, 0x41, 0x0A]), "F0 41 0A");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn pretty_uses_lowercase_headers() {
        let row = Row {
            name: "time",
            size: 4,
        };
        assert_eq!(row.pretty(), "name=time size=4");
    }
}
