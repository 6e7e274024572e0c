use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat, Record};

#[derive(Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    target: String,
    features: Vec<&'static str>,
}

impl Record for VersionOutput {
    fn headers() -> &'static [&'static str] {
        &["NAME", "VERSION", "TARGET", "FEATURES"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.to_string(),
            self.version.to_string(),
            self.target.clone(),
            self.features.join(","),
        ]
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("gtlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    print_record(
        &VersionOutput {
            name: "gtlink",
            version: env!("CARGO_PKG_VERSION"),
            target: target_triple(),
            features: enabled_features(),
        },
        format,
    );
    Ok(SUCCESS)
}

fn target_triple() -> String {
    option_env!("GTLINK_BUILD_TARGET")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS))
}

fn enabled_features() -> Vec<&'static str> {
    let mut features = vec!["cli", "device", "serial"];
    if cfg!(feature = "async") {
        features.push("async");
    }
    features
}
