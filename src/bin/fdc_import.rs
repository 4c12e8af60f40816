//! Dry-run import of USDA FoodData Central values into the catalog
//! Usage: FDC_API_KEY=... cargo run --bin fdc-import -- [--overwrite] [--delay-ms N] [--limit N] [--output FILE]
//!
//! Prints candidate updates. With --output, writes the merged foods as JSON
//! for review; the embedded catalog itself is never modified.

use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use rda_tracker::catalog;
use rda_tracker::config::Config;
use rda_tracker::fdc::{run_import, FdcClient, FdcError, ImportOptions};
use rda_tracker::models::FoodItem;

struct Args {
    options: ImportOptions,
    output: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut options = ImportOptions::default();
    let mut output = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--overwrite" => options.overwrite = true,
            "--delay-ms" => {
                let value = args.next().ok_or("--delay-ms needs a value")?;
                let ms: u64 = value.parse().map_err(|_| format!("invalid --delay-ms: {}", value))?;
                options.delay = Duration::from_millis(ms);
            }
            "--limit" => {
                let value = args.next().ok_or("--limit needs a value")?;
                options.limit = Some(value.parse().map_err(|_| format!("invalid --limit: {}", value))?);
            }
            "--output" => {
                output = Some(PathBuf::from(args.next().ok_or("--output needs a path")?));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Args { options, output })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rda_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = Config::from_env();
    let api_key = config.fdc_api_key.ok_or(FdcError::MissingApiKey)?;
    let client = FdcClient::new(api_key)?;

    let report = run_import(&client, catalog::foods(), &args.options);

    println!(
        "FDC import dry-run complete. Candidate updates: {} (unmatched: {}, failed: {})",
        report.updates.len(),
        report.unmatched.len(),
        report.failures.len()
    );
    for update in report.updates.iter().take(5) {
        let found: Vec<&str> = update
            .per_gram
            .iter()
            .filter(|(_, v)| *v != 0.0)
            .map(|(n, _)| n.key())
            .take(8)
            .collect();
        println!("  - {} [FDC {}]: {}", update.name, update.fdc_id, found.join(", "));
    }

    if let Some(path) = args.output {
        let merged: Vec<&FoodItem> = report.updates.iter().map(|u| &u.updated).collect();
        let json = serde_json::to_string_pretty(&serde_json::json!({ "foods": merged }))?;
        std::fs::write(&path, json)?;
        println!("Wrote {} merged foods to {}", merged.len(), path.display());
    }

    Ok(())
}
