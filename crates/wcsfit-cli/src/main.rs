use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;
use log::info;
use wcsfit_pipeline::{run_fit, FitConfig, FitInput, FitReport};

/// Fit a linear TAN WCS to pixel/sky correspondences.
#[derive(Debug, Parser)]
#[command(author, version, about = "Linear TAN WCS fitting from matched reference points")]
struct Args {
    /// Path to JSON file containing a FitInput.
    #[arg(long)]
    input: String,

    /// Optional path to JSON FitConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,

    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<String>,

    /// Print FITS header cards instead of the JSON report.
    #[arg(long)]
    header: bool,

    /// Log level such as `info` or `wcsfit_optim=debug`; `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

fn write_report_json(report: &FitReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn header_text(report: &FitReport) -> String {
    let mut out = String::new();
    for card in report.wcs.header_cards() {
        out.push_str(&card.to_string());
        out.push('\n');
    }
    out
}

fn run_fit_from_files(input_path: &str, config_path: Option<&str>) -> Result<FitReport> {
    let input: FitInput = load_json_file(Path::new(input_path))?;

    let config = if let Some(cfg_path) = config_path {
        load_json_file::<FitConfig>(Path::new(cfg_path))?
    } else {
        FitConfig::default()
    };

    Ok(run_fit(&input, &config)?)
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(&args.log_level)?
        .log_to_stderr()
        .start()?;

    let report = run_fit_from_files(&args.input, args.config.as_deref())?;
    let text = if args.header {
        header_text(&report)
    } else {
        write_report_json(&report)?
    };

    match args.output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("writing {path}"))?;
            info!("report written to {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}
