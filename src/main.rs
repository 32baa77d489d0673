//! CLI entry point for the arts master's degree map builder.
//!
//! Joins yearly completions CSVs to institution locations and writes one
//! year-keyed JSON file for the map.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use degree_map::config::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_REFERENCE_PATH, RunConfig};
use degree_map::driver::run;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "degree_map")]
#[command(about = "Aggregate arts master's degrees per institution per year", long_about = None)]
struct Cli {
    /// Institution location reference CSV
    #[arg(long, default_value = DEFAULT_REFERENCE_PATH)]
    reference: PathBuf,

    /// Directory containing the yearly completions CSVs
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory to write `<timestamp>_output.json` into
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let started_at = Utc::now();
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/degree_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("degree_map.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = RunConfig {
        reference_path: cli.reference,
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
    };

    let summary = run(&config, started_at)?;
    info!(output = %summary.output.display(), "Done");

    Ok(())
}
