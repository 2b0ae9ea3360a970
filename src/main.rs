//! CLI entry point for the channel rater.
//!
//! Reads ZHA diagnostic snapshots, averages each channel's energy scan per
//! hour of day and prints the channels from least to most congested.

use anyhow::Result;
use channel_rater::analyzers::analyzer::analyze;
use channel_rater::config::RaterConfig;
use channel_rater::output::{print_pretty, render_ranked, write_csv};
use channel_rater::select::select_snapshots;
use channel_rater::stats::EnergyScan;
use clap::{Parser, Subcommand};
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
#[command(name = "channel_rater")]
#[command(about = "Rank radio channels by hour-weighted energy scan congestion", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: RaterConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print channels sorted from least to most congested (default)
    Rate {
        /// Also write the ranking to this CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },
    /// List the snapshots that pass selection and what each contributes
    ListSnapshots,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file. Stdout carries the ranking.
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/channel_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("channel_rater.log"));

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
    cli.config.validate()?;

    match cli.command.unwrap_or(Commands::Rate { csv: None }) {
        Commands::Rate { csv } => {
            let report = analyze(&cli.config)?;
            print_pretty(&report);

            if let Some(path) = csv {
                write_csv(&path, &report.ranked)?;
                info!(path = %path.display(), "CSV report written");
            }

            println!("{}", render_ranked(&report.ranked)?);
        }
        Commands::ListSnapshots => list_snapshots(&cli.config)?,
    }

    Ok(())
}

/// Logs every selected snapshot with its hour bucket and channel count.
#[tracing::instrument(skip(config), fields(input_dir = %config.input_dir.display()))]
fn list_snapshots(config: &RaterConfig) -> Result<()> {
    let files = select_snapshots(&config.input_dir, config.extension(), config.window())?;
    let clock = config.clock();

    let mut with_scan = 0;

    for file in &files {
        match EnergyScan::load(file, &config.field_path)? {
            Some(scan) => {
                with_scan += 1;
                info!(
                    path = %file.path.display(),
                    modified = %file.modified,
                    hour = clock.hour_of(file.modified),
                    channels = scan.channels.len(),
                    "Snapshot"
                );
            }
            None => {
                info!(
                    path = %file.path.display(),
                    modified = %file.modified,
                    field_path = %config.field_path,
                    "Snapshot without energy scan"
                );
            }
        }
    }

    info!(
        selected = files.len(),
        with_scan,
        without_scan = files.len() - with_scan,
        window_hours = config.window_hours,
        "Snapshot list summary"
    );

    Ok(())
}
