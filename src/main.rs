//! CLI entry point for the HY6 schedule extractor.
//!
//! Fetches the ECO Transit GTFS feed (or reads an already extracted copy),
//! pulls Highway 6 departures at EagleVail, Avon, Walmart and Vail, and
//! prints them as JavaScript snippets for the web page and the widget.

use anyhow::Result;
use clap::Parser;
use hy6_schedule::{
    feed::resolve_feed_dir,
    fetch::BasicClient,
    output::{log_timetable_json, print_snippets},
    route::GTFS_URL,
    schedule::Schedule,
};
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
#[command(name = "hy6_schedule")]
#[command(about = "Extract HY6 departure times from the ECO Transit GTFS feed", long_about = None)]
struct Cli {
    /// Directory holding an already extracted feed; downloads the feed when omitted
    #[arg(value_name = "GTFS_DIR")]
    gtfs_dir: Option<PathBuf>,

    /// Feed archive URL (defaults to $GTFS_URL, then the ECO Transit feed)
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file. Stdout carries the snippets only.
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/hy6_schedule.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("hy6_schedule.log"));

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
    let url = cli
        .url
        .or_else(|| std::env::var("GTFS_URL").ok())
        .unwrap_or_else(|| GTFS_URL.to_string());

    let client = BasicClient::new();
    let gtfs_dir = resolve_feed_dir(cli.gtfs_dir, &client, &url).await?;

    let schedule = Schedule::from_dir(&gtfs_dir)?;
    let timetable = schedule.timetable();
    log_timetable_json(&timetable)?;

    print_snippets(&timetable)?;
    info!(dir = %gtfs_dir.display(), "Snippets written");

    Ok(())
}
