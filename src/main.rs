//! CLI entry point for the bikeshare explorer.
//!
//! Asks which city, month and weekday to look at, then prints travel time,
//! station, duration and rider statistics for the matching trips.

use anyhow::Result;
use bikeshare_explorer::{catalog::CityCatalog, console::Console, session};
use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data interactively", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV files, replacing the built-in cities
    #[arg(short, long, value_name = "JSON")]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr (keeps prompts readable) + optional JSON rolling log file
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    // Nothing is written to disk unless LOG_FILE_PATH is set.
    let log_file = log_file_location(std::env::var("LOG_FILE_PATH").ok());
    let (json_layer, _file_guard) = match log_file {
        Some((log_dir, log_file_name)) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?),
                );
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => CityCatalog::load(path, &cli.data_dir)?,
        None => CityCatalog::new(&cli.data_dir),
    };
    info!(
        data_dir = %cli.data_dir.display(),
        cities = catalog.cities().count(),
        "Catalog ready"
    );
    for (city, file) in catalog.iter() {
        debug!(city, file, "City data source");
    }

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    session::run(&mut console, &catalog)?;

    Ok(())
}

/// Splits `LOG_FILE_PATH` into the directory and file name prefix used by the
/// rolling appender. An unset or empty value disables file logging.
fn log_file_location(path: Option<String>) -> Option<(PathBuf, OsString)> {
    let path = PathBuf::from(path.filter(|p| !p.trim().is_empty())?);
    let file_name = path
        .file_name()
        .map_or_else(|| OsString::from("bikeshare.log"), OsStr::to_os_string);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, file_name))
}
