#![forbid(unsafe_code)]

mod sink;

use std::env;
use std::path::PathBuf;

use clap::Parser;
use flownet_core::{db, graph::FlowGraph, report};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fnet: process unit and stream network reports",
    long_about = "Load a flowsheet SQLite database, build the unit/stream graph, and write \
                  the unused-streams, multiple-consumers, and per-unit stream reports."
)]
struct Cli {
    /// Input flowsheet database file.
    #[arg(long = "db", value_name = "PATH", default_value = "db.db")]
    db: PathBuf,

    /// Output .csv file listing unused streams.
    #[arg(long = "csv", value_name = "PATH", default_value = "unused_streams.csv")]
    csv: String,

    /// Output .json file mapping multiply-consumed streams to consumers.
    #[arg(long = "json", value_name = "PATH", default_value = "multiple_streams.json")]
    json: String,

    /// Output .xlsx file with one sheet of input/output streams per unit.
    #[arg(long = "xlsx", value_name = "PATH", default_value = "all_units.xlsx")]
    xlsx: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FLOWNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "flownet=debug,info"
        } else {
            "flownet=info,warn"
        })
    });

    let format = env::var("FLOWNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Append `extension` unless the name already ends with it.
fn with_extension(name: &str, extension: &str) -> PathBuf {
    if name.ends_with(extension) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}{extension}"))
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let csv_path = with_extension(&cli.csv, ".csv");
    let json_path = with_extension(&cli.json, ".json");
    let xlsx_path = with_extension(&cli.xlsx, ".xlsx");

    info!(db = %cli.db.display(), "Connecting to flowsheet database");
    let conn = db::open_source(&cli.db)?;

    info!("Building unit/stream graph");
    let graph = FlowGraph::from_source(&conn)?;
    info!(
        units = graph.unit_count(),
        streams = graph.stream_count(),
        "Graph built"
    );

    // Diagnostic side-channel, not a report.
    for (unit, stream) in report::feed_pairs(&graph) {
        debug!(unit, stream, "feed link");
    }

    sink::write_reports(&graph, &csv_path, &json_path, &xlsx_path);

    info!("Program finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::with_extension;
    use std::path::PathBuf;

    #[test]
    fn missing_extension_is_appended() {
        assert_eq!(with_extension("unused", ".csv"), PathBuf::from("unused.csv"));
    }

    #[test]
    fn present_extension_is_kept() {
        assert_eq!(
            with_extension("out/unused.csv", ".csv"),
            PathBuf::from("out/unused.csv")
        );
    }
}
