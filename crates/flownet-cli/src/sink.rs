//! Report file writers: CSV, JSON, and XLSX sinks for the three
//! derived reports.
//!
//! Each report write is independent. A sink failure (unwritable path,
//! locked file) is logged at warn level and the run continues to the
//! next report; only graph construction errors are fatal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flownet_core::graph::FlowGraph;
use flownet_core::report::{self, MultiConsumerStream, UnitStreams, UnusedStream};
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Derive and write all three reports, warn-and-continue on failure.
pub fn write_reports(graph: &FlowGraph, csv: &Path, json: &Path, xlsx: &Path) {
    info!(path = %csv.display(), "Writing unused-streams report");
    if let Err(err) = write_unused_csv(&report::unused_streams(graph), csv) {
        warn!(path = %csv.display(), error = %err, "Skipping unused-streams report");
    }

    info!(path = %json.display(), "Writing multiple-consumers report");
    if let Err(err) = write_multi_consumers_json(&report::multi_consumer_streams(graph), json) {
        warn!(path = %json.display(), error = %err, "Skipping multiple-consumers report");
    }

    info!(path = %xlsx.display(), "Writing per-unit stream table");
    if let Err(err) = write_unit_table_xlsx(&report::unit_stream_table(graph), xlsx) {
        warn!(path = %xlsx.display(), error = %err, "Skipping per-unit stream table");
    }
}

/// One `id, name` line per unused stream, in construction order.
fn write_unused_csv(unused: &[UnusedStream], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create unused-streams file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for stream in unused {
        writeln!(out, "{}, {}", stream.id, stream.name)?;
    }

    out.flush()
        .with_context(|| format!("flush unused-streams file {}", path.display()))?;
    Ok(())
}

/// Pretty-printed JSON object `{stream_name: [consumer, ...]}` in
/// construction order (stream names are unique per the source's
/// identity contract; a duplicate name would be last-write-wins here).
fn write_multi_consumers_json(multi: &[MultiConsumerStream], path: &Path) -> Result<()> {
    let mut mapping = Map::with_capacity(multi.len());
    for entry in multi {
        mapping.insert(
            entry.stream.clone(),
            Value::from(entry.consumers.clone()),
        );
    }

    let file = File::create(path)
        .with_context(|| format!("create multiple-consumers file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &Value::Object(mapping))
        .with_context(|| format!("serialize multiple-consumers file {}", path.display()))?;

    out.flush()
        .with_context(|| format!("flush multiple-consumers file {}", path.display()))?;
    Ok(())
}

/// One worksheet per unit, named after the unit: input stream names
/// down column A, output stream names down column B, from row 1. The
/// two columns are positionally independent.
fn write_unit_table_xlsx(table: &[UnitStreams], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    for entry in table {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&entry.unit)
            .with_context(|| format!("name worksheet for unit {:?}", entry.unit))?;

        for (row, name) in entry.inputs.iter().enumerate() {
            worksheet.write_string(u32::try_from(row).context("row index")?, 0, name)?;
        }
        for (row, name) in entry.outputs.iter().enumerate() {
            worksheet.write_string(u32::try_from(row).context("row index")?, 1, name)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save per-unit stream table {}", path.display()))?;
    Ok(())
}
