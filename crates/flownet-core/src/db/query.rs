//! Row loaders for the four flowsheet source tables.
//!
//! Every loader returns rows in the table's insertion order
//! (`ORDER BY rowid`). Report output is required to be stable across
//! runs, and all downstream ordering — unit and stream construction
//! order, per-unit stream lists, producer/consumer lists — is derived
//! from the order these loaders return.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// One row of the `unit` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRow {
    pub id: i64,
    pub name: String,
    /// Nonzero marks a secondary unit; zero a primary unit.
    pub type_flag: i64,
}

/// One row of the `stream` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRow {
    pub id: i64,
    pub name: String,
}

/// One row of the `unit_material` link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRow {
    pub unit_id: i64,
    pub stream_id: i64,
    /// Nonzero: the unit consumes the stream. Zero: it produces it.
    pub feed_flag: i64,
}

/// One row of the `load_max` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadMaxRow {
    pub unit_id: i64,
    pub load_max: f64,
}

/// Load all unit rows in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_units(conn: &Connection) -> Result<Vec<UnitRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, type_flag FROM unit ORDER BY rowid")
        .context("prepare unit query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UnitRow {
                id: row.get(0)?,
                name: row.get(1)?,
                type_flag: row.get(2)?,
            })
        })
        .context("execute unit query")?
        .collect::<Result<Vec<_>, _>>()
        .context("collect unit rows")?;

    Ok(rows)
}

/// Load all stream rows in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_streams(conn: &Connection) -> Result<Vec<StreamRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM stream ORDER BY rowid")
        .context("prepare stream query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(StreamRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("execute stream query")?
        .collect::<Result<Vec<_>, _>>()
        .context("collect stream rows")?;

    Ok(rows)
}

/// Load all unit/stream link rows in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_links(conn: &Connection) -> Result<Vec<LinkRow>> {
    let mut stmt = conn
        .prepare("SELECT unit_id, stream_id, feed_flag FROM unit_material ORDER BY rowid")
        .context("prepare unit_material query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(LinkRow {
                unit_id: row.get(0)?,
                stream_id: row.get(1)?,
                feed_flag: row.get(2)?,
            })
        })
        .context("execute unit_material query")?
        .collect::<Result<Vec<_>, _>>()
        .context("collect unit_material rows")?;

    Ok(rows)
}

/// Load all load-max rows in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_load_max(conn: &Connection) -> Result<Vec<LoadMaxRow>> {
    let mut stmt = conn
        .prepare("SELECT unit_id, load_max FROM load_max ORDER BY rowid")
        .context("prepare load_max query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(LoadMaxRow {
                unit_id: row.get(0)?,
                load_max: row.get(1)?,
            })
        })
        .context("execute load_max query")?
        .collect::<Result<Vec<_>, _>>()
        .context("collect load_max rows")?;

    Ok(rows)
}
