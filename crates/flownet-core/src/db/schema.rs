//! Canonical SQLite schema for the flowsheet source tables.
//!
//! Production databases are built by the upstream flowsheet exporter;
//! this DDL exists so tests and local fixtures can create compatible
//! databases. Four tables:
//! - `unit` — process units; `type_flag` nonzero marks a secondary unit
//! - `stream` — material streams
//! - `unit_material` — directed links; `feed_flag = 1` means the unit
//!   consumes the stream, `0` means it produces it
//! - `load_max` — optional per-unit capacity values

/// Source schema DDL.
pub const SOURCE_SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS unit (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type_flag INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS stream (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS unit_material (
    unit_id INTEGER NOT NULL,
    stream_id INTEGER NOT NULL,
    feed_flag INTEGER NOT NULL CHECK (feed_flag IN (0, 1))
);

CREATE TABLE IF NOT EXISTS load_max (
    unit_id INTEGER NOT NULL,
    load_max REAL NOT NULL
);
";

/// Create the flowsheet source tables if they do not exist.
///
/// # Errors
///
/// Returns an error if executing the DDL fails.
pub fn init_schema(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SOURCE_SCHEMA_SQL)
}
