//! SQLite flowsheet database access.
//!
//! The source database is an input artifact produced elsewhere; flownet
//! only reads it. Runtime defaults are conservative:
//! - the connection is opened read-only, and opening fails if the file
//!   does not exist (never create an empty flowsheet by accident)
//! - `busy_timeout = 5s` to reduce transient lock failures if another
//!   process still has the file open
//! - `foreign_keys = ON` so any accidental write path would be checked

pub mod query;
pub mod schema;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};
use std::{path::Path, time::Duration};

/// Busy timeout used for source database connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open an existing flowsheet SQLite database read-only and apply
/// runtime pragmas.
///
/// # Errors
///
/// Returns an error if the file does not exist or if opening or
/// configuring the connection fails.
pub fn open_source(path: &Path) -> Result<Connection> {
    if !path.exists() {
        bail!("source database {} does not exist", path.display());
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("open source database {}", path.display()))?;

    configure_connection(&conn).context("configure sqlite pragmas")?;

    Ok(conn)
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BUSY_TIMEOUT, open_source};
    use crate::db::schema;
    use tempfile::TempDir;

    fn fixture_db() -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("flowsheet.db");
        let conn = rusqlite::Connection::open(&path).expect("create fixture db");
        schema::init_schema(&conn).expect("apply schema");
        (dir, path)
    }

    #[test]
    fn open_source_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("nope.db");

        let err = open_source(&missing).expect_err("must refuse missing file");
        assert!(err.to_string().contains("does not exist"), "got: {err}");
    }

    #[test]
    fn open_source_sets_busy_timeout_and_fk() {
        let (_dir, path) = fixture_db();
        let conn = open_source(&path).expect("open source db");

        let busy_timeout_ms: u64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .expect("query busy_timeout");
        assert_eq!(
            u128::from(busy_timeout_ms),
            DEFAULT_BUSY_TIMEOUT.as_millis()
        );

        let foreign_keys: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .expect("query foreign_keys");
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn open_source_is_read_only() {
        let (_dir, path) = fixture_db();
        let conn = open_source(&path).expect("open source db");

        let result = conn.execute("INSERT INTO stream (id, name) VALUES (1, 'x')", []);
        assert!(result.is_err(), "read-only connection must reject writes");
    }
}
