//! Schema migrations and per-connection setup for the SQLite store.
//!
//! Uses `rusqlite_migration` to manage schema migrations via SQLite's
//! `user_version` pragma. Migrations are embedded at compile time via
//! `include_str!`.

use std::time::Duration;

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::error::StorageError;

/// All schema migrations, applied in order via `user_version` tracking.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!(
        "migrations/001_initial_schema.sql"
    ))])
}

/// Opens (or creates) the database at `path`, switches it to WAL, and
/// applies all pending migrations.
///
/// Run once before the pool opens; pooled connections only need
/// [`configure`] since the journal mode is stored in the database file.
pub fn open_database(path: &str, busy_timeout: Duration) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(path)?;
    // WAL lets pooled readers proceed while one connection writes.
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    configure(&conn, busy_timeout)?;
    migrations()
        .to_latest(&mut conn)
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(conn)
}

/// Per-connection settings, applied each time a pooled connection is
/// checked out.
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<(), StorageError> {
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    // Cross-entity references are not enforced by the store.
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_valid() {
        assert!(migrations().validate().is_ok());
    }

    #[test]
    fn open_database_creates_all_relations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.db");
        let conn = open_database(path.to_str().unwrap(), Duration::from_secs(1)).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(names, vec!["agents", "customer", "orders"]);
    }

    #[test]
    fn database_is_left_in_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let path = path.to_str().unwrap();
        drop(open_database(path, Duration::from_secs(1)).unwrap());

        let conn = Connection::open(path).unwrap();
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn reopening_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.db");
        let path = path.to_str().unwrap();
        drop(open_database(path, Duration::from_secs(1)).unwrap());
        assert!(open_database(path, Duration::from_secs(1)).is_ok());
    }
}
