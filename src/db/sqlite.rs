//! Connection setup for the single-file local store. One SQLite file
//! under the app data directory plays the role a browser's
//! localStorage would: a handful of JSON documents, no relations.

use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Embedded migration scripts, applied in order on open.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_initial.sql"),
)];

/// Open the store at `path`, creating and migrating it as needed.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    prepare(&conn)?;
    Ok(conn)
}

/// In-memory store for tests.
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    run_migrations(conn)
}

/// Apply every migration newer than the stored schema version.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = current_version(conn);
    for &(version, sql) in MIGRATIONS {
        if version > current {
            tracing::info!(version, "applying store migration");
            conn.execute_batch(sql)
                .map_err(|e| DatabaseError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })?;
        }
    }
    Ok(())
}

/// Schema version of the opened store; 0 before the first migration.
fn current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_has_the_store_table() {
        let conn = open_memory_database().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='store'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        assert_eq!(current_version(&conn), 1);
    }

    #[test]
    fn rerunning_migrations_is_harmless() {
        let conn = open_memory_database().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn), 1);
    }

    #[test]
    fn on_disk_database_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healthvoice.db");
        {
            let conn = open_database(&path).unwrap();
            conn.execute(
                "INSERT INTO store (key, value, updated_at) VALUES ('probe', '1', '')",
                [],
            )
            .unwrap();
        }
        let conn = open_database(&path).unwrap();
        let value: String = conn
            .query_row("SELECT value FROM store WHERE key='probe'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, "1");
    }
}
