//! JSON-document key-value access over the `store` table.
//!
//! Every logical collection is one document under one key, written
//! whole on save: last write wins, no cross-document invariants.

use chrono::Local;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::DatabaseError;

/// Read the raw JSON document stored under `key`. Returns None if the
/// key has never been written.
pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM store WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Deserialize the document stored under `key`, or the type's default
/// when the key is absent.
pub fn get_document<T>(conn: &Connection, key: &str) -> Result<T, DatabaseError>
where
    T: DeserializeOwned + Default,
{
    match get_raw(conn, key)? {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| DatabaseError::CorruptDocument {
                key: key.into(),
                reason: e.to_string(),
            })
        }
        None => Ok(T::default()),
    }
}

/// Serialize `value` and store it under `key` (upsert).
pub fn put_document<T: Serialize>(
    conn: &Connection,
    key: &str,
    value: &T,
) -> Result<(), DatabaseError> {
    let json = serde_json::to_string(value).map_err(|e| DatabaseError::Serialize {
        key: key.into(),
        reason: e.to_string(),
    })?;
    conn.execute(
        "INSERT INTO store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        params![key, json, Local::now().naive_local().to_string()],
    )?;
    Ok(())
}

/// Remove the document stored under `key`.
pub fn delete_document(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM store WHERE key = ?1", [key])?;
    Ok(())
}
