pub mod kv;
pub mod repository;
pub mod sqlite;

pub use kv::*;
pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored document '{key}' is not valid JSON: {reason}")]
    CorruptDocument { key: String, reason: String },

    #[error("Could not serialize document '{key}': {reason}")]
    Serialize { key: String, reason: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },
}
