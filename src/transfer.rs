//! Whole-profile export and import as a single JSON document.
//!
//! Import applies each known section independently: a section that is
//! absent or fails to parse leaves the corresponding store untouched,
//! so a partial document can still restore what it carries.

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Clock;
use crate::db::{self, DatabaseError};
use crate::models::{ExerciseSession, HealthLog, Medication};
use crate::voice::VoiceSettings;

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Not a valid export document: {0}")]
    InvalidDocument(String),
    #[error("Export version {0} is newer than this build understands")]
    UnsupportedVersion(u32),
    #[error("No recognized sections in the export document")]
    NothingToImport,
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: String,
    pub medications: Vec<Medication>,
    pub health_data: HealthLog,
    pub exercise_data: Vec<ExerciseSession>,
    pub voice_settings: VoiceSettings,
}

/// Which stores an import replaced, skipped, and complained about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

/// Snapshot all four stores into one bundle.
pub fn export_all<C: Clock>(
    conn: &Connection,
    clock: &C,
) -> Result<ExportBundle, TransferError> {
    Ok(ExportBundle {
        version: EXPORT_VERSION,
        exported_at: clock.now().to_string(),
        medications: db::load_medications(conn)?,
        health_data: db::load_health_log(conn)?,
        exercise_data: db::load_exercise_log(conn)?,
        voice_settings: db::load_voice_settings(conn)?,
    })
}

pub fn export_json<C: Clock>(conn: &Connection, clock: &C) -> Result<String, TransferError> {
    let bundle = export_all(conn, clock)?;
    serde_json::to_string_pretty(&bundle)
        .map_err(|e| TransferError::InvalidDocument(e.to_string()))
}

/// Import a document produced by `export_json`. Succeeds when at least
/// one section applied; every skipped section is reported.
pub fn import_json(conn: &Connection, json: &str) -> Result<ImportSummary, TransferError> {
    let document: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| TransferError::InvalidDocument(e.to_string()))?;
    let sections = document
        .as_object()
        .ok_or_else(|| TransferError::InvalidDocument("expected a JSON object".into()))?;

    if let Some(version) = sections.get("version").and_then(|v| v.as_u64()) {
        if version as u32 > EXPORT_VERSION {
            return Err(TransferError::UnsupportedVersion(version as u32));
        }
    }

    let mut summary = ImportSummary::default();
    apply_section::<Vec<Medication>>(conn, sections, db::KEY_MEDICATIONS, &mut summary)?;
    apply_section::<HealthLog>(conn, sections, db::KEY_HEALTH_DATA, &mut summary)?;
    apply_section::<Vec<ExerciseSession>>(conn, sections, db::KEY_EXERCISE_DATA, &mut summary)?;
    apply_section::<VoiceSettings>(conn, sections, db::KEY_VOICE_SETTINGS, &mut summary)?;

    if summary.applied.is_empty() {
        return Err(TransferError::NothingToImport);
    }

    tracing::info!(
        applied = summary.applied.len(),
        skipped = summary.skipped.len(),
        "import finished"
    );
    Ok(summary)
}

fn apply_section<T>(
    conn: &Connection,
    sections: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    summary: &mut ImportSummary,
) -> Result<(), TransferError>
where
    T: DeserializeOwned + Serialize,
{
    match sections.get(key) {
        None => summary.skipped.push(key.to_string()),
        Some(value) => match serde_json::from_value::<T>(value.clone()) {
            Ok(parsed) => {
                db::put_document(conn, key, &parsed)?;
                summary.applied.push(key.to_string());
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "import section rejected");
                summary.warnings.push(format!("{key}: {e}"));
                summary.skipped.push(key.to_string());
            }
        },
    }
    Ok(())
}
