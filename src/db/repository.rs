//! Typed load/save wrappers over the document store, one pair per
//! logical key.

use rusqlite::Connection;

use crate::models::{ExerciseSession, HealthLog, Medication};
use crate::voice::VoiceSettings;

use super::kv::{get_document, put_document};
use super::DatabaseError;

pub const KEY_MEDICATIONS: &str = "medications";
pub const KEY_HEALTH_DATA: &str = "healthData";
pub const KEY_EXERCISE_DATA: &str = "exerciseData";
pub const KEY_VOICE_SETTINGS: &str = "voiceSettings";

pub fn load_medications(conn: &Connection) -> Result<Vec<Medication>, DatabaseError> {
    get_document(conn, KEY_MEDICATIONS)
}

pub fn save_medications(
    conn: &Connection,
    medications: &[Medication],
) -> Result<(), DatabaseError> {
    put_document(conn, KEY_MEDICATIONS, &medications)
}

pub fn load_health_log(conn: &Connection) -> Result<HealthLog, DatabaseError> {
    get_document(conn, KEY_HEALTH_DATA)
}

pub fn save_health_log(conn: &Connection, log: &HealthLog) -> Result<(), DatabaseError> {
    put_document(conn, KEY_HEALTH_DATA, log)
}

pub fn load_exercise_log(conn: &Connection) -> Result<Vec<ExerciseSession>, DatabaseError> {
    get_document(conn, KEY_EXERCISE_DATA)
}

pub fn save_exercise_log(
    conn: &Connection,
    sessions: &[ExerciseSession],
) -> Result<(), DatabaseError> {
    put_document(conn, KEY_EXERCISE_DATA, &sessions)
}

pub fn load_voice_settings(conn: &Connection) -> Result<VoiceSettings, DatabaseError> {
    get_document(conn, KEY_VOICE_SETTINGS)
}

pub fn save_voice_settings(
    conn: &Connection,
    settings: &VoiceSettings,
) -> Result<(), DatabaseError> {
    put_document(conn, KEY_VOICE_SETTINGS, settings)
}
