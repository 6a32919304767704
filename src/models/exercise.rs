use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::ExerciseCategory;

/// Summary of a completed guided exercise session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSession {
    pub date: NaiveDate,
    pub duration_min: u32,
    pub category: ExerciseCategory,
    pub recorded_at: NaiveDateTime,
}
