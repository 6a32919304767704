use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::MoodCategory;
use crate::config::DEFAULT_WATER_GOAL;

/// Daily water counter. Zeroed once per calendar date on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterCounter {
    pub daily: u32,
    pub goal: u32,
    pub last_reset: NaiveDate,
}

impl Default for WaterCounter {
    fn default() -> Self {
        Self {
            daily: 0,
            goal: DEFAULT_WATER_GOAL,
            // Epoch date forces a reset on the first interaction.
            last_reset: NaiveDate::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub date: NaiveDate,
    pub hours: f64,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureEntry {
    pub date: NaiveDate,
    pub systolic: u32,
    pub diastolic: u32,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarEntry {
    pub date: NaiveDate,
    /// mg/dL.
    pub value: u32,
    pub recorded_at: NaiveDateTime,
}

/// One mood record per calendar date; a later save replaces the
/// earlier same-day record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: MoodCategory,
    pub note: String,
    pub recorded_at: NaiveDateTime,
}

/// All non-medication health records, persisted as one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLog {
    #[serde(default)]
    pub water: WaterCounter,
    #[serde(default)]
    pub sleep: Vec<SleepEntry>,
    #[serde(default)]
    pub blood_pressure: Vec<BloodPressureEntry>,
    #[serde(default)]
    pub blood_sugar: Vec<BloodSugarEntry>,
    #[serde(default)]
    pub mood: Vec<MoodEntry>,
}
