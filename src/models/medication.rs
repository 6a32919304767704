use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication with its daily schedule and per-date intake history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    /// Free-text dosage, e.g. "500mg".
    pub dosage: String,
    /// Doses per day. The schedule itself is `times`.
    pub frequency: u32,
    /// Scheduled times of day as zero-padded `HH:MM`, unique, input
    /// order preserved. Persisted records may lack this field entirely;
    /// such a medication contributes no dose occurrences.
    #[serde(default)]
    pub times: Vec<String>,
    /// Times already confirmed taken, keyed by calendar date.
    /// A time appears at most once per date.
    #[serde(default)]
    pub taken: BTreeMap<NaiveDate, Vec<String>>,
}

impl Medication {
    /// Whether the `time` dose was already confirmed on `date`.
    pub fn taken_at(&self, date: NaiveDate, time: &str) -> bool {
        self.taken
            .get(&date)
            .is_some_and(|times| times.iter().any(|t| t == time))
    }
}

/// One expected intake of a medication at a scheduled time today.
/// Derived from the medication list on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseOccurrence {
    pub medication_id: Uuid,
    pub name: String,
    pub time: String,
    pub taken: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisinopril() -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: 2,
            times: vec!["09:00".into(), "21:00".into()],
            taken: BTreeMap::new(),
        }
    }

    #[test]
    fn taken_at_checks_date_and_time() {
        let mut med = lisinopril();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        med.taken.insert(date, vec!["09:00".into()]);

        assert!(med.taken_at(date, "09:00"));
        assert!(!med.taken_at(date, "21:00"));
        assert!(!med.taken_at(date.succ_opt().unwrap(), "09:00"));
    }

    #[test]
    fn deserializes_without_times_or_taken() {
        let json = r#"{"id":"7a4a1e68-0a2c-4a6e-9f4f-0c9f9a3d8b21","name":"Aspirin","dosage":"81mg","frequency":1}"#;
        let med: Medication = serde_json::from_str(json).unwrap();
        assert!(med.times.is_empty());
        assert!(med.taken.is_empty());
    }
}
