use crate::models::enums::{ExerciseCategory, MoodCategory};

/// A structured action resolved from a free-text utterance. The
/// resolver only classifies; executing the action is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The user confirmed taking a dose without naming which one.
    MedicationTaken,
    RecordWater,
    /// Hours are the first integer anywhere in the utterance, if any.
    RecordSleep { hours: Option<u32> },
    /// The raw (lowercased) utterance rides along as the mood note.
    RecordMood { mood: MoodCategory, note: String },
    StartExercise { category: ExerciseCategory },
    StartMeditation { minutes: u32 },
    /// Present only when at least two integers were heard; otherwise
    /// the caller prompts for re-entry and records nothing.
    RecordBloodPressure { reading: Option<(u32, u32)> },
    Help,
    Unrecognized,
}
