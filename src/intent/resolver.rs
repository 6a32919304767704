//! Free-text utterances to structured intents using keyword heuristics.
//!
//! Matching walks an ordered rule list and the first rule whose
//! keywords appear in the lowercased utterance wins, so a sentence
//! mixing several topics resolves to the highest-priority one. "Taken"
//! outranks everything: "I have taken my blood pressure pills" is a
//! dose confirmation, not a blood pressure reading.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::DEFAULT_MEDITATION_MINUTES;
use crate::models::enums::{ExerciseCategory, MoodCategory};

use super::types::Intent;

static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// One matching rule: a predicate over the normalized utterance and a
/// builder that extracts any embedded parameters.
struct Rule {
    name: &'static str,
    applies: fn(&str) -> bool,
    build: fn(&str) -> Intent,
}

/// Priority order is a contract, not an accident of code layout.
const RULES: &[Rule] = &[
    Rule {
        name: "medication-taken",
        applies: is_medication_taken,
        build: |_| Intent::MedicationTaken,
    },
    Rule {
        name: "record-water",
        applies: is_record_water,
        build: |_| Intent::RecordWater,
    },
    Rule {
        name: "record-sleep",
        applies: is_record_sleep,
        build: build_sleep,
    },
    Rule {
        name: "record-mood",
        applies: is_record_mood,
        build: build_mood,
    },
    Rule {
        name: "start-exercise",
        applies: is_start_exercise,
        build: build_exercise,
    },
    Rule {
        name: "start-meditation",
        applies: is_start_meditation,
        build: |_| Intent::StartMeditation {
            minutes: DEFAULT_MEDITATION_MINUTES,
        },
    },
    Rule {
        name: "record-blood-pressure",
        applies: is_record_blood_pressure,
        build: build_blood_pressure,
    },
    Rule {
        name: "help",
        applies: is_help,
        build: |_| Intent::Help,
    },
];

/// Resolve an utterance to an intent. Pure and infallible: anything
/// the rules don't claim becomes `Unrecognized`.
pub fn resolve(utterance: &str) -> Intent {
    let text = utterance.trim().to_lowercase();
    for rule in RULES {
        if (rule.applies)(&text) {
            tracing::debug!(rule = rule.name, "utterance matched");
            return (rule.build)(&text);
        }
    }
    Intent::Unrecognized
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn is_medication_taken(text: &str) -> bool {
    contains_any(text, &["taken", "took", "ingested"])
}

fn is_record_water(text: &str) -> bool {
    text.contains("water") && contains_any(text, &["drank", "drunk", "had", "finished"])
}

fn is_record_sleep(text: &str) -> bool {
    contains_any(text, &["sleep", "slept"])
}

fn is_record_mood(text: &str) -> bool {
    contains_any(
        text,
        &["mood", "feel", "good", "bad", "happy", "sad", "stress"],
    )
}

fn is_start_exercise(text: &str) -> bool {
    contains_any(text, &["exercise", "workout", "stretch", "calisthenics"])
}

fn is_start_meditation(text: &str) -> bool {
    contains_any(text, &["meditat", "breathing", "mindful"])
}

fn is_record_blood_pressure(text: &str) -> bool {
    text.contains("blood pressure")
}

fn is_help(text: &str) -> bool {
    contains_any(text, &["help", "command"])
}

/// The first integer anywhere in the utterance. Deliberately not
/// scoped to the words around the sleep keyword: "at 10 I slept 7
/// hours" reads 10.
fn first_number(text: &str) -> Option<u32> {
    RE_NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

fn all_numbers(text: &str) -> Vec<u32> {
    RE_NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn build_sleep(text: &str) -> Intent {
    Intent::RecordSleep {
        hours: first_number(text),
    }
}

/// The finer mood category re-scans the whole utterance, independent
/// of which keyword opened the branch.
fn build_mood(text: &str) -> Intent {
    let mood = if contains_any(text, &["very", "totally", "extremely", "amazing", "fantastic"]) {
        MoodCategory::VeryHappy
    } else if contains_any(text, &["good", "happy", "joyful", "glad"]) {
        MoodCategory::Happy
    } else if contains_any(text, &["bad", "depressed", "sad", "down"]) {
        MoodCategory::Sad
    } else if contains_any(text, &["stress", "angry", "irritated", "annoyed"]) {
        MoodCategory::Angry
    } else {
        MoodCategory::Neutral
    };
    Intent::RecordMood {
        mood,
        note: text.to_string(),
    }
}

fn build_exercise(text: &str) -> Intent {
    let category = if text.contains("stretch") {
        ExerciseCategory::Stretch
    } else if contains_any(text, &["aerobic", "walk", "cardio"]) {
        ExerciseCategory::Cardio
    } else {
        ExerciseCategory::Strength
    };
    Intent::StartExercise { category }
}

fn build_blood_pressure(text: &str) -> Intent {
    let numbers = all_numbers(text);
    let reading = if numbers.len() >= 2 {
        Some((numbers[0], numbers[1]))
    } else {
        None
    };
    Intent::RecordBloodPressure { reading }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taken_wins_over_every_other_keyword() {
        assert_eq!(resolve("I took my pills"), Intent::MedicationTaken);
        assert_eq!(
            resolve("I have taken my blood pressure medication"),
            Intent::MedicationTaken
        );
        assert_eq!(
            resolve("taken, and I feel good after some water"),
            Intent::MedicationTaken
        );
        assert_eq!(resolve("medication ingested"), Intent::MedicationTaken);
    }

    #[test]
    fn water_needs_both_the_noun_and_a_drank_word() {
        assert_eq!(resolve("I drank a glass of water"), Intent::RecordWater);
        assert_eq!(resolve("just had some water"), Intent::RecordWater);
        assert_eq!(resolve("water"), Intent::Unrecognized);
    }

    #[test]
    fn sleep_extracts_the_first_integer() {
        assert_eq!(
            resolve("I slept 7 hours"),
            Intent::RecordSleep { hours: Some(7) }
        );
        assert_eq!(resolve("how was my sleep"), Intent::RecordSleep { hours: None });
    }

    #[test]
    fn sleep_hours_misfire_on_unrelated_leading_number() {
        // First-integer extraction is utterance-wide on purpose.
        assert_eq!(
            resolve("at 10 I slept 7 hours"),
            Intent::RecordSleep { hours: Some(10) }
        );
    }

    #[test]
    fn mood_category_chain_prefers_intensifiers() {
        assert_eq!(
            resolve("I feel very good today"),
            Intent::RecordMood {
                mood: MoodCategory::VeryHappy,
                note: "i feel very good today".into(),
            }
        );
        assert_eq!(
            resolve("feeling good"),
            Intent::RecordMood {
                mood: MoodCategory::Happy,
                note: "feeling good".into(),
            }
        );
        assert_eq!(
            resolve("my mood is bad"),
            Intent::RecordMood {
                mood: MoodCategory::Sad,
                note: "my mood is bad".into(),
            }
        );
        assert_eq!(
            resolve("so much stress at work"),
            Intent::RecordMood {
                mood: MoodCategory::Angry,
                note: "so much stress at work".into(),
            }
        );
        assert_eq!(
            resolve("record my mood"),
            Intent::RecordMood {
                mood: MoodCategory::Neutral,
                note: "record my mood".into(),
            }
        );
    }

    #[test]
    fn sleep_outranks_mood_words_in_the_same_sentence() {
        assert_eq!(
            resolve("I slept badly"),
            Intent::RecordSleep { hours: None }
        );
    }

    #[test]
    fn exercise_categories() {
        assert_eq!(
            resolve("start stretching"),
            Intent::StartExercise {
                category: ExerciseCategory::Stretch
            }
        );
        assert_eq!(
            resolve("aerobic exercise please"),
            Intent::StartExercise {
                category: ExerciseCategory::Cardio
            }
        );
        assert_eq!(
            resolve("let's exercise"),
            Intent::StartExercise {
                category: ExerciseCategory::Strength
            }
        );
    }

    #[test]
    fn meditation_is_a_fixed_five_minutes() {
        assert_eq!(
            resolve("start meditation"),
            Intent::StartMeditation { minutes: 5 }
        );
        assert_eq!(
            resolve("breathing session"),
            Intent::StartMeditation { minutes: 5 }
        );
    }

    #[test]
    fn blood_pressure_needs_two_numbers() {
        assert_eq!(
            resolve("blood pressure 120 80"),
            Intent::RecordBloodPressure {
                reading: Some((120, 80))
            }
        );
        assert_eq!(
            resolve("blood pressure is 120"),
            Intent::RecordBloodPressure { reading: None }
        );
        assert_eq!(
            resolve("record my blood pressure"),
            Intent::RecordBloodPressure { reading: None }
        );
    }

    #[test]
    fn blood_pressure_takes_the_first_two_of_many_numbers() {
        assert_eq!(
            resolve("blood pressure 120 80 measured at 9"),
            Intent::RecordBloodPressure {
                reading: Some((120, 80))
            }
        );
    }

    #[test]
    fn help_and_fallback() {
        assert_eq!(resolve("help"), Intent::Help);
        assert_eq!(resolve("what commands are there"), Intent::Help);
        assert_eq!(resolve("tell me a story"), Intent::Unrecognized);
        assert_eq!(resolve(""), Intent::Unrecognized);
    }

    #[test]
    fn resolution_is_case_and_whitespace_insensitive() {
        assert_eq!(resolve("  I TOOK my pills  "), Intent::MedicationTaken);
    }
}
