//! Guided exercise and meditation sessions, advanced by an external
//! once-per-second tick. No timers live in here; the host drives the
//! session and speaks whatever the events tell it to.

use crate::clock::Clock;
use crate::models::{ExerciseCategory, ExerciseSession};

/// One step of a guided routine.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStep {
    pub name: &'static str,
    pub guidance: &'static str,
    pub duration_secs: u32,
    /// Rep-based steps count out loud, one rep per second.
    pub count_reps: bool,
}

const fn step(
    name: &'static str,
    guidance: &'static str,
    duration_secs: u32,
    count_reps: bool,
) -> ExerciseStep {
    ExerciseStep {
        name,
        guidance,
        duration_secs,
        count_reps,
    }
}

/// Built-in routine per category, three steps each.
pub fn routine_for(category: &ExerciseCategory) -> Vec<ExerciseStep> {
    match category {
        ExerciseCategory::Stretch => vec![
            step("Neck stretch", "Roll your head slowly from side to side", 30, false),
            step("Shoulder stretch", "Raise and lower your shoulders", 30, false),
            step("Back stretch", "Twist your waist gently left and right", 30, false),
        ],
        ExerciseCategory::Cardio => vec![
            step("March in place", "Walk slowly on the spot", 60, false),
            step("Jumping jacks", "Jump lightly and spread your arms", 30, false),
            step("Knee raises", "Lift your knees up to chest height", 30, false),
        ],
        ExerciseCategory::Strength => vec![
            step(
                "Squats",
                "Feet shoulder-width apart, sit back and stand up",
                30,
                true,
            ),
            step("Wall push-ups", "Hands on the wall, bend and push", 30, true),
            step(
                "Plank",
                "Hold your body straight on forearms and toes",
                30,
                false,
            ),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseEvent {
    /// One second of the current step passed. `rep` is set on
    /// counting steps so the host can speak the number.
    Tick {
        step: &'static str,
        remaining_secs: u32,
        rep: Option<u32>,
    },
    /// The current step ended; `next` names the step that begins now.
    StepFinished {
        finished: &'static str,
        next: Option<&'static str>,
    },
    Finished,
}

/// A running guided exercise session.
pub struct GuidedExercise {
    category: ExerciseCategory,
    steps: Vec<ExerciseStep>,
    index: usize,
    remaining_secs: u32,
    rep: u32,
}

impl GuidedExercise {
    pub fn start(category: ExerciseCategory) -> Self {
        let steps = routine_for(&category);
        let remaining_secs = steps.first().map(|s| s.duration_secs).unwrap_or(0);
        Self {
            category,
            steps,
            index: 0,
            remaining_secs,
            rep: 0,
        }
    }

    pub fn category(&self) -> &ExerciseCategory {
        &self.category
    }

    pub fn current_step(&self) -> Option<&ExerciseStep> {
        self.steps.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Advance one second.
    pub fn tick(&mut self) -> ExerciseEvent {
        let Some(current) = self.steps.get(self.index) else {
            return ExerciseEvent::Finished;
        };

        if self.remaining_secs == 0 {
            return self.advance();
        }

        self.remaining_secs -= 1;
        let rep = if current.count_reps {
            self.rep += 1;
            Some(self.rep)
        } else {
            None
        };
        ExerciseEvent::Tick {
            step: current.name,
            remaining_secs: self.remaining_secs,
            rep,
        }
    }

    /// Jump to the next step (the "next" button).
    pub fn skip(&mut self) -> ExerciseEvent {
        if self.is_finished() {
            return ExerciseEvent::Finished;
        }
        self.advance()
    }

    fn advance(&mut self) -> ExerciseEvent {
        let finished = self.steps[self.index].name;
        self.index += 1;
        self.rep = 0;
        match self.steps.get(self.index) {
            Some(next) => {
                self.remaining_secs = next.duration_secs;
                ExerciseEvent::StepFinished {
                    finished,
                    next: Some(next.name),
                }
            }
            None => ExerciseEvent::Finished,
        }
    }

    /// Whole-routine length in minutes, rounded to the nearest minute.
    pub fn total_minutes(&self) -> u32 {
        let total_secs: u32 = self.steps.iter().map(|s| s.duration_secs).sum();
        (f64::from(total_secs) / 60.0).round() as u32
    }

    /// Summary record appended to the exercise log on completion.
    pub fn summary<C: Clock>(&self, clock: &C) -> ExerciseSession {
        ExerciseSession {
            date: clock.today(),
            duration_min: self.total_minutes(),
            category: self.category.clone(),
            recorded_at: clock.now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Exhale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeditationEvent {
    Tick {
        remaining_secs: u32,
        phase: BreathPhase,
    },
    Finished,
}

/// A running breathing-guided meditation.
pub struct Meditation {
    remaining_secs: u32,
}

impl Meditation {
    pub fn new(minutes: u32) -> Self {
        Self {
            remaining_secs: minutes * 60,
        }
    }

    /// Eight-second breathing cycle: first half in, second half out.
    pub fn phase(&self) -> BreathPhase {
        if self.remaining_secs % 8 <= 4 {
            BreathPhase::Inhale
        } else {
            BreathPhase::Exhale
        }
    }

    /// Remaining time as `MM:SS` for the session display.
    pub fn remaining_display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    pub fn tick(&mut self) -> MeditationEvent {
        if self.remaining_secs == 0 {
            return MeditationEvent::Finished;
        }
        self.remaining_secs -= 1;
        MeditationEvent::Tick {
            remaining_secs: self.remaining_secs,
            phase: self.phase(),
        }
    }
}
