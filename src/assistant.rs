//! The assistant loop: resolves utterances, executes the resulting
//! intent against the scheduler and record stores, and answers with
//! the line to speak plus the transient notice to show. Periodic hooks
//! (per second, per minute, per hour) live here too; the host owns the
//! actual timers and tears them down with the session.

use rusqlite::Connection;

use crate::clock::Clock;
use crate::config::WATER_REMINDER_TIMES;
use crate::db::{self, DatabaseError};
use crate::feedback::Replies;
use crate::intent::{self, Intent};
use crate::models::{ExerciseSession, HealthLog, Medication};
use crate::records::HealthJournal;
use crate::scheduler::MedicationScheduler;
use crate::sessions::{ExerciseEvent, GuidedExercise, Meditation, MeditationEvent};
use crate::voice::VoiceSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient on-screen notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// What the host should do after an interaction: speak the line, show
/// the notice, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub spoken: Option<String>,
    pub notice: Option<Notice>,
}

impl Response {
    fn speech(text: impl Into<String>) -> Self {
        Self {
            spoken: Some(text.into()),
            notice: None,
        }
    }

    fn speech_with_notice(
        text: impl Into<String>,
        level: NoticeLevel,
        notice: impl Into<String>,
    ) -> Self {
        Self {
            spoken: Some(text.into()),
            notice: Some(Notice {
                level,
                text: notice.into(),
            }),
        }
    }

    fn notice_only(level: NoticeLevel, notice: impl Into<String>) -> Self {
        Self {
            spoken: None,
            notice: Some(Notice {
                level,
                text: notice.into(),
            }),
        }
    }
}

/// The single-threaded application core behind the UI and the voice
/// loop.
pub struct Assistant<C: Clock + Clone> {
    scheduler: MedicationScheduler<C>,
    journal: HealthJournal<C>,
    exercise_log: Vec<ExerciseSession>,
    active_exercise: Option<GuidedExercise>,
    active_meditation: Option<Meditation>,
    settings: VoiceSettings,
    clock: C,
}

impl<C: Clock + Clone> Assistant<C> {
    pub fn new(
        medications: Vec<Medication>,
        health: HealthLog,
        exercise_log: Vec<ExerciseSession>,
        settings: VoiceSettings,
        clock: C,
    ) -> Self {
        Self {
            scheduler: MedicationScheduler::new(medications, clock.clone()),
            journal: HealthJournal::new(health, clock.clone()),
            exercise_log,
            active_exercise: None,
            active_meditation: None,
            settings,
            clock,
        }
    }

    /// Restore the assistant from the local store.
    pub fn load(conn: &Connection, clock: C) -> Result<Self, DatabaseError> {
        Ok(Self::new(
            db::load_medications(conn)?,
            db::load_health_log(conn)?,
            db::load_exercise_log(conn)?,
            db::load_voice_settings(conn)?,
            clock,
        ))
    }

    /// Persist every store. Whole documents, last write wins.
    pub fn save(&self, conn: &Connection) -> Result<(), DatabaseError> {
        db::save_medications(conn, self.scheduler.medications())?;
        db::save_health_log(conn, self.journal.log())?;
        db::save_exercise_log(conn, &self.exercise_log)?;
        db::save_voice_settings(conn, &self.settings)?;
        Ok(())
    }

    pub fn scheduler(&self) -> &MedicationScheduler<C> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut MedicationScheduler<C> {
        &mut self.scheduler
    }

    pub fn journal(&self) -> &HealthJournal<C> {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut HealthJournal<C> {
        &mut self.journal
    }

    pub fn exercise_log(&self) -> &[ExerciseSession] {
        &self.exercise_log
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: VoiceSettings) {
        self.settings = settings;
    }

    /// The line spoken once when a session opens.
    pub fn greeting(&self) -> Response {
        Response::speech(Replies::greeting())
    }

    /// A final transcript arrived from the recognizer.
    pub fn process_utterance(&mut self, utterance: &str) -> Response {
        self.dispatch(intent::resolve(utterance))
    }

    /// Execute one resolved intent.
    pub fn dispatch(&mut self, intent: Intent) -> Response {
        match intent {
            Intent::MedicationTaken => self.confirm_target_dose(),
            Intent::RecordWater => {
                let progress = self.journal.record_water();
                let spoken = if progress.goal_reached {
                    Replies::water_goal_reached().to_string()
                } else {
                    Replies::water_recorded(progress.count, progress.goal)
                };
                Response::speech_with_notice(spoken, NoticeLevel::Success, "Water recorded")
            }
            Intent::RecordSleep { hours: None } => Response::speech_with_notice(
                Replies::sleep_hours_prompt(),
                NoticeLevel::Info,
                "Tell me the number of hours",
            ),
            Intent::RecordSleep { hours: Some(hours) } => {
                match self.journal.record_sleep(f64::from(hours)) {
                    Ok(band) => Response::speech_with_notice(
                        Replies::sleep_recorded(f64::from(hours), band.message()),
                        NoticeLevel::Success,
                        format!("{hours} hours of sleep recorded"),
                    ),
                    Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
                }
            }
            Intent::RecordMood { mood, note } => {
                self.journal.record_mood(mood, &note);
                Response::speech_with_notice(
                    Replies::mood_recorded(),
                    NoticeLevel::Success,
                    "Mood recorded",
                )
            }
            Intent::StartExercise { category } => {
                let session = GuidedExercise::start(category);
                let spoken = match session.current_step() {
                    Some(step) => Replies::exercise_started(step.name, step.guidance),
                    None => Replies::exercise_complete().to_string(),
                };
                self.active_exercise = Some(session);
                Response::speech(spoken)
            }
            Intent::StartMeditation { minutes } => {
                self.active_meditation = Some(Meditation::new(minutes));
                Response::speech(Replies::meditation_started(minutes))
            }
            Intent::RecordBloodPressure { reading: None } => Response::speech_with_notice(
                Replies::blood_pressure_prompt(),
                NoticeLevel::Info,
                "Two numbers are needed",
            ),
            Intent::RecordBloodPressure {
                reading: Some((systolic, diastolic)),
            } => match self.journal.record_blood_pressure(systolic, diastolic) {
                Ok(band) => Response::speech_with_notice(
                    Replies::blood_pressure_recorded(systolic, diastolic, band.message()),
                    NoticeLevel::Success,
                    format!("Blood pressure {systolic}/{diastolic} recorded"),
                ),
                Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
            },
            Intent::Help => Response::speech(Replies::help()),
            Intent::Unrecognized => Response::speech(Replies::unrecognized()),
        }
    }

    /// The "I took it" path, shared by voice and the quick button.
    fn confirm_target_dose(&mut self) -> Response {
        match self.scheduler.resolve_target_dose() {
            Some(dose) => {
                if let Err(e) = self.scheduler.mark_taken(dose.medication_id, &dose.time) {
                    return Response::notice_only(NoticeLevel::Error, e.to_string());
                }
                Response::speech_with_notice(
                    Replies::dose_confirmed(&dose.name, &dose.time),
                    NoticeLevel::Success,
                    format!("{} ({}) recorded", dose.name, dose.time),
                )
            }
            None => Response::speech_with_notice(
                Replies::no_pending_dose(),
                NoticeLevel::Info,
                "No dose is waiting",
            ),
        }
    }

    /// Blood sugar has no voice rule; the record form calls this.
    pub fn record_blood_sugar(&mut self, value: u32) -> Response {
        match self.journal.record_blood_sugar(value) {
            Ok(band) => Response::speech_with_notice(
                Replies::blood_sugar_recorded(value, band.message()),
                NoticeLevel::Success,
                format!("Blood sugar {value} recorded"),
            ),
            Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
        }
    }

    pub fn add_medication(
        &mut self,
        name: &str,
        dosage: &str,
        frequency: u32,
        times: Vec<String>,
    ) -> Response {
        match self.scheduler.add(name, dosage, frequency, times) {
            Ok(_) => Response::speech_with_notice(
                Replies::medication_added(name.trim()),
                NoticeLevel::Success,
                "Medication added",
            ),
            Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
        }
    }

    pub fn edit_medication(
        &mut self,
        id: uuid::Uuid,
        name: &str,
        dosage: &str,
        frequency: u32,
        times: Vec<String>,
    ) -> Response {
        match self.scheduler.edit(id, name, dosage, frequency, times) {
            Ok(()) => Response::speech_with_notice(
                Replies::medication_updated(name.trim()),
                NoticeLevel::Success,
                "Medication updated",
            ),
            Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
        }
    }

    pub fn remove_medication(&mut self, id: uuid::Uuid) -> Response {
        match self.scheduler.remove(id) {
            Ok(()) => Response::notice_only(NoticeLevel::Info, Replies::medication_removed()),
            Err(e) => Response::notice_only(NoticeLevel::Error, e.to_string()),
        }
    }

    /// Per-minute hook: exact-minute dose reminders plus the fixed
    /// water schedule. A minute nobody polls is a reminder nobody gets.
    pub fn minute_tick(&mut self) -> Vec<Response> {
        let mut responses = Vec::new();
        for dose in self.scheduler.check_reminders() {
            tracing::info!(name = %dose.name, time = %dose.time, "dose reminder due");
            responses.push(Response::speech_with_notice(
                Replies::dose_reminder(&dose.name),
                NoticeLevel::Warning,
                format!("Time for {}", dose.name),
            ));
        }
        let now = self.clock.hhmm();
        if WATER_REMINDER_TIMES.contains(&now.as_str()) {
            responses.push(Response::speech_with_notice(
                Replies::water_reminder(),
                NoticeLevel::Info,
                "Time to drink water",
            ));
        }
        responses
    }

    /// Hourly hook: nudge for water during waking hours while the goal
    /// is out of reach.
    pub fn hour_tick(&mut self) -> Option<Response> {
        if self.journal.should_nudge_water() {
            Some(Response::speech_with_notice(
                Replies::water_reminder(),
                NoticeLevel::Info,
                "Time to drink water",
            ))
        } else {
            None
        }
    }

    /// Per-second hook driving whichever guided session is active.
    /// Returns the line to speak, if this second produced one.
    pub fn second_tick(&mut self) -> Option<Response> {
        if let Some(meditation) = self.active_meditation.as_mut() {
            return match meditation.tick() {
                MeditationEvent::Finished => {
                    self.active_meditation = None;
                    Some(Response::speech_with_notice(
                        Replies::meditation_complete(),
                        NoticeLevel::Success,
                        "Meditation complete",
                    ))
                }
                MeditationEvent::Tick { .. } => None,
            };
        }

        let event = self.active_exercise.as_mut()?.tick();
        self.on_exercise_event(event)
    }

    /// The "next exercise" button.
    pub fn skip_exercise_step(&mut self) -> Option<Response> {
        let event = self.active_exercise.as_mut()?.skip();
        self.on_exercise_event(event)
    }

    /// Stop early. The session still counts: the routine summary is
    /// recorded just like a finished one.
    pub fn stop_exercise(&mut self) -> Option<Response> {
        self.active_exercise.as_ref()?;
        Some(self.finish_exercise())
    }

    pub fn stop_meditation(&mut self) -> Option<Response> {
        self.active_meditation.take().map(|_| {
            Response::speech_with_notice(
                Replies::meditation_complete(),
                NoticeLevel::Success,
                "Meditation complete",
            )
        })
    }

    pub fn exercise_active(&self) -> bool {
        self.active_exercise.is_some()
    }

    pub fn meditation_active(&self) -> bool {
        self.active_meditation.is_some()
    }

    /// Minutes exercised today, for the dashboard summary.
    pub fn exercise_today_minutes(&self) -> u32 {
        let today = self.clock.today();
        self.exercise_log
            .iter()
            .filter(|s| s.date == today)
            .map(|s| s.duration_min)
            .sum()
    }

    fn on_exercise_event(&mut self, event: ExerciseEvent) -> Option<Response> {
        match event {
            ExerciseEvent::Finished => Some(self.finish_exercise()),
            ExerciseEvent::StepFinished { next: Some(_), .. } => {
                let (name, guidance) = self
                    .active_exercise
                    .as_ref()
                    .and_then(|session| session.current_step())
                    .map(|step| (step.name, step.guidance))?;
                Some(Response::speech(Replies::exercise_step(name, guidance)))
            }
            ExerciseEvent::StepFinished { next: None, .. } => Some(self.finish_exercise()),
            ExerciseEvent::Tick { rep: Some(rep), .. } => {
                Some(Response::speech(rep.to_string()))
            }
            ExerciseEvent::Tick { rep: None, .. } => None,
        }
    }

    fn finish_exercise(&mut self) -> Response {
        if let Some(session) = self.active_exercise.take() {
            let summary = session.summary(&self.clock);
            tracing::info!(
                minutes = summary.duration_min,
                category = summary.category.as_str(),
                "exercise session recorded"
            );
            self.exercise_log.push(summary);
        }
        Response::speech_with_notice(
            Replies::exercise_complete(),
            NoticeLevel::Success,
            "Exercise recorded",
        )
    }
}
