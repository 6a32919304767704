//! Day-level medication scheduling: dose expansion, target-dose
//! resolution for ambiguous "I took it" actions, and minute-granularity
//! reminders.

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::{default_dose_times, NEARBY_DOSE_WINDOW_MIN};
use crate::models::{DoseOccurrence, Medication};

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Medication name is required")]
    NameRequired,
    #[error("At least one dose time is required")]
    TimesRequired,
    #[error("Invalid dose time: {0}")]
    InvalidTime(String),
    #[error("Medication not found: {0}")]
    NotFound(Uuid),
}

/// Owns the medication list and answers every "what should be taken,
/// and when" question against the injected clock.
pub struct MedicationScheduler<C: Clock> {
    medications: Vec<Medication>,
    clock: C,
}

impl<C: Clock> MedicationScheduler<C> {
    pub fn new(medications: Vec<Medication>, clock: C) -> Self {
        Self { medications, clock }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// Add a medication. With no explicit times, the frequency template
    /// fills them in; duplicates are dropped, input order kept.
    pub fn add(
        &mut self,
        name: &str,
        dosage: &str,
        frequency: u32,
        times: Vec<String>,
    ) -> Result<Uuid, ScheduleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::NameRequired);
        }
        let times = validate_times(times, frequency)?;

        let medication = Medication {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dosage: dosage.trim().to_string(),
            frequency,
            times,
            taken: BTreeMap::new(),
        };
        let id = medication.id;
        tracing::info!(medication_id = %id, name = %medication.name, "medication added");
        self.medications.push(medication);
        Ok(id)
    }

    /// Replace name, dosage, frequency, and times. The intake history
    /// is preserved.
    pub fn edit(
        &mut self,
        id: Uuid,
        name: &str,
        dosage: &str,
        frequency: u32,
        times: Vec<String>,
    ) -> Result<(), ScheduleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::NameRequired);
        }
        let times = validate_times(times, frequency)?;

        let medication = self
            .medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        medication.name = name.to_string();
        medication.dosage = dosage.trim().to_string();
        medication.frequency = frequency;
        medication.times = times;
        tracing::info!(medication_id = %id, "medication updated");
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), ScheduleError> {
        let before = self.medications.len();
        self.medications.retain(|m| m.id != id);
        if self.medications.len() == before {
            return Err(ScheduleError::NotFound(id));
        }
        tracing::info!(medication_id = %id, "medication removed");
        Ok(())
    }

    /// Every (medication, scheduled time) pair for today, tagged with
    /// its taken status and sorted ascending by time of day. Derived
    /// fresh on every call. Lexical compare is correct for zero-padded
    /// `HH:MM`. A medication with no parseable times contributes
    /// nothing.
    pub fn todays_doses(&self) -> Vec<DoseOccurrence> {
        let today = self.clock.today();
        let mut doses: Vec<DoseOccurrence> = self
            .medications
            .iter()
            .flat_map(|med| {
                med.times
                    .iter()
                    .filter(|time| minutes_of(time).is_some())
                    .map(move |time| DoseOccurrence {
                        medication_id: med.id,
                        name: med.name.clone(),
                        time: time.clone(),
                        taken: med.taken_at(today, time),
                    })
            })
            .collect();
        doses.sort_by(|a, b| a.time.cmp(&b.time));
        doses
    }

    /// The next dose strictly after now that hasn't been taken, for
    /// the "next dose at HH:MM" summary line.
    pub fn next_dose(&self) -> Option<DoseOccurrence> {
        let now = self.clock.hhmm();
        self.todays_doses()
            .into_iter()
            .find(|d| !d.taken && d.time.as_str() > now.as_str())
    }

    /// The dose the user most likely means by an unqualified "I took
    /// it": the earliest pending dose still ahead of (or exactly at)
    /// now, and only when nothing is upcoming, the most recently
    /// missed one. Confirming what's coming up beats reaching back.
    pub fn resolve_target_dose(&self) -> Option<DoseOccurrence> {
        let now = self.clock.hhmm();
        let doses = self.todays_doses();

        if let Some(upcoming) = doses
            .iter()
            .find(|d| !d.taken && d.time.as_str() >= now.as_str())
        {
            return Some(upcoming.clone());
        }
        doses
            .iter()
            .rev()
            .find(|d| !d.taken && d.time.as_str() < now.as_str())
            .cloned()
    }

    /// Record a dose as taken today. Set semantics: confirming the
    /// same time twice leaves a single entry.
    pub fn mark_taken(&mut self, id: Uuid, time: &str) -> Result<(), ScheduleError> {
        let today = self.clock.today();
        let medication = self
            .medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ScheduleError::NotFound(id))?;

        let taken = medication.taken.entry(today).or_default();
        if taken.iter().any(|t| t == time) {
            tracing::debug!(medication_id = %id, time, "dose already recorded today");
            return Ok(());
        }
        taken.push(time.to_string());
        tracing::info!(medication_id = %id, time, "dose recorded");
        Ok(())
    }

    /// Whether any pending dose lies within the prompt window of now.
    /// Measured as absolute minutes-of-day difference; the window does
    /// not wrap across midnight, so 23:50 and 00:10 are not close.
    pub fn has_nearby_pending_dose(&self) -> bool {
        let now = self.clock.minutes_of_day();
        self.todays_doses().iter().any(|d| {
            !d.taken
                && minutes_of(&d.time)
                    .is_some_and(|m| now.abs_diff(m) <= NEARBY_DOSE_WINDOW_MIN)
        })
    }

    /// Pending doses scheduled for exactly the current minute. Meant
    /// to be polled once per minute; a skipped minute is a skipped
    /// reminder, there is no catch-up.
    pub fn check_reminders(&self) -> Vec<DoseOccurrence> {
        let now = self.clock.hhmm();
        self.todays_doses()
            .into_iter()
            .filter(|d| !d.taken && d.time == now)
            .collect()
    }

    /// Progress for the dashboard ring: (taken, total) for today.
    pub fn todays_progress(&self) -> (usize, usize) {
        let doses = self.todays_doses();
        let taken = doses.iter().filter(|d| d.taken).count();
        (taken, doses.len())
    }
}

/// Minutes since midnight for a zero-padded or unpadded `H:MM` string.
fn minutes_of(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn validate_times(times: Vec<String>, frequency: u32) -> Result<Vec<String>, ScheduleError> {
    let times = if times.is_empty() {
        default_dose_times(frequency)
    } else {
        times
    };

    let mut unique: Vec<String> = Vec::with_capacity(times.len());
    for time in times {
        if minutes_of(&time).is_none() {
            return Err(ScheduleError::InvalidTime(time));
        }
        if !unique.contains(&time) {
            unique.push(time);
        }
    }
    if unique.is_empty() {
        return Err(ScheduleError::TimesRequired);
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn med(name: &str, times: &[&str]) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: "1 tablet".into(),
            frequency: times.len() as u32,
            times: times.iter().map(|t| t.to_string()).collect(),
            taken: BTreeMap::new(),
        }
    }

    /// One medication, three doses, with the 08:00 dose already taken.
    fn scheduler_with_morning_taken(clock: FixedClock) -> MedicationScheduler<FixedClock> {
        let mut medication = med("Metformin", &["08:00", "14:00", "20:00"]);
        medication
            .taken
            .insert(clock.today(), vec!["08:00".into()]);
        MedicationScheduler::new(vec![medication], clock)
    }

    #[test]
    fn todays_doses_flatten_and_sort_by_time() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let scheduler = MedicationScheduler::new(
            vec![med("Evening first", &["21:00", "09:00"]), med("Noon", &["13:00"])],
            clock,
        );
        let doses = scheduler.todays_doses();
        let times: Vec<&str> = doses.iter().map(|d| d.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "13:00", "21:00"]);
    }

    #[test]
    fn medication_without_times_contributes_nothing() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let scheduler = MedicationScheduler::new(vec![med("No schedule", &[])], clock);
        assert!(scheduler.todays_doses().is_empty());
        assert!(scheduler.resolve_target_dose().is_none());
    }

    #[test]
    fn malformed_persisted_time_is_skipped() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let scheduler =
            MedicationScheduler::new(vec![med("Mixed", &["garbage", "09:00", "25:99"])], clock);
        let doses = scheduler.todays_doses();
        assert_eq!(doses.len(), 1);
        assert_eq!(doses[0].time, "09:00");
    }

    #[test]
    fn target_dose_prefers_the_earliest_upcoming_pending_dose() {
        // Upcoming beats overdue: at 10:00 the answer is the 14:00
        // dose, even though 08:00 was this morning.
        let clock = FixedClock::at("2026-03-14 10:00");
        let scheduler = scheduler_with_morning_taken(clock);
        let target = scheduler.resolve_target_dose().unwrap();
        assert_eq!(target.time, "14:00");
    }

    #[test]
    fn target_dose_falls_back_to_the_most_recently_missed() {
        // Nothing upcoming at 21:00, so reach back to the latest
        // missed dose, not the earliest.
        let clock = FixedClock::at("2026-03-14 21:00");
        let scheduler = scheduler_with_morning_taken(clock);
        let target = scheduler.resolve_target_dose().unwrap();
        assert_eq!(target.time, "20:00");
    }

    #[test]
    fn target_dose_is_none_when_everything_is_taken() {
        let clock = FixedClock::at("2026-03-14 21:00");
        let mut medication = med("Metformin", &["08:00", "14:00"]);
        medication
            .taken
            .insert(clock.today(), vec!["08:00".into(), "14:00".into()]);
        let scheduler = MedicationScheduler::new(vec![medication], clock);
        assert!(scheduler.resolve_target_dose().is_none());
    }

    #[test]
    fn target_dose_at_exactly_now_counts_as_upcoming() {
        let clock = FixedClock::at("2026-03-14 14:00");
        let scheduler = scheduler_with_morning_taken(clock);
        assert_eq!(scheduler.resolve_target_dose().unwrap().time, "14:00");
    }

    #[test]
    fn next_dose_is_strictly_after_now() {
        let clock = FixedClock::at("2026-03-14 14:00");
        let scheduler = scheduler_with_morning_taken(clock);
        // 14:00 is due now, so "next" is the one after it.
        assert_eq!(scheduler.next_dose().unwrap().time, "20:00");
    }

    #[test]
    fn mark_taken_twice_keeps_a_single_entry() {
        let clock = FixedClock::at("2026-03-14 08:05");
        let today = clock.today();
        let medication = med("Aspirin", &["08:00"]);
        let id = medication.id;
        let mut scheduler = MedicationScheduler::new(vec![medication], clock);

        scheduler.mark_taken(id, "08:00").unwrap();
        scheduler.mark_taken(id, "08:00").unwrap();

        assert_eq!(scheduler.medications()[0].taken[&today], vec!["08:00"]);
    }

    #[test]
    fn mark_taken_unknown_medication_errors() {
        let clock = FixedClock::at("2026-03-14 08:05");
        let mut scheduler = MedicationScheduler::new(Vec::new(), clock);
        let missing = Uuid::new_v4();
        assert_eq!(
            scheduler.mark_taken(missing, "08:00"),
            Err(ScheduleError::NotFound(missing))
        );
    }

    #[test]
    fn nearby_window_is_thirty_minutes_inclusive() {
        let medication = med("Aspirin", &["09:15"]);

        let clock = FixedClock::at("2026-03-14 09:40");
        let scheduler = MedicationScheduler::new(vec![medication.clone()], clock);
        assert!(scheduler.has_nearby_pending_dose(), "25 minutes apart");

        let clock = FixedClock::at("2026-03-14 08:44");
        let scheduler = MedicationScheduler::new(vec![medication.clone()], clock);
        assert!(!scheduler.has_nearby_pending_dose(), "31 minutes apart");

        let clock = FixedClock::at("2026-03-14 09:45");
        let scheduler = MedicationScheduler::new(vec![medication], clock);
        assert!(scheduler.has_nearby_pending_dose(), "exactly 30 minutes");
    }

    #[test]
    fn nearby_window_does_not_wrap_midnight() {
        let clock = FixedClock::at("2026-03-14 00:10");
        let scheduler = MedicationScheduler::new(vec![med("Night dose", &["23:50"])], clock);
        // 23:50 vs 00:10 is 1420 minutes apart under the
        // minutes-of-day metric, not 20.
        assert!(!scheduler.has_nearby_pending_dose());
    }

    #[test]
    fn taken_doses_are_not_nearby() {
        let clock = FixedClock::at("2026-03-14 09:20");
        let mut medication = med("Aspirin", &["09:15"]);
        medication.taken.insert(clock.today(), vec!["09:15".into()]);
        let scheduler = MedicationScheduler::new(vec![medication], clock);
        assert!(!scheduler.has_nearby_pending_dose());
    }

    #[test]
    fn reminders_fire_only_on_the_exact_minute() {
        let clock = FixedClock::at("2026-03-14 14:00");
        let scheduler = scheduler_with_morning_taken(clock.clone());
        let due = scheduler.check_reminders();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].time, "14:00");

        clock.set("2026-03-14 14:01");
        assert!(scheduler.check_reminders().is_empty());
    }

    #[test]
    fn reminders_skip_taken_doses() {
        let clock = FixedClock::at("2026-03-14 08:00");
        let scheduler = scheduler_with_morning_taken(clock);
        assert!(scheduler.check_reminders().is_empty());
    }

    #[test]
    fn add_applies_frequency_template_when_no_times_given() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let mut scheduler = MedicationScheduler::new(Vec::new(), clock);
        scheduler.add("Metformin", "500mg", 3, Vec::new()).unwrap();
        assert_eq!(
            scheduler.medications()[0].times,
            vec!["08:00", "13:00", "19:00"]
        );
    }

    #[test]
    fn add_rejects_blank_name_and_bad_times() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let mut scheduler = MedicationScheduler::new(Vec::new(), clock);
        assert_eq!(
            scheduler.add("  ", "500mg", 1, Vec::new()),
            Err(ScheduleError::NameRequired)
        );
        assert_eq!(
            scheduler.add("Metformin", "500mg", 1, vec!["nine".into()]),
            Err(ScheduleError::InvalidTime("nine".into()))
        );
        // No template above three doses per day.
        assert_eq!(
            scheduler.add("Metformin", "500mg", 4, Vec::new()),
            Err(ScheduleError::TimesRequired)
        );
        assert!(scheduler.medications().is_empty());
    }

    #[test]
    fn add_deduplicates_times_preserving_order() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let mut scheduler = MedicationScheduler::new(Vec::new(), clock);
        scheduler
            .add(
                "Metformin",
                "500mg",
                2,
                vec!["21:00".into(), "09:00".into(), "21:00".into()],
            )
            .unwrap();
        assert_eq!(scheduler.medications()[0].times, vec!["21:00", "09:00"]);
    }

    #[test]
    fn edit_replaces_schedule_but_keeps_history() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let today = clock.today();
        let mut medication = med("Metformin", &["08:00"]);
        medication.taken.insert(today, vec!["08:00".into()]);
        let id = medication.id;
        let mut scheduler = MedicationScheduler::new(vec![medication], clock);

        scheduler
            .edit(id, "Metformin XR", "750mg", 1, vec!["09:30".into()])
            .unwrap();

        let edited = &scheduler.medications()[0];
        assert_eq!(edited.name, "Metformin XR");
        assert_eq!(edited.times, vec!["09:30"]);
        assert_eq!(edited.taken[&today], vec!["08:00"]);
    }

    #[test]
    fn remove_deletes_the_medication() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let medication = med("Metformin", &["08:00"]);
        let id = medication.id;
        let mut scheduler = MedicationScheduler::new(vec![medication], clock);
        scheduler.remove(id).unwrap();
        assert!(scheduler.medications().is_empty());
        assert_eq!(scheduler.remove(id), Err(ScheduleError::NotFound(id)));
    }

    #[test]
    fn progress_counts_taken_over_total() {
        let clock = FixedClock::at("2026-03-14 10:00");
        let scheduler = scheduler_with_morning_taken(clock);
        assert_eq!(scheduler.todays_progress(), (1, 3));
    }
}
