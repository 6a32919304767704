//! Water, sleep, vitals, and mood records over the persisted
//! `HealthLog` document.

use chrono::Timelike;
use thiserror::Error;

use crate::assessment::{BloodPressureBand, BloodSugarBand, SleepBand};
use crate::clock::Clock;
use crate::config::{WATER_NUDGE_END_HOUR, WATER_NUDGE_START_HOUR};
use crate::models::{
    BloodPressureEntry, BloodSugarEntry, HealthLog, MoodCategory, MoodEntry, SleepEntry,
};

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("Sleep hours out of range: {0}")]
    SleepHoursOutOfRange(f64),
    #[error("Blood pressure values must be positive")]
    InvalidBloodPressure,
    #[error("Blood sugar value must be positive")]
    InvalidBloodSugar,
}

/// Water progress after a glass was counted. `goal_reached` is true
/// exactly when this glass hit the goal, so the congratulation fires
/// once per day.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterProgress {
    pub count: u32,
    pub goal: u32,
    pub goal_reached: bool,
}

/// The day-to-day health journal. Validation failures leave the log
/// untouched.
pub struct HealthJournal<C: Clock> {
    log: HealthLog,
    clock: C,
}

impl<C: Clock> HealthJournal<C> {
    pub fn new(log: HealthLog, clock: C) -> Self {
        Self { log, clock }
    }

    pub fn log(&self) -> &HealthLog {
        &self.log
    }

    /// Zero the water counter on the first interaction of a new day.
    fn roll_water_day(&mut self) {
        let today = self.clock.today();
        if self.log.water.last_reset != today {
            self.log.water.daily = 0;
            self.log.water.last_reset = today;
        }
    }

    /// Count one glass of water.
    pub fn record_water(&mut self) -> WaterProgress {
        self.roll_water_day();
        self.log.water.daily += 1;
        tracing::debug!(count = self.log.water.daily, "water recorded");
        WaterProgress {
            count: self.log.water.daily,
            goal: self.log.water.goal,
            goal_reached: self.log.water.daily == self.log.water.goal,
        }
    }

    /// Today's count and goal for display.
    pub fn water_today(&mut self) -> (u32, u32) {
        self.roll_water_day();
        (self.log.water.daily, self.log.water.goal)
    }

    /// Whether the hourly nudge should fire: waking hours only, and
    /// only while the goal is still out of reach.
    pub fn should_nudge_water(&mut self) -> bool {
        self.roll_water_day();
        let hour = self.clock.now().hour();
        (WATER_NUDGE_START_HOUR..=WATER_NUDGE_END_HOUR).contains(&hour)
            && self.log.water.daily < self.log.water.goal
    }

    pub fn record_sleep(&mut self, hours: f64) -> Result<SleepBand, RecordError> {
        if !(hours > 0.0 && hours <= 24.0) {
            return Err(RecordError::SleepHoursOutOfRange(hours));
        }
        self.log.sleep.push(SleepEntry {
            date: self.clock.today(),
            hours,
            recorded_at: self.clock.now(),
        });
        tracing::info!(hours, "sleep recorded");
        Ok(SleepBand::classify(hours))
    }

    pub fn record_blood_pressure(
        &mut self,
        systolic: u32,
        diastolic: u32,
    ) -> Result<BloodPressureBand, RecordError> {
        if systolic == 0 || diastolic == 0 {
            return Err(RecordError::InvalidBloodPressure);
        }
        self.log.blood_pressure.push(BloodPressureEntry {
            date: self.clock.today(),
            systolic,
            diastolic,
            recorded_at: self.clock.now(),
        });
        tracing::info!(systolic, diastolic, "blood pressure recorded");
        Ok(BloodPressureBand::classify(systolic, diastolic))
    }

    pub fn record_blood_sugar(&mut self, value: u32) -> Result<BloodSugarBand, RecordError> {
        if value == 0 {
            return Err(RecordError::InvalidBloodSugar);
        }
        self.log.blood_sugar.push(BloodSugarEntry {
            date: self.clock.today(),
            value,
            recorded_at: self.clock.now(),
        });
        tracing::info!(value, "blood sugar recorded");
        Ok(BloodSugarBand::classify(value))
    }

    /// One mood per day: a later save replaces the earlier one.
    pub fn record_mood(&mut self, mood: MoodCategory, note: &str) {
        let today = self.clock.today();
        let entry = MoodEntry {
            date: today,
            mood,
            note: note.to_string(),
            recorded_at: self.clock.now(),
        };
        match self.log.mood.iter_mut().find(|m| m.date == today) {
            Some(existing) => *existing = entry,
            None => self.log.mood.push(entry),
        }
        tracing::debug!("mood recorded");
    }

    pub fn today_mood(&self) -> Option<&MoodEntry> {
        let today = self.clock.today();
        self.log.mood.iter().find(|m| m.date == today)
    }

    pub fn latest_sleep(&self) -> Option<&SleepEntry> {
        self.log.sleep.last()
    }

    pub fn latest_blood_pressure(&self) -> Option<&BloodPressureEntry> {
        self.log.blood_pressure.last()
    }
}
