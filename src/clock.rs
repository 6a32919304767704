use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Source of "now" for every date- and time-of-day decision.
///
/// The scheduler and record stores take a clock instead of calling
/// `Local::now()` directly, so dose resolution and reminder logic can be
/// pinned to an exact instant in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Today's calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Current time of day as zero-padded `HH:MM`.
    fn hhmm(&self) -> String {
        self.now().format("%H:%M").to_string()
    }

    /// Minutes elapsed since local midnight.
    fn minutes_of_day(&self) -> u32 {
        let time = self.now().time();
        time.hour() * 60 + time.minute()
    }
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a settable instant, for deterministic tests.
///
/// Clones share the same instant, so a test can keep a handle and move
/// time forward under a scheduler that owns another clone.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    /// Pin the clock to `YYYY-MM-DD HH:MM`.
    pub fn at(datetime: &str) -> Self {
        Self {
            instant: Rc::new(Cell::new(Self::parse(datetime))),
        }
    }

    /// Move the shared instant.
    pub fn set(&self, datetime: &str) {
        self.instant.set(Self::parse(datetime));
    }

    fn parse(datetime: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M")
            .expect("datetime must be formatted as YYYY-MM-DD HH:MM")
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let clock = FixedClock::at("2026-03-14 09:05");
        assert_eq!(clock.today().to_string(), "2026-03-14");
        assert_eq!(clock.hhmm(), "09:05");
        assert_eq!(clock.minutes_of_day(), 9 * 60 + 5);
    }

    #[test]
    fn fixed_clock_clones_share_the_instant() {
        let clock = FixedClock::at("2026-03-14 09:05");
        let handle = clock.clone();
        handle.set("2026-03-15 00:10");
        assert_eq!(clock.hhmm(), "00:10");
        assert_eq!(clock.today().to_string(), "2026-03-15");
    }

    #[test]
    fn hhmm_is_zero_padded() {
        let clock = FixedClock::at("2026-03-14 07:03");
        assert_eq!(clock.hhmm(), "07:03");
    }
}
