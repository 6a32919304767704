use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthVoice";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Glasses of water per day before the goal congratulation fires.
pub const DEFAULT_WATER_GOAL: u32 = 8;

/// Minutes either side of a scheduled dose within which the quick
/// "mark taken" prompt is offered.
pub const NEARBY_DOSE_WINDOW_MIN: u32 = 30;

/// Length of a voice-started meditation, in minutes.
pub const DEFAULT_MEDITATION_MINUTES: u32 = 5;

/// Fixed water-reminder schedule, matched at minute granularity by the
/// per-minute hook.
pub const WATER_REMINDER_TIMES: &[&str] = &[
    "08:00", "10:00", "12:00", "14:00", "16:00", "18:00", "20:00", "22:00",
];

/// Waking-hours window (inclusive) for the hourly water nudge.
pub const WATER_NUDGE_START_HOUR: u32 = 8;
pub const WATER_NUDGE_END_HOUR: u32 = 22;

/// Default dose times applied when a medication is added without
/// explicit times. Frequencies above three get no template.
pub fn default_dose_times(frequency: u32) -> Vec<String> {
    let times: &[&str] = match frequency {
        1 => &["09:00"],
        2 => &["09:00", "21:00"],
        3 => &["08:00", "13:00", "19:00"],
        _ => return Vec::new(),
    };
    times.iter().map(|t| t.to_string()).collect()
}

pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/HealthVoice/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("HealthVoice")
}

/// Path of the local store database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("healthvoice.db")
}
