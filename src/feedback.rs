//! Spoken reply builder. One voice for the whole assistant: warm,
//! short sentences, no jargon.

pub struct Replies;

impl Replies {
    pub fn greeting() -> &'static str {
        "Hello! This is HealthVoice. Shall we start a healthy day together?"
    }

    pub fn dose_confirmed(name: &str, time: &str) -> String {
        format!("I recorded {name} at {time}. Well done!")
    }

    pub fn no_pending_dose() -> &'static str {
        "There is nothing left to take right now."
    }

    pub fn dose_reminder(name: &str) -> String {
        format!("It is time to take {name}.")
    }

    pub fn medication_added(name: &str) -> String {
        format!("{name} was added. Don't forget your dose times.")
    }

    pub fn medication_updated(name: &str) -> String {
        format!("{name} was updated.")
    }

    pub fn medication_removed() -> &'static str {
        "The medication was removed."
    }

    pub fn water_recorded(count: u32, goal: u32) -> String {
        format!("I counted a glass of water. That makes {count} of {goal} today.")
    }

    pub fn water_goal_reached() -> &'static str {
        "You reached today's water goal. Excellent!"
    }

    pub fn water_reminder() -> &'static str {
        "Time to drink some water! A glass now keeps you nicely hydrated."
    }

    pub fn sleep_recorded(hours: f64, guidance: &str) -> String {
        format!("I recorded {hours} hours of sleep. {guidance}")
    }

    pub fn sleep_hours_prompt() -> &'static str {
        "How many hours did you sleep? For example, say: I slept 7 hours."
    }

    pub fn mood_recorded() -> &'static str {
        "I noted how you feel. Have a good day."
    }

    pub fn exercise_started(first_step: &str, guidance: &str) -> String {
        format!("Let's exercise together. First up: {first_step}. {guidance}")
    }

    pub fn exercise_step(step: &str, guidance: &str) -> String {
        format!("Next: {step}. {guidance}")
    }

    pub fn exercise_complete() -> &'static str {
        "Workout complete, great job! Moving a little every day is the secret."
    }

    pub fn meditation_started(minutes: u32) -> String {
        format!(
            "Starting a {minutes} minute meditation. Sit comfortably and \
             focus on your breath."
        )
    }

    pub fn meditation_complete() -> &'static str {
        "The meditation is over. I hope your mind feels a little lighter."
    }

    pub fn blood_pressure_recorded(systolic: u32, diastolic: u32, guidance: &str) -> String {
        format!("I recorded blood pressure {systolic} over {diastolic}. {guidance}")
    }

    pub fn blood_pressure_prompt() -> &'static str {
        "Please tell me both numbers. For example: blood pressure 120 over 80."
    }

    pub fn blood_sugar_recorded(value: u32, guidance: &str) -> String {
        format!("I recorded blood sugar {value}. {guidance}")
    }

    pub fn help() -> &'static str {
        "You can say: I took my medicine. I drank water. I slept 7 hours. \
         I feel good. Start exercise. Start meditation. Blood pressure 120 80."
    }

    pub fn unrecognized() -> &'static str {
        "Sorry, I did not catch that. Say help to hear what I can do."
    }
}
