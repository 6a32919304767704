//! Range classification for recorded sleep and vitals. Each band maps
//! a raw value to the guidance the assistant speaks back after the
//! entry is saved.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepBand {
    SeverelyShort,
    VeryShort,
    Short,
    SlightlyShort,
    Ideal,
    Long,
    Excessive,
}

impl SleepBand {
    pub fn classify(hours: f64) -> Self {
        if hours < 4.0 {
            Self::SeverelyShort
        } else if hours < 5.0 {
            Self::VeryShort
        } else if hours < 6.0 {
            Self::Short
        } else if hours < 7.0 {
            Self::SlightlyShort
        } else if hours <= 8.5 {
            Self::Ideal
        } else if hours <= 10.0 {
            Self::Long
        } else {
            Self::Excessive
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::SeverelyShort => {
                "That is seriously little sleep and hard on your health. \
                 Please make tonight an early night."
            }
            Self::VeryShort => {
                "You are running a big sleep deficit and your immune system \
                 feels it. Please get some proper rest."
            }
            Self::Short => {
                "That is less sleep than you need. Today may feel tiring, \
                 so aim for an earlier bedtime tonight."
            }
            Self::SlightlyShort => {
                "A little more would be better. Seven to eight hours is the \
                 sweet spot."
            }
            Self::Ideal => "A perfect night's sleep. What a great start to the day!",
            Self::Long => {
                "A bit more than you need. Moderate sleep usually feels \
                 better, but I hope you are well rested."
            }
            Self::Excessive => {
                "That is a lot of sleep. Oversleeping can leave you groggy, \
                 so watch how you feel today."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodPressureBand {
    HypertensiveCrisis,
    Stage2,
    Stage1,
    Elevated,
    Normal,
    Low,
    DangerouslyLow,
}

impl BloodPressureBand {
    /// Either value pushes the reading into the high bands; both must
    /// clear the floor for the normal and low bands.
    pub fn classify(systolic: u32, diastolic: u32) -> Self {
        if systolic >= 180 || diastolic >= 120 {
            Self::HypertensiveCrisis
        } else if systolic >= 160 || diastolic >= 100 {
            Self::Stage2
        } else if systolic >= 140 || diastolic >= 90 {
            Self::Stage1
        } else if systolic >= 130 || diastolic >= 85 {
            Self::Elevated
        } else if systolic >= 90 && diastolic >= 60 {
            Self::Normal
        } else if systolic >= 80 && diastolic >= 50 {
            Self::Low
        } else {
            Self::DangerouslyLow
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::HypertensiveCrisis => {
                "That blood pressure is at a dangerous level. Please see a \
                 doctor right away."
            }
            Self::Stage2 => {
                "That is stage two hypertension. Please talk to your doctor \
                 about managing it."
            }
            Self::Stage1 => {
                "That is stage one hypertension. Watch your diet, keep \
                 moving, and mention it to your doctor."
            }
            Self::Elevated => {
                "Your blood pressure is a little high. Less salt and some \
                 light exercise would help."
            }
            Self::Normal => "A perfect reading! You are taking great care of yourself.",
            Self::Low => {
                "Your blood pressure is a little low. Drink more fluids and \
                 stand up slowly."
            }
            Self::DangerouslyLow => {
                "Your blood pressure is very low. If you feel dizzy, sit or \
                 lie down right away."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodSugarBand {
    SevereLow,
    Low,
    Normal,
    Elevated,
    High,
    VeryHigh,
    SevereHigh,
}

impl BloodSugarBand {
    /// Fasting bands in mg/dL.
    pub fn classify(value: u32) -> Self {
        if value < 54 {
            Self::SevereLow
        } else if value < 70 {
            Self::Low
        } else if value <= 99 {
            Self::Normal
        } else if value <= 125 {
            Self::Elevated
        } else if value <= 199 {
            Self::High
        } else if value <= 300 {
            Self::VeryHigh
        } else {
            Self::SevereHigh
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::SevereLow => {
                "That blood sugar is dangerously low. Take some sugar now \
                 and get medical help."
            }
            Self::Low => {
                "That is low blood sugar. Have a sweet or some juice and \
                 measure again in fifteen minutes."
            }
            Self::Normal => "A perfect fasting level! Your blood sugar is well managed.",
            Self::Elevated => {
                "Your blood sugar is a little high. Cut back on sugar and \
                 take a light walk."
            }
            Self::High => {
                "That is high blood sugar. Please review your meals and \
                 talk to your doctor."
            }
            Self::VeryHigh => {
                "That is very high blood sugar. Drink plenty of water and \
                 contact your doctor."
            }
            Self::SevereHigh => {
                "That blood sugar is at a dangerous level. Please get \
                 medical attention."
            }
        }
    }
}
