use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters per "word" when converting to words per minute.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStats {
    #[serde(default)]
    pub wpm: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    #[serde(default)]
    pub errors: usize,
    /// Seconds between the first keystroke and completion.
    #[serde(default)]
    pub time_elapsed: f64,
    #[serde(default)]
    pub characters_typed: usize,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

fn default_accuracy() -> u32 {
    100
}

impl TypingStats {
    /// Build a stats record from raw counts and the elapsed time in minutes.
    pub fn compute(
        characters_typed: usize,
        errors: usize,
        minutes_elapsed: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            wpm: words_per_minute(characters_typed, minutes_elapsed),
            accuracy: accuracy_percent(characters_typed, errors),
            errors,
            time_elapsed: minutes_elapsed * 60.0,
            characters_typed,
            date,
        }
    }
}

pub fn words_per_minute(characters_typed: usize, minutes_elapsed: f64) -> u32 {
    if minutes_elapsed <= 0.0 {
        return 0;
    }
    let words = characters_typed as f64 / CHARS_PER_WORD;
    (words / minutes_elapsed).round() as u32
}

pub fn accuracy_percent(characters_typed: usize, errors: usize) -> u32 {
    if characters_typed == 0 {
        return 100;
    }
    let correct = characters_typed.saturating_sub(errors) as f64;
    (correct / characters_typed as f64 * 100.0).round() as u32
}
