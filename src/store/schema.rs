use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::result::TypingStats;

/// Most recent sessions kept for the rolling averages.
pub const RECENT_STATS_CAPACITY: usize = 20;

/// Accuracy (percent) at which a lesson attempt counts as a pass.
pub const COMPLETION_ACCURACY: u32 = 95;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub best_wpm: u32,
    #[serde(default)]
    pub best_accuracy: u32,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl LessonProgress {
    pub fn first_attempt(lesson_id: &str, stats: &TypingStats, now: DateTime<Utc>) -> Self {
        let completed = stats.accuracy >= COMPLETION_ACCURACY;
        Self {
            lesson_id: lesson_id.to_string(),
            completed,
            best_wpm: stats.wpm,
            best_accuracy: stats.accuracy,
            attempts: 1,
            completed_at: completed.then_some(now),
        }
    }

    pub fn add_attempt(&mut self, stats: &TypingStats, now: DateTime<Utc>) {
        self.attempts += 1;
        if stats.wpm > self.best_wpm {
            self.best_wpm = stats.wpm;
        }
        if stats.accuracy > self.best_accuracy {
            self.best_accuracy = stats.accuracy;
        }
        if !self.completed && stats.accuracy >= COMPLETION_ACCURACY {
            self.completed = true;
            self.completed_at = Some(now);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub total_sessions: u32,
    /// Lifetime seconds, including sessions evicted from `recent_stats`.
    #[serde(default)]
    pub total_time_spent: f64,
    #[serde(default)]
    pub average_wpm: u32,
    #[serde(default)]
    pub average_accuracy: u32,
    #[serde(default)]
    pub lessons_completed: Vec<LessonProgress>,
    /// Newest first.
    #[serde(default)]
    pub recent_stats: Vec<TypingStats>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl UserProgress {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            total_sessions: 0,
            total_time_spent: 0.0,
            average_wpm: 0,
            average_accuracy: 0,
            lessons_completed: Vec::new(),
            recent_stats: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.lessons_completed
            .iter()
            .find(|l| l.lesson_id == lesson_id)
    }

    pub fn lesson_mut(&mut self, lesson_id: &str) -> Option<&mut LessonProgress> {
        self.lessons_completed
            .iter_mut()
            .find(|l| l.lesson_id == lesson_id)
    }

    /// Remove lesson entries stored without a `lessonId`; they cannot be
    /// matched to any lesson.
    pub fn drop_unnamed_lessons(&mut self) {
        self.lessons_completed.retain(|l| !l.lesson_id.is_empty());
    }

    /// Insert `stats` as the newest entry and drop anything past the window.
    pub fn push_recent(&mut self, stats: TypingStats) {
        self.recent_stats.insert(0, stats);
        self.recent_stats.truncate(RECENT_STATS_CAPACITY);
    }

    /// Averages over the retained window only; evicted sessions no longer count.
    pub fn recompute_averages(&mut self) {
        let n = self.recent_stats.len();
        if n == 0 {
            return;
        }
        let wpm_sum: u64 = self.recent_stats.iter().map(|s| u64::from(s.wpm)).sum();
        let acc_sum: u64 = self
            .recent_stats
            .iter()
            .map(|s| u64::from(s.accuracy))
            .sum();
        self.average_wpm = (wpm_sum as f64 / n as f64).round() as u32;
        self.average_accuracy = (acc_sum as f64 / n as f64).round() as u32;
    }
}
