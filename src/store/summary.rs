//! Figures derived from [`UserProgress`] for dashboards.

use crate::store::schema::UserProgress;

impl UserProgress {
    pub fn best_recent_wpm(&self) -> u32 {
        self.recent_stats.iter().map(|s| s.wpm).max().unwrap_or(0)
    }

    /// WPM change between the latest session and the one before it.
    pub fn recent_improvement(&self) -> Option<i64> {
        match self.recent_stats.as_slice() {
            [latest, previous, ..] => Some(i64::from(latest.wpm) - i64::from(previous.wpm)),
            _ => None,
        }
    }

    pub fn completed_lesson_count(&self) -> usize {
        self.lessons_completed.iter().filter(|l| l.completed).count()
    }
}

/// `"2h 5m"`, or just `"5m"` under an hour.
pub fn format_total_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// `"m:ss"` clock used next to a running session.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
