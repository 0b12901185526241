use chrono::{DateTime, Utc};

use crate::session::result::TypingStats;
use crate::store::ProgressStore;
use crate::store::schema::{LessonProgress, UserProgress};

/// Aggregates finished sessions into the persisted [`UserProgress`].
///
/// Storage failures are logged, never returned; `record` always hands back
/// the updated in-memory progress. Each load-modify-store cycle needs
/// `&mut self`, so share across threads as `Mutex<Ledger<_>>`.
pub struct Ledger<S: ProgressStore> {
    store: S,
}

impl<S: ProgressStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored progress, or `None` if there is none or it cannot be read.
    pub fn load(&self) -> Option<UserProgress> {
        match self.store.load() {
            Ok(progress) => progress,
            Err(e) => {
                log::warn!("Failed to load progress, starting fresh: {e}");
                None
            }
        }
    }

    pub fn initialize(&self) -> UserProgress {
        self.initialize_at(Utc::now())
    }

    pub fn initialize_at(&self, now: DateTime<Utc>) -> UserProgress {
        UserProgress::new(now)
    }

    /// Stored progress, or a fresh one if nothing usable is stored.
    pub fn load_or_initialize(&self) -> UserProgress {
        self.load().unwrap_or_else(|| self.initialize())
    }

    pub fn record(&mut self, stats: TypingStats, lesson_id: Option<&str>) -> UserProgress {
        self.record_at(stats, lesson_id, Utc::now())
    }

    pub fn record_at(
        &mut self,
        stats: TypingStats,
        lesson_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> UserProgress {
        let mut progress = self.load().unwrap_or_else(|| self.initialize_at(now));
        progress.drop_unnamed_lessons();
        let lesson_id = lesson_id.filter(|id| !id.is_empty());

        progress.total_sessions += 1;
        progress.total_time_spent += stats.time_elapsed;

        if let Some(id) = lesson_id {
            match progress.lesson_mut(id) {
                Some(lesson) => lesson.add_attempt(&stats, now),
                None => progress
                    .lessons_completed
                    .push(LessonProgress::first_attempt(id, &stats, now)),
            }
        }

        log::debug!(
            "Recording session: wpm={} accuracy={} lesson={:?}",
            stats.wpm,
            stats.accuracy,
            lesson_id
        );
        progress.push_recent(stats);
        progress.recompute_averages();

        progress.last_updated = now;
        self.persist(&progress);
        progress
    }

    /// Overwrite the stored progress. Returns `false` (after logging) if the
    /// write failed; the caller keeps its in-memory copy either way.
    pub fn persist(&self, progress: &UserProgress) -> bool {
        match self.store.save(progress) {
            Ok(()) => {
                log::info!(
                    "Saved progress: {} sessions, avg {} wpm / {}%",
                    progress.total_sessions,
                    progress.average_wpm,
                    progress.average_accuracy
                );
                true
            }
            Err(e) => {
                log::error!("Failed to save progress: {e}");
                false
            }
        }
    }
}
