use chrono::{DateTime, Utc};

use crate::session::input::{CharStatus, count_mismatches};
use crate::session::result::{self, TypingStats};

/// One attempt at reproducing a fixed target text.
///
/// The input box is the source of truth: every change replaces the whole
/// input, and the error count is recomputed against the target each time.
#[derive(Clone, Debug)]
pub struct TypingSession {
    target: Vec<char>,
    input: Vec<char>,
    cursor: usize,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    error_count: usize,
}

impl TypingSession {
    pub fn start(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            input: Vec::new(),
            cursor: 0,
            started_at: None,
            completed_at: None,
            error_count: 0,
        }
    }

    pub fn reset(&mut self, target: &str) {
        *self = Self::start(target);
    }

    pub fn submit_input(&mut self, input: &str) {
        self.submit_input_at(input, Utc::now());
    }

    pub fn submit_input_at(&mut self, input: &str, now: DateTime<Utc>) {
        if self.is_completed() {
            return;
        }

        if self.started_at.is_none() && !input.is_empty() {
            self.started_at = Some(now);
        }

        self.input = input.chars().collect();
        self.cursor = self.input.len();
        self.error_count = count_mismatches(&self.input, &self.target);

        if self.input.len() >= self.target.len() {
            self.completed_at = Some(now);
        }
    }

    pub fn character_status(&self, index: usize) -> CharStatus {
        if let Some(typed) = self.input.get(index) {
            return if self.target.get(index) == Some(typed) {
                CharStatus::Correct
            } else {
                CharStatus::Incorrect
            };
        }
        if index == self.cursor && !self.is_completed() {
            CharStatus::Current
        } else {
            CharStatus::Pending
        }
    }

    pub fn finalize(&self) -> TypingStats {
        self.finalize_at(Utc::now())
    }

    /// Final statistics, dated `now`. Call once, right after completion is
    /// detected, so the date matches the moment the attempt ended.
    pub fn finalize_at(&self, now: DateTime<Utc>) -> TypingStats {
        TypingStats::compute(self.input.len(), self.error_count, self.minutes_elapsed(), now)
    }

    fn minutes_elapsed(&self) -> f64 {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => {
                let ms = (end - start).num_milliseconds().max(0);
                ms as f64 / 60_000.0
            }
            _ => 0.0,
        }
    }

    /// Seconds since the first keystroke, frozen once the session completes.
    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let end = self.completed_at.unwrap_or(now);
        (end - start).num_milliseconds().max(0) as f64 / 1000.0
    }

    /// Running WPM for display while the attempt is still in progress.
    pub fn live_wpm(&self, elapsed_secs: f64) -> u32 {
        result::words_per_minute(self.input.len(), elapsed_secs / 60.0)
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    #[test]
    fn test_new_session() {
        let session = TypingSession::start("hello");
        assert_eq!(session.target().len(), 5);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.error_count(), 0);
        assert!(!session.is_started());
        assert!(!session.is_completed());
    }

    #[test]
    fn test_first_non_empty_input_starts_session() {
        let mut session = TypingSession::start("hello");
        session.submit_input_at("", t(0));
        assert!(!session.is_started());

        session.submit_input_at("h", t(500));
        assert_eq!(session.started_at(), Some(t(500)));

        // Later input does not move the start
        session.submit_input_at("he", t(900));
        assert_eq!(session.started_at(), Some(t(500)));
    }

    #[test]
    fn test_exact_input_completes_without_errors() {
        for target in ["a", "cat", "hello world", "tab\tand\nnewline"] {
            let mut session = TypingSession::start(target);
            session.submit_input_at(target, t(0));
            assert!(session.is_completed(), "{target:?} should complete");
            assert_eq!(session.error_count(), 0);
        }
    }

    #[test]
    fn test_completed_session_ignores_input() {
        let mut session = TypingSession::start("ab");
        session.submit_input_at("ab", t(1000));
        session.submit_input_at("xy", t(2000));
        assert_eq!(session.input(), &['a', 'b']);
        assert_eq!(session.error_count(), 0);
        assert_eq!(session.completed_at(), Some(t(1000)));
    }

    #[test]
    fn test_errors_recomputed_on_correction() {
        let mut session = TypingSession::start("abcd");
        session.submit_input_at("xbx", t(0));
        assert_eq!(session.error_count(), 2);

        // Backspace twice, fix position 0 by retyping everything
        session.submit_input_at("x", t(100));
        assert_eq!(session.error_count(), 1);
        session.submit_input_at("", t(200));
        assert_eq!(session.error_count(), 0);
        session.submit_input_at("abc", t(300));
        assert_eq!(session.error_count(), 0);

        // Regress a different position via paste-over
        session.submit_input_at("azc", t(400));
        assert_eq!(session.error_count(), 1);
    }

    #[test]
    fn test_correcting_positions_decreases_errors_exactly() {
        let mut session = TypingSession::start("abcdef");
        session.submit_input_at("xbxdx", t(0));
        assert_eq!(session.error_count(), 3);
        session.submit_input_at("abxdx", t(100));
        assert_eq!(session.error_count(), 2);
        session.submit_input_at("abcde", t(200));
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_over_length_input_completes() {
        let mut session = TypingSession::start("ab");
        session.submit_input_at("abzz", t(0));
        assert!(session.is_completed());
        assert_eq!(session.error_count(), 0);
        assert_eq!(session.cursor(), 4);
        assert_eq!(session.character_status(3), CharStatus::Incorrect);
    }

    #[test]
    fn test_character_status() {
        let mut session = TypingSession::start("abc");
        assert_eq!(session.character_status(0), CharStatus::Current);
        assert_eq!(session.character_status(1), CharStatus::Pending);

        session.submit_input_at("ax", t(0));
        assert_eq!(session.character_status(0), CharStatus::Correct);
        assert_eq!(session.character_status(1), CharStatus::Incorrect);
        assert_eq!(session.character_status(2), CharStatus::Current);
        assert_eq!(session.character_status(3), CharStatus::Pending);

        // Queries do not mutate
        for _ in 0..3 {
            assert_eq!(session.character_status(1), CharStatus::Incorrect);
            assert_eq!(session.character_status(2), CharStatus::Current);
        }
    }

    #[test]
    fn test_no_current_after_completion() {
        let mut session = TypingSession::start("ab");
        session.submit_input_at("ab", t(0));
        assert_eq!(session.character_status(2), CharStatus::Pending);
    }

    #[test]
    fn test_reset_discards_state() {
        let mut session = TypingSession::start("abc");
        session.submit_input_at("abc", t(0));
        session.reset("xyz");
        assert_eq!(session.target(), &['x', 'y', 'z']);
        assert!(session.input().is_empty());
        assert!(!session.is_started());
        assert!(!session.is_completed());
    }

    #[test]
    fn test_empty_target() {
        let mut session = TypingSession::start("");
        session.submit_input_at("", t(0));
        assert!(session.is_completed());
        assert!(!session.is_started());

        let stats = session.finalize_at(t(0));
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.characters_typed, 0);
    }

    #[test]
    fn test_cat_scenario() {
        let mut session = TypingSession::start("cat");
        session.submit_input_at("c", t(0));
        assert!(session.is_started());
        assert!(!session.is_completed());

        session.submit_input_at("cat", t(3000));
        assert!(session.is_completed());

        let stats = session.finalize_at(t(3100));
        assert_eq!(stats.characters_typed, 3);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.wpm, 12);
        assert_eq!(stats.accuracy, 100);
        assert!((stats.time_elapsed - 3.0).abs() < 1e-9);
        assert_eq!(stats.date, t(3100));
    }

    #[test]
    fn test_finalize_before_start_is_zero_time() {
        let session = TypingSession::start("abc");
        let stats = session.finalize_at(t(0));
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.time_elapsed, 0.0);
    }

    #[test]
    fn test_elapsed_and_live_wpm() {
        let mut session = TypingSession::start("hello world");
        assert_eq!(session.elapsed_secs_at(t(5000)), 0.0);

        session.submit_input_at("hello", t(0));
        assert!((session.elapsed_secs_at(t(6000)) - 6.0).abs() < 1e-9);
        // 5 chars over 6s = 1 word / 0.1 min
        assert_eq!(session.live_wpm(6.0), 10);
        assert_eq!(session.live_wpm(0.0), 0);

        session.submit_input_at("hello world", t(12_000));
        assert!((session.elapsed_secs_at(t(60_000)) - 12.0).abs() < 1e-9);
    }
}
