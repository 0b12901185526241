use chrono::{DateTime, Utc};

use typetutor::catalog::Lesson;
use typetutor::session::{TypingSession, TypingStats};
use typetutor::store::{Ledger, ProgressStore, UserProgress};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Typing,
    Result,
}

/// Front-end state for one practice run: the text box contents, the engine
/// session fed from it, and the ledger that receives the result.
pub struct App<S: ProgressStore> {
    pub screen: AppScreen,
    pub session: TypingSession,
    pub text: String,
    pub buffer: String,
    pub lesson: Option<Lesson>,
    pub ledger: Ledger<S>,
    pub last_stats: Option<TypingStats>,
    pub progress: UserProgress,
    pub should_quit: bool,
}

impl<S: ProgressStore> App<S> {
    pub fn new(ledger: Ledger<S>, text: String, lesson: Option<Lesson>) -> Self {
        let progress = ledger.load_or_initialize();
        Self {
            screen: AppScreen::Typing,
            session: TypingSession::start(&text),
            text,
            buffer: String::new(),
            lesson,
            ledger,
            last_stats: None,
            progress,
            should_quit: false,
        }
    }

    pub fn title(&self) -> &str {
        self.lesson
            .as_ref()
            .map(|l| l.title.as_str())
            .unwrap_or("Speed Test")
    }

    pub fn type_char(&mut self, ch: char) {
        self.type_char_at(ch, Utc::now());
    }

    pub fn type_char_at(&mut self, ch: char, now: DateTime<Utc>) {
        if self.screen != AppScreen::Typing {
            return;
        }
        self.buffer.push(ch);
        self.sync_input(now);
    }

    pub fn backspace(&mut self) {
        self.backspace_at(Utc::now());
    }

    pub fn backspace_at(&mut self, now: DateTime<Utc>) {
        if self.screen != AppScreen::Typing || self.buffer.pop().is_none() {
            return;
        }
        self.sync_input(now);
    }

    fn sync_input(&mut self, now: DateTime<Utc>) {
        self.session.submit_input_at(&self.buffer, now);
        if self.session.is_completed() {
            self.finish(now);
        }
    }

    fn finish(&mut self, now: DateTime<Utc>) {
        let stats = self.session.finalize_at(now);
        let lesson_id = self.lesson.as_ref().map(|l| l.id.as_str());
        log::info!(
            "Session complete: {} wpm, {}% accuracy, {} errors",
            stats.wpm,
            stats.accuracy,
            stats.errors
        );
        self.progress = self.ledger.record_at(stats.clone(), lesson_id, now);
        self.last_stats = Some(stats);
        self.screen = AppScreen::Result;
    }

    pub fn retry(&mut self) {
        self.session.reset(&self.text);
        self.buffer.clear();
        self.last_stats = None;
        self.screen = AppScreen::Typing;
    }

    /// Whether the last attempt passed its lesson on this run.
    pub fn lesson_passed(&self) -> bool {
        match (&self.lesson, &self.last_stats) {
            (Some(lesson), Some(_)) => self
                .progress
                .lesson(&lesson.id)
                .is_some_and(|p| p.completed),
            _ => false,
        }
    }
}
