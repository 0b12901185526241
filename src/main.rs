mod app;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::LevelFilter;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use typetutor::catalog::{Difficulty, LessonCatalog};
use typetutor::config::Config;
use typetutor::logging;
use typetutor::store::summary::format_total_time;
use typetutor::store::{JsonStore, Ledger, ProgressStore, UserProgress};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};

#[derive(Parser)]
#[command(name = "typetutor", version, about = "Typing practice with progress tracking")]
struct Cli {
    #[arg(long, global = true, help = "Directory holding progress.json")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Type a lesson, or the speed-test text when no lesson is given
    Practice {
        #[arg(short, long, help = "Lesson id (see `typetutor lessons`)")]
        lesson: Option<String>,
    },
    /// List lessons with your progress on each
    Lessons {
        #[arg(short, long, help = "beginner, intermediate or advanced")]
        difficulty: Option<Difficulty>,
    },
    /// Show totals and recent sessions
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    if let Err(e) = logging::init(&config.log_file(), LevelFilter::Info) {
        eprintln!("warning: logging disabled: {e}");
    }

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    let ledger = Ledger::new(JsonStore::with_base_dir(data_dir)?);
    let catalog = LessonCatalog::builtin()?;

    match cli.command.unwrap_or(Command::Practice { lesson: None }) {
        Command::Practice { lesson } => {
            let (text, lesson) = match lesson {
                Some(id) => match catalog.get(&id) {
                    Some(lesson) => (lesson.text.clone(), Some(lesson.clone())),
                    None => bail!("Unknown lesson {id:?}; run `typetutor lessons` to list them"),
                },
                None => (config.speed_test_text.clone(), None),
            };
            run_practice(App::new(ledger, text, lesson))
        }
        Command::Lessons { difficulty } => {
            print_lessons(&catalog, &ledger.load_or_initialize(), difficulty);
            Ok(())
        }
        Command::Stats => {
            print_stats(&ledger.load_or_initialize());
            Ok(())
        }
    }
}

fn run_practice<S: ProgressStore>(mut app: App<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    if app.screen == AppScreen::Result {
        print_stats(&app.progress);
    }

    Ok(())
}

fn run_app<S: ProgressStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key<S: ProgressStore>(app: &mut App<S>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Typing => match key.code {
            KeyCode::Esc => app.should_quit = true,
            KeyCode::Backspace => app.backspace(),
            KeyCode::Enter => app.type_char('\n'),
            KeyCode::Tab => app.type_char('\t'),
            KeyCode::Char(ch) if !is_command_chord(&key) => app.type_char(ch),
            _ => {}
        },
        AppScreen::Result => match key.code {
            KeyCode::Char('r') => app.retry(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
    }
}

/// Control and Alt combinations are shortcuts, not text; Shift still types.
fn is_command_chord(key: &KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn print_lessons(catalog: &LessonCatalog, progress: &UserProgress, difficulty: Option<Difficulty>) {
    let lessons = catalog.filter(difficulty);
    if lessons.is_empty() {
        println!("No lessons found for this difficulty level.");
        return;
    }
    for lesson in lessons {
        let status = match progress.lesson(&lesson.id) {
            Some(p) if p.completed => format!(
                "done  best {} wpm / {}%  ({} attempts)",
                p.best_wpm, p.best_accuracy, p.attempts
            ),
            Some(p) => format!(
                "best {} wpm / {}%  ({} attempts)",
                p.best_wpm, p.best_accuracy, p.attempts
            ),
            None => "not attempted".to_string(),
        };
        println!(
            "{:<26} {:<13} {:>2}min  {}",
            lesson.id, lesson.difficulty, lesson.estimated_time, status
        );
    }
}

fn print_stats(progress: &UserProgress) {
    if progress.total_sessions == 0 {
        println!("No sessions recorded yet. Run `typetutor practice` to start.");
        return;
    }
    println!("Sessions completed: {}", progress.total_sessions);
    println!("Practice time:      {}", format_total_time(progress.total_time_spent));
    println!("Average WPM:        {}", progress.average_wpm);
    println!("Average accuracy:   {}%", progress.average_accuracy);
    println!("Best recent WPM:    {}", progress.best_recent_wpm());
    println!("Lessons completed:  {}", progress.completed_lesson_count());
    if let Some(delta) = progress.recent_improvement() {
        println!("Latest change:      {delta:+} wpm");
    }

    println!();
    println!("Recent sessions:");
    for stats in progress.recent_stats.iter().take(5) {
        println!(
            "  {}  {:>3} wpm  {:>3}%  {}",
            stats.date.format("%Y-%m-%d"),
            stats.wpm,
            stats.accuracy,
            format_total_time(stats.time_elapsed)
        );
    }
}

#[cfg(test)]
mod tests {
    use typetutor::store::MemoryStore;

    use super::*;

    fn app(text: &str) -> App<MemoryStore> {
        App::new(Ledger::new(MemoryStore::new()), text.to_string(), None)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_control_and_alt_chords_do_not_type() {
        let mut app = app("hello");
        press(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('b'), KeyModifiers::ALT);
        assert!(app.buffer.is_empty());
        assert!(!app.session.is_started());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_plain_and_shifted_chars_type() {
        let mut app = app("Hi");
        press(&mut app, KeyCode::Char('H'), KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(app.buffer, "Hi");
        assert_eq!(app.screen, AppScreen::Result);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app("hello");
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.buffer.is_empty());
    }
}
