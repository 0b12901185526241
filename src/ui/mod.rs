pub mod typing_area;

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use typetutor::session::result::accuracy_percent;
use typetutor::store::ProgressStore;
use typetutor::store::summary::{format_clock, format_total_time};

use crate::app::{App, AppScreen};
use typing_area::TypingArea;

pub fn render<S: ProgressStore>(frame: &mut Frame, app: &App<S>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_stats_bar(frame, header, app);

    match app.screen {
        AppScreen::Typing => {
            frame.render_widget(TypingArea::new(&app.session, app.title()), body);
            frame.render_widget(
                Paragraph::new("type to start  ·  backspace to fix  ·  esc to quit")
                    .style(Style::default().fg(Color::DarkGray)),
                footer,
            );
        }
        AppScreen::Result => {
            render_result(frame, body, app);
            frame.render_widget(
                Paragraph::new("r to retry  ·  q to quit")
                    .style(Style::default().fg(Color::DarkGray)),
                footer,
            );
        }
    }
}

fn stat(label: &str, value: String) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{label} "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
    ]
}

fn render_stats_bar<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let session = &app.session;
    let elapsed = session.elapsed_secs_at(Utc::now());
    let wpm = match &app.last_stats {
        Some(stats) => stats.wpm,
        None => session.live_wpm(elapsed),
    };
    let accuracy = accuracy_percent(session.input().len(), session.error_count());

    let mut spans = stat("WPM", wpm.to_string());
    spans.extend(stat("Accuracy", format!("{accuracy}%")));
    spans.extend(stat("Errors", session.error_count().to_string()));
    spans.extend(stat("Time", format_clock(elapsed)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::bordered()),
        area,
    );
}

fn render_result<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(stats) = &app.last_stats else {
        return;
    };
    let progress = &app.progress;

    let mut lines = vec![
        Line::from(Span::styled(
            "Test complete!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} wpm  ·  {}% accuracy  ·  {} errors  ·  {} chars in {}",
            stats.wpm,
            stats.accuracy,
            stats.errors,
            stats.characters_typed,
            format_clock(stats.time_elapsed)
        )),
    ];
    if app.lesson_passed() {
        lines.push(Line::from(Span::styled(
            "Lesson completed!",
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Recent average: {} wpm / {}%   Sessions: {}   Practice time: {}",
        progress.average_wpm,
        progress.average_accuracy,
        progress.total_sessions,
        format_total_time(progress.total_time_spent)
    )));
    if let Some(delta) = progress.recent_improvement() {
        lines.push(Line::from(format!("Change from last session: {delta:+} wpm")));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Results ")),
        area,
    );
}
