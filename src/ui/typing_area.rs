use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use typetutor::session::{CharStatus, TypingSession};

/// Target text coloured by per-character status.
pub struct TypingArea<'a> {
    session: &'a TypingSession,
    title: &'a str,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, title: &'a str) -> Self {
        Self { session, title }
    }
}

/// A render token maps a single target character to its display representation.
struct RenderToken {
    display: String,
    is_line_break: bool,
}

fn build_render_tokens(target: &[char]) -> Vec<RenderToken> {
    let mut tokens = Vec::with_capacity(target.len());
    let mut col = 0usize;

    for &ch in target {
        let token = match ch {
            '\n' => {
                col = 0;
                RenderToken {
                    display: "\u{21b5}".to_string(), // ↵
                    is_line_break: true,
                }
            }
            '\t' => {
                let tab_width = 4 - (col % 4);
                col += tab_width;
                let mut display = String::from("\u{2192}"); // →
                for _ in 1..tab_width {
                    display.push('\u{00b7}'); // ·
                }
                RenderToken {
                    display,
                    is_line_break: false,
                }
            }
            _ => {
                col += 1;
                RenderToken {
                    display: ch.to_string(),
                    is_line_break: false,
                }
            }
        };
        tokens.push(token);
    }

    tokens
}

fn status_style(status: CharStatus) -> Style {
    match status {
        CharStatus::Correct => Style::default().fg(Color::Green),
        CharStatus::Incorrect => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::UNDERLINED),
        CharStatus::Current => Style::default().fg(Color::Black).bg(Color::White),
        CharStatus::Pending => Style::default().fg(Color::DarkGray),
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Vec<Span>> = vec![Vec::new()];

        for (idx, token) in build_render_tokens(self.session.target())
            .into_iter()
            .enumerate()
        {
            let style = status_style(self.session.character_status(idx));
            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(token.display, style));
            }
            if token.is_line_break {
                lines.push(Vec::new());
            }
        }

        let paragraph = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .block(Block::bordered().title(format!(" {} ", self.title)))
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tokens_basic() {
        let target: Vec<char> = "abc".chars().collect();
        let tokens = build_render_tokens(&target);
        let displays: Vec<&str> = tokens.iter().map(|t| t.display.as_str()).collect();
        assert_eq!(displays, ["a", "b", "c"]);
        assert!(tokens.iter().all(|t| !t.is_line_break));
    }

    #[test]
    fn test_render_tokens_newline_resets_tab_column() {
        // "ab\t" tabs to col 4; after "\n" a tab is full width again
        let target: Vec<char> = "ab\t\n\tx".chars().collect();
        let tokens = build_render_tokens(&target);
        assert_eq!(tokens[2].display, "\u{2192}\u{00b7}");
        assert!(tokens[3].is_line_break);
        assert_eq!(tokens[4].display, "\u{2192}\u{00b7}\u{00b7}\u{00b7}");
    }

    #[test]
    fn test_render_marks_statuses() {
        let mut session = TypingSession::start("abc");
        session.submit_input("ax");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(&session, "t").render(area, &mut buf);

        // Inside the border: row 1, columns 1..=3
        assert_eq!(buf[(1, 1)].fg, Color::Green);
        assert_eq!(buf[(2, 1)].fg, Color::Red);
        assert_eq!(buf[(3, 1)].bg, Color::White);
    }
}
