//! # Header Component
//!
//! Two-line bar at the top of every screen.
//!
//! ```text
//! 🦁 Emoji Zoo                               ● ◉ ○
//! 🔊 Aslan acıkmış. Aslan ne yer?
//! ```
//!
//! Purely presentational: all data arrives as props.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const HEADER_HEIGHT: u16 = 2;

pub struct Header {
    /// (active level index, level count) while playing
    pub progress: Option<(usize, usize)>,
    /// Last narrated line
    pub caption: Option<String>,
    pub accent: Color,
}

impl Header {
    pub fn new(progress: Option<(usize, usize)>, caption: Option<String>, accent: Color) -> Self {
        Self {
            progress,
            caption,
            accent,
        }
    }

    fn progress_dots(&self) -> Line<'static> {
        let Some((current, total)) = self.progress else {
            return Line::default();
        };
        let spans: Vec<Span> = (0..total)
            .map(|i| {
                let (dot, style) = if i < current {
                    ("● ", Style::default().fg(self.accent))
                } else if i == current {
                    ("◉ ", Style::default().fg(self.accent).add_modifier(Modifier::BOLD))
                } else {
                    ("○ ", Style::default().add_modifier(Modifier::DIM))
                };
                Span::styled(dot, style)
            })
            .collect();
        Line::from(spans)
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [top, bottom] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .areas(area);
        let [title_area, dots_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(top);

        let title = Line::from(vec![
            Span::raw("🦁 "),
            Span::styled(
                "Emoji Zoo",
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);
        frame.render_widget(
            Paragraph::new(self.progress_dots()).alignment(Alignment::Right),
            dots_area,
        );

        if let Some(caption) = &self.caption {
            let line = Line::from(vec![
                Span::raw("🔊 "),
                Span::styled(caption.clone(), Style::default().add_modifier(Modifier::ITALIC)),
            ]);
            frame.render_widget(Paragraph::new(line), bottom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(header: &mut Header) -> String {
        let backend = TestBackend::new(60, HEADER_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_header_shows_progress_and_caption() {
        let mut header = Header::new(
            Some((1, 3)),
            Some("Evet!".to_string()),
            Color::Green,
        );
        let text = render(&mut header);
        assert!(text.contains("Emoji Zoo"));
        assert!(text.contains("●"));
        assert!(text.contains("◉"));
        assert!(text.contains("○"));
        assert!(text.contains("Evet!"));
    }

    #[test]
    fn test_header_without_progress_has_no_dots() {
        let mut header = Header::new(None, None, Color::Green);
        let text = render(&mut header);
        assert!(text.contains("Emoji Zoo"));
        assert!(!text.contains("◉"));
        assert!(!text.contains("🔊"));
    }

    #[test]
    fn test_progress_dots_count_matches_levels() {
        let header = Header::new(Some((0, 4)), None, Color::Green);
        let line = header.progress_dots();
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "◉ ");
        assert_eq!(line.spans[3].content, "○ ");
    }
}
