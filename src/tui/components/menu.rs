//! # Menu and Loading Pages
//!
//! The start screen and the spinner shown while a session is generated.
//!

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::ui::HitMap;

const START_LABEL: &str = "▶ Başla";
const START_WIDTH: u16 = 14;

pub struct MenuPage<'a> {
    /// False when only the built-in levels are available (shows 🧪).
    pub has_live_provider: bool,
    pub accent: Color,
    pub hits: &'a mut HitMap,
}

impl Component for MenuPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [wave_area, _, button_row, _, note_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let greeting = vec![
            Line::from("👋"),
            Line::from(Span::styled(
                "Merhaba!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(greeting).alignment(Alignment::Center),
            wave_area,
        );

        let [button_area] = Layout::horizontal([Constraint::Length(START_WIDTH)])
            .flex(Flex::Center)
            .areas(button_row);
        let button = Paragraph::new(Span::styled(
            START_LABEL,
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.accent)),
        );
        frame.render_widget(button, button_area);
        self.hits.start = Some(button_area);

        if !self.has_live_provider {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "🧪 hazır oyun",
                    Style::default().add_modifier(Modifier::DIM),
                ))
                .alignment(Alignment::Center),
                note_area,
            );
        }
    }
}

const SPINNER_DOTS: [&str; 4] = ["", ".", "..", "..."];

pub struct LoadingPage {
    frame_index: usize,
}

impl LoadingPage {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }
}

impl Component for LoadingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [line_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let dots = SPINNER_DOTS[self.frame_index % SPINNER_DOTS.len()];
        frame.render_widget(
            Paragraph::new(format!("⏳ Hazırlanıyor{dots:<3}")).alignment(Alignment::Center),
            line_area,
        );
    }
}
