use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::core::model::{Rgb, Session};
use crate::core::state::{App, Stage};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::coloring_view::to_color;
use crate::tui::components::header::HEADER_HEIGHT;
use crate::tui::components::{ColoringView, Header, LevelView, LoadingPage, MenuPage};

const DEFAULT_ACCENT: Color = Color::Green;
/// Text color used on top of a theme background (themes are light pastels).
const TEXT_ON_THEME: Color = Color::Rgb(0x1F, 0x29, 0x37);

/// Where the clickable parts of the last frame landed.
/// Rebuilt on every draw; mouse events are resolved against it.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub start: Option<Rect>,
    pub tiles: Vec<Rect>,
    pub tile_columns: usize,
    pub canvas: Option<Rect>,
    pub words: Vec<Rect>,
    pub restart: Option<Rect>,
}

impl HitMap {
    pub fn clear(&mut self) {
        *self = HitMap::default();
    }

    pub fn tile_at(&self, column: u16, row: u16) -> Option<usize> {
        position_in(&self.tiles, column, row)
    }

    pub fn word_at(&self, column: u16, row: u16) -> Option<usize> {
        position_in(&self.words, column, row)
    }
}

fn position_in(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    rects
        .iter()
        .position(|r| r.contains(Position::new(column, row)))
}

pub fn hit(rect: Option<Rect>, column: u16, row: u16) -> bool {
    rect.is_some_and(|r| r.contains(Position::new(column, row)))
}

/// Session theme colors; invalid hex strings fall back to terminal defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiTheme {
    pub background: Option<Color>,
    pub accent: Color,
}

impl UiTheme {
    pub fn from_session(session: Option<&Session>) -> Self {
        let theme = session.map(|s| &s.theme);
        let parse = |hex: &str| Rgb::from_hex(hex).map(to_color);
        Self {
            background: theme.and_then(|t| parse(&t.background)),
            accent: theme
                .and_then(|t| parse(&t.primary))
                .unwrap_or(DEFAULT_ACCENT),
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let theme = UiTheme::from_session(app.session.as_ref());
    if let Some(background) = theme.background {
        frame.render_widget(
            Block::default().style(Style::default().bg(background).fg(TEXT_ON_THEME)),
            frame.area(),
        );
    }

    let [header_area, _, body] =
        Layout::vertical([Length(HEADER_HEIGHT), Length(1), Min(0)]).areas(frame.area());
    let [_, body, _] = Layout::horizontal([Length(1), Min(0), Length(1)]).areas(body);

    tui.hits.clear();

    let progress = match app.stage {
        Stage::Playing(index) => Some((index, app.level_count())),
        _ => None,
    };
    Header::new(progress, app.caption.clone(), theme.accent).render(frame, header_area);

    match app.stage {
        Stage::Menu => MenuPage {
            has_live_provider: app.has_live_provider(),
            accent: theme.accent,
            hits: &mut tui.hits,
        }
        .render(frame, body),
        Stage::Loading => LoadingPage::new(tui.spinner_frame).render(frame, body),
        Stage::Playing(_) => {
            if let Some(engine) = &app.level {
                LevelView {
                    engine,
                    cursor: tui.cursor,
                    accent: theme.accent,
                    hits: &mut tui.hits,
                }
                .render(frame, body);
            }
        }
        Stage::Coloring => {
            if let (Some(activity), Some(session)) = (&app.coloring, &app.session) {
                ColoringView {
                    activity,
                    cursor: tui.region_cursor,
                    vocabulary: &session.vocabulary,
                    accent: theme.accent,
                    hits: &mut tui.hits,
                }
                .render(frame, body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback_session;
    use crate::core::action::{Action, update};
    use crate::test_support::{buffer_text, live_app, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_ui_theme_parses_session_colors() {
        let session = fallback_session();
        let theme = UiTheme::from_session(Some(&session));
        assert_eq!(theme.background, Some(Color::Rgb(0xF0, 0xFF, 0xF4)));
        assert_eq!(theme.accent, Color::Rgb(0x4A, 0xDE, 0x80));
    }

    #[test]
    fn test_ui_theme_falls_back_on_bad_hex() {
        let mut session = fallback_session();
        session.theme.background = "green".to_string();
        session.theme.primary = "#12".to_string();
        let theme = UiTheme::from_session(Some(&session));
        assert_eq!(theme.background, None);
        assert_eq!(theme.accent, DEFAULT_ACCENT);
        assert_eq!(UiTheme::from_session(None).accent, DEFAULT_ACCENT);
    }

    #[test]
    fn test_draw_menu() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("Emoji Zoo"));
        assert!(text.contains("Başla"));
        assert!(tui.hits.start.is_some());
        assert!(tui.hits.tiles.is_empty());
    }

    #[test]
    fn test_draw_loading() {
        let mut app = live_app();
        update(&mut app, Action::Start);
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("⏳"));
        assert!(tui.hits.start.is_none());
    }

    #[test]
    fn test_draw_level_shows_caption_and_tiles() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("Aslan acıkmış"));
        assert!(text.contains("◉"));
        assert_eq!(tui.hits.tiles.len(), 2);
    }

    #[test]
    fn test_hit_map_lookup() {
        let hits = HitMap {
            tiles: vec![Rect::new(0, 0, 10, 3), Rect::new(11, 0, 10, 3)],
            restart: Some(Rect::new(50, 20, 14, 3)),
            ..HitMap::default()
        };
        assert_eq!(hits.tile_at(12, 1), Some(1));
        assert_eq!(hits.tile_at(10, 1), None);
        assert!(hit(hits.restart, 55, 21));
        assert!(!hit(hits.start, 55, 21));
    }
}
