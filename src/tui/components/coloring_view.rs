//! # Coloring View
//!
//! The coloring page drawn on a ratatui `Canvas`, the vocabulary recap and
//! the restart button.
//!
//! ```text
//! ┌──────────── page (2:1 cells, 100×100 units) ────────────┐
//! │                 template regions, filled                │
//! └──────────────────────────────────────────────────────────┘
//!  ✏️ mane
//!  ╭──────────╮ ╭────────────╮            ╭────────────╮
//!  │ 1 🦁 Lion │ │ 2 🐰 Rabbit │   ...      │ 🔄 Yeniden │
//!  ╰──────────╯ ╰────────────╯            ╰────────────╯
//! ```
//!
//! Template coordinates have y growing down; the canvas has y growing up,
//! so every point is flipped on the way in.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::coloring::ColoringActivity;
use crate::core::model::{Rgb, VocabularyEntry};
use crate::core::templates::{BaseFill, Point, Shape};
use crate::tui::component::Component;
use crate::tui::ui::HitMap;

const CANVAS_SIZE: f64 = 100.0;
const FILL_STEP: f64 = 1.0;
const INK: Color = Color::Rgb(0x33, 0x33, 0x33);
const RESTART_LABEL: &str = "🔄 Yeniden";
const RESTART_WIDTH: u16 = 14;
const WORD_GAP: u16 = 1;

pub fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Sample points covering a shape, already flipped into canvas space.
pub fn fill_points(shape: &Shape) -> Vec<(f64, f64)> {
    let (x0, y0, x1, y1) = shape.bounds();
    let (x0, y0) = (x0.max(0.0).floor(), y0.max(0.0).floor());
    let (x1, y1) = (x1.min(CANVAS_SIZE), y1.min(CANVAS_SIZE));

    let mut points = Vec::new();
    let mut y = y0;
    while y <= y1 {
        let mut x = x0;
        while x <= x1 {
            if shape.contains((x, y)) {
                points.push((x, CANVAS_SIZE - y));
            }
            x += FILL_STEP;
        }
        y += FILL_STEP;
    }
    points
}

/// Largest 2:1 (cells) rectangle centered in `area`, so the page looks square.
pub fn page_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [page] = Layout::horizontal([Constraint::Length(height * 2)])
        .flex(Flex::Center)
        .areas(row);
    page
}

/// Maps a terminal cell inside the page to template coordinates (cell centers).
pub fn canvas_point(page: Rect, column: u16, row: u16) -> Option<Point> {
    if page.width == 0 || page.height == 0 || !page.contains(Position::new(column, row)) {
        return None;
    }
    let x = (f64::from(column - page.x) + 0.5) / f64::from(page.width) * CANVAS_SIZE;
    let y = (f64::from(row - page.y) + 0.5) / f64::from(page.height) * CANVAS_SIZE;
    Some((x, y))
}

fn word_label(index: usize, entry: &VocabularyEntry) -> String {
    format!("{} {} {}", index + 1, entry.emoji, entry.english)
}

pub struct ColoringView<'a> {
    pub activity: &'a ColoringActivity,
    /// Region selected from the keyboard
    pub cursor: usize,
    pub vocabulary: &'a [VocabularyEntry],
    pub accent: Color,
    pub hits: &'a mut HitMap,
}

impl ColoringView<'_> {
    fn render_page(&mut self, frame: &mut Frame, area: Rect) {
        let page = page_rect(area);
        let template = self.activity.template();
        let fills = self.activity.fills();
        let cursor = self.cursor;
        let accent = self.accent;

        let canvas = Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, CANVAS_SIZE])
            .y_bounds([0.0, CANVAS_SIZE])
            .paint(|ctx| {
                for (region, fill) in template.regions.iter().zip(fills) {
                    let color = match (fill, region.base) {
                        (Some(rgb), _) => to_color(*rgb),
                        (None, BaseFill::Ink) => INK,
                        (None, BaseFill::Paper) => continue,
                    };
                    let coords = fill_points(&region.shape);
                    ctx.draw(&Points {
                        coords: &coords,
                        color,
                    });
                }
                ctx.layer();
                for (index, region) in template.regions.iter().enumerate() {
                    let color = if index == cursor { Color::Yellow } else { accent };
                    for ((ax, ay), (bx, by)) in region.shape.outline() {
                        ctx.draw(&CanvasLine::new(
                            ax,
                            CANVAS_SIZE - ay,
                            bx,
                            CANVAS_SIZE - by,
                            color,
                        ));
                    }
                }
            });
        frame.render_widget(canvas, page);
        self.hits.canvas = Some(page);
    }

    fn render_words(&mut self, frame: &mut Frame, area: Rect) {
        let mut x = area.x;
        let mut rects = Vec::new();
        for (index, entry) in self.vocabulary.iter().enumerate() {
            let label = word_label(index, entry);
            let width = label.width() as u16 + 4;
            if x + width > area.right() {
                break;
            }
            let rect = Rect::new(x, area.y, width, area.height);
            frame.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .block(Block::bordered().border_type(BorderType::Rounded)),
                rect,
            );
            rects.push(rect);
            x += width + WORD_GAP;
        }
        self.hits.words = rects;
    }
}

impl Component for ColoringView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [page_area, region_area, bottom] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);
        let [words_area, restart_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(RESTART_WIDTH)])
                .areas(bottom);

        self.render_page(frame, page_area);

        if let Some(region) = self.activity.template().regions.get(self.cursor) {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    format!("✏️ {}", region.name),
                    Style::default().add_modifier(Modifier::DIM),
                ))
                .alignment(Alignment::Center),
                region_area,
            );
        }

        self.render_words(frame, words_area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                RESTART_LABEL,
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.accent)),
            ),
            restart_area,
        );
        self.hits.restart = Some(restart_area);
    }
}
