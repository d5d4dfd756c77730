//! # Level View
//!
//! One matching level:
//!
//! ```text
//!            🐸 ➜ 🪰   🐵 ➜ 🍌
//!
//!              🐸 🐵  ❓
//!
//!              ┌────────┐ ┌────────┐
//!              │  1 🪰  │ │  2 🍌  │
//!              └────────┘ └────────┘
//!              ┌────────┐ ┌────────┐
//!              │  3 🥛  │ │  4 🦴  │
//!              └────────┘ └────────┘
//! ```
//!
//! Found tiles turn green and dim, the wrong tile turns red, and the
//! keyboard cursor gets a thick accent border. Tile rectangles are recorded
//! in the `HitMap` for mouse selection.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::level::LevelEngine;
use crate::tui::component::Component;
use crate::tui::ui::HitMap;

const MIN_TILE_WIDTH: u16 = 10;
const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;
const MAX_COLUMNS: usize = 2;

pub struct LevelView<'a> {
    pub engine: &'a LevelEngine,
    pub cursor: usize,
    pub accent: Color,
    pub hits: &'a mut HitMap,
}

/// Keyboard shortcut label for a tile (digits only reach the first nine).
fn tile_label(index: usize, symbol: &str) -> String {
    if index < 9 {
        format!("{} {}", index + 1, symbol)
    } else {
        symbol.to_string()
    }
}

/// Lays out `count` equal tiles in centered rows of at most two. Returns the
/// rects and the number of columns used.
pub fn tile_grid(area: Rect, count: usize, tile_width: u16) -> (Vec<Rect>, usize) {
    if count == 0 || area.width < tile_width {
        return (Vec::new(), 1);
    }
    let per_row = ((area.width + TILE_GAP) / (tile_width + TILE_GAP)).max(1) as usize;
    let columns = per_row.min(MAX_COLUMNS).min(count);
    let row_width = columns as u16 * tile_width + (columns as u16 - 1) * TILE_GAP;
    let x0 = area.x + (area.width - row_width) / 2;

    let rects = (0..count)
        .map(|i| {
            let (row, col) = ((i / columns) as u16, (i % columns) as u16);
            Rect::new(
                x0 + col * (tile_width + TILE_GAP),
                area.y + row * TILE_HEIGHT,
                tile_width,
                TILE_HEIGHT,
            )
        })
        .take_while(|rect| rect.bottom() <= area.bottom())
        .collect();
    (rects, columns)
}

impl LevelView<'_> {
    fn tile_style(&self, index: usize) -> (Style, Style, BorderType) {
        let base = Style::default();
        if self.engine.wrong() == Some(index) {
            let red = base.fg(Color::Red).add_modifier(Modifier::BOLD);
            (red, red, BorderType::Thick)
        } else if self.engine.is_found(index) {
            let green = base.fg(Color::Green).add_modifier(Modifier::DIM);
            (green, green, BorderType::Rounded)
        } else if index == self.cursor {
            let accent = base.fg(self.accent).add_modifier(Modifier::BOLD);
            (base.add_modifier(Modifier::BOLD), accent, BorderType::Thick)
        } else {
            (base, base, BorderType::Rounded)
        }
    }
}

impl Component for LevelView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [hint_area, _, question_area, _, tiles_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let level = self.engine.level();
        let hints = level
            .pairs
            .iter()
            .map(|p| format!("{} ➜ {}", p.source, p.target))
            .collect::<Vec<_>>()
            .join("   ");
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Center),
            hint_area,
        );

        let question = format!("{}  ❓", level.question.join(" "));
        frame.render_widget(
            Paragraph::new(Line::styled(
                question,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            question_area,
        );

        let labels: Vec<String> = self
            .engine
            .tiles()
            .iter()
            .enumerate()
            .map(|(i, symbol)| tile_label(i, symbol))
            .collect();
        let widest = labels.iter().map(|l| l.width()).max().unwrap_or(0);
        let tile_width = u16::try_from(widest)
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .max(MIN_TILE_WIDTH);

        let (rects, columns) = tile_grid(tiles_area, labels.len(), tile_width);
        for (index, (label, rect)) in labels.iter().zip(&rects).enumerate() {
            let (text_style, border_style, border_type) = self.tile_style(index);
            let tile = Paragraph::new(Line::styled(label.clone(), text_style))
                .alignment(Alignment::Center)
                .block(
                    Block::bordered()
                        .border_type(border_type)
                        .border_style(border_style),
                );
            frame.render_widget(tile, *rect);
        }
        self.hits.tiles = rects;
        self.hits.tile_columns = columns;
    }
}
