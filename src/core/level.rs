//! # Level Engine
//!
//! Tracks one active level: which correct symbols have been found and which
//! tile (if any) is flashing as wrong. The engine only decides outcomes;
//! narration and delays are turned into effects by `action::update`.
//!
//! ```text
//!            select(tile)
//!   ┌──────────────┼───────────────────┐
//!   ▼              ▼                   ▼
//! Ignored     Correct ⊆ answers     Wrong
//!             ├─ all found → Solved   └─ wrong = tile (until ClearWrong)
//!             └─ else      → Progress
//! ```

use std::collections::HashSet;
use std::time::Duration;

use crate::core::model::{Level, Symbol};

/// Pause between the success narration and moving on.
pub const SUCCESS_DELAY: Duration = Duration::from_millis(1500);
/// How long a wrong tile stays marked (and input stays blocked).
pub const WRONG_DELAY: Duration = Duration::from_millis(1000);

pub const SOLVED_PHRASE: &str = "Harika!";
pub const PROGRESS_PHRASE: &str = "Evet!";
pub const WRONG_PHRASE: &str = "Tekrar dene!";

/// Result of a single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Input blocked or redundant. No state change.
    Ignored,
    /// Correct, but more correct symbols remain.
    Progress,
    /// Correct, and every correct symbol is now found.
    Solved,
    /// Not a subset of the correct set; the tile is now marked wrong.
    Wrong,
}

/// Flattens nested option groups into selectable tiles.
/// Order is preserved and duplicates are kept.
pub fn flatten_options(options: &[Vec<Symbol>]) -> Vec<Symbol> {
    options.iter().flatten().cloned().collect()
}

#[derive(Debug, Clone)]
pub struct LevelEngine {
    level: Level,
    tiles: Vec<Symbol>,
    correct: HashSet<Symbol>,
    found: HashSet<Symbol>,
    wrong: Option<usize>,
    solved: bool,
}

impl LevelEngine {
    /// Mounts a level with empty `found` and no wrong tile.
    pub fn new(level: Level) -> Self {
        let tiles = flatten_options(&level.options);
        let correct = level.correct.iter().cloned().collect();
        Self {
            level,
            tiles,
            correct,
            found: HashSet::new(),
            wrong: None,
            solved: false,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tiles(&self) -> &[Symbol] {
        &self.tiles
    }

    pub fn found(&self) -> &HashSet<Symbol> {
        &self.found
    }

    /// Index of the tile currently marked wrong.
    pub fn wrong(&self) -> Option<usize> {
        self.wrong
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_found(&self, tile: usize) -> bool {
        self.tiles.get(tile).is_some_and(|s| self.found.contains(s))
    }

    pub fn select(&mut self, tile: usize) -> Selection {
        if self.wrong.is_some() || self.solved {
            return Selection::Ignored;
        }
        let Some(symbol) = self.tiles.get(tile) else {
            return Selection::Ignored;
        };
        if self.found.contains(symbol) {
            return Selection::Ignored;
        }

        if !self.correct.contains(symbol) {
            self.wrong = Some(tile);
            return Selection::Wrong;
        }

        self.found.insert(symbol.clone());
        // Set sizes, so duplicated answers in the data don't block completion
        if self.found.len() == self.correct.len() {
            self.solved = true;
            Selection::Solved
        } else {
            Selection::Progress
        }
    }

    /// Re-enables input after a wrong selection. `found` is untouched.
    pub fn clear_wrong(&mut self) {
        self.wrong = None;
    }
}
