//! # Application State
//!
//! Core game state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Option<Arc<dyn ContentProvider>>  // live generator, if configured
//! ├── stage: Stage                   // Menu / Loading / Playing(i) / Coloring
//! ├── session: Option<Session>       // current play-through
//! ├── origin: Option<SessionOrigin>  // live or fallback content
//! ├── level: Option<LevelEngine>     // active level (Playing only)
//! ├── coloring: Option<ColoringActivity> // active page (Coloring only)
//! ├── epoch: u64                     // bumps on every level mount / restart
//! ├── caption: Option<String>        // last narrated line
//! ├── run_id: Option<String>         // log correlation for one play-through
//! └── rng: StdRng                    // coloring color source
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::content::ContentProvider;
use crate::core::coloring::ColoringActivity;
use crate::core::level::LevelEngine;
use crate::core::model::Session;

/// Top-level stage of the game. There is deliberately no error stage:
/// generation failures resolve into the fallback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Menu,
    Loading,
    /// Zero-based index of the active level.
    Playing(usize),
    Coloring,
}

/// Where the current session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Live,
    Fallback,
}

pub struct App {
    pub provider: Option<Arc<dyn ContentProvider>>,
    pub stage: Stage,
    pub session: Option<Session>,
    pub origin: Option<SessionOrigin>,
    pub level: Option<LevelEngine>,
    pub coloring: Option<ColoringActivity>,
    /// Timers started under an older epoch are stale and get ignored.
    pub epoch: u64,
    pub caption: Option<String>,
    pub run_id: Option<String>,
    pub rng: StdRng,
}

impl App {
    pub fn new(provider: Option<Arc<dyn ContentProvider>>, rng: StdRng) -> Self {
        Self {
            provider,
            stage: Stage::Menu,
            session: None,
            origin: None,
            level: None,
            coloring: None,
            epoch: 0,
            caption: None,
            run_id: None,
            rng,
        }
    }

    pub fn has_live_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Number of levels in the current session (0 outside a run).
    pub fn level_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.levels.len())
    }
}
