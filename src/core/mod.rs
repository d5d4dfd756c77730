//! # Core Game Logic
//!
//! The matching game itself. It knows nothing about any specific UI
//! technology, speech engine, or network call.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effects
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Narration  │      │  Content   │
//!     │  Adapter   │      │  (speak)   │      │ (generate) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: Session data: theme, levels, coloring, vocabulary
//! - [`level`]: Tile selection rules for one level
//! - [`coloring`]: Free painting of a template page
//! - [`templates`]: The fixed line-art pages
//! - [`state`]: The `App` struct — all game state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration

pub mod action;
pub mod coloring;
pub mod config;
pub mod level;
pub mod model;
pub mod state;
pub mod templates;
