//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Every component is props-based: it receives the core data it shows as
//! struct fields and renders into a `Rect`. Components with clickable parts
//! also receive `&mut HitMap` and record where those parts landed, so the
//! event loop can resolve mouse clicks against the frame the player saw.
//!
//! ```rust,ignore
//! LevelView { engine, cursor, accent, hits: &mut tui.hits }.render(frame, body);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── header.rs         (title, progress dots, narration caption)
//! ├── menu.rs           (start screen and loading spinner)
//! ├── level_view.rs     (hints, question, option tiles)
//! └── coloring_view.rs  (canvas page, vocabulary recap, restart)
//! ```

pub mod coloring_view;
pub mod header;
pub mod level_view;
pub mod menu;

pub use coloring_view::ColoringView;
pub use header::Header;
pub use level_view::LevelView;
pub use menu::{LoadingPage, MenuPage};
