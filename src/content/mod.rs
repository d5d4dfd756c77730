//! # Content
//!
//! Where sessions come from. A live provider generates one per run; when
//! none is configured, or generation fails in any way, the built-in
//! fallback session is played instead.
//!
//! ```text
//! ContentProvider (trait)
//! └── GeminiProvider   (generateContent + response schema)
//! fallback_session()   (three fixed levels, lion page)
//! ```

pub mod fallback;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use fallback::fallback_session;
pub use provider::{ContentProvider, GenerationError};
pub use providers::GeminiProvider;
