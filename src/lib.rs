//! Emoji Zoo library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod content;
pub mod core;
pub mod narration;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Where game content comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Live generation when an API key is available, built-in levels otherwise.
    #[default]
    Auto,
    Gemini,
    Builtin,
}

impl ContentSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "gemini" => Some(Self::Gemini),
            "builtin" => Some(Self::Builtin),
            _ => None,
        }
    }
}
