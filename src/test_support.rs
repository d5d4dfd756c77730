//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::buffer::Buffer;

use crate::content::{ContentProvider, GenerationError, fallback_session};
use crate::core::model::{Language, Session};
use crate::core::state::App;
use crate::narration::Narrator;

/// Hands out a fixed session without any network call.
pub struct StaticProvider(pub Session);

#[async_trait]
impl ContentProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate_session(&self) -> Result<Session, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Always fails, as an unreachable generator would.
pub struct FailingProvider;

#[async_trait]
impl ContentProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate_session(&self) -> Result<Session, GenerationError> {
        Err(GenerationError::Network("connection refused".to_string()))
    }
}

/// Remembers every utterance instead of playing it.
#[derive(Default)]
pub struct RecordingNarrator {
    pub spoken: Mutex<Vec<(String, Language)>>,
}

impl Narrator for RecordingNarrator {
    fn name(&self) -> &str {
        "recording"
    }

    fn speak(&self, text: &str, language: Language) {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push((text.to_string(), language));
        }
    }
}

fn seeded() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// App with no live generator: Start plays the built-in session.
pub fn test_app() -> App {
    App::new(None, seeded())
}

/// App whose generator returns the built-in session as if it were live.
pub fn live_app() -> App {
    App::new(Some(Arc::new(StaticProvider(fallback_session()))), seeded())
}

/// App whose generator always fails.
pub fn failing_app() -> App {
    App::new(Some(Arc::new(FailingProvider)), seeded())
}

/// Flattens a rendered buffer into one string for `contains` checks.
pub fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
