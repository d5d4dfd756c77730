//! # Narration
//!
//! Fire-and-forget speech. The game never waits for an utterance to finish
//! and never learns whether it was heard; a new utterance cuts off the
//! previous one.
//!
//! ```text
//! Effect::Speak ──▶ Narrator::speak(text, language)
//!                       ├── CommandNarrator  (espeak-ng or any TTS CLI)
//!                       └── SilentNarrator   (--mute: log only)
//! ```

mod command;

pub use command::{CommandNarrator, render_args};

use std::sync::Arc;

use log::info;

use crate::core::config::NarrationSettings;
use crate::core::model::Language;

pub trait Narrator: Send + Sync {
    fn name(&self) -> &str;

    /// Best-effort: failures are logged, never returned.
    fn speak(&self, text: &str, language: Language);
}

/// Logs utterances instead of playing them.
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn name(&self) -> &str {
        "silent"
    }

    fn speak(&self, text: &str, language: Language) {
        info!("Narration [{}] (muted): {}", language.tag(), text);
    }
}

pub fn build_narrator(settings: &NarrationSettings) -> Arc<dyn Narrator> {
    if settings.enabled {
        info!("Narration through '{}'", settings.command);
        Arc::new(CommandNarrator::new(
            settings.command.clone(),
            settings.args.clone(),
        ))
    } else {
        info!("Narration muted");
        Arc::new(SilentNarrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_narration_args;

    #[test]
    fn test_build_narrator_respects_enabled_flag() {
        let mut settings = NarrationSettings {
            enabled: false,
            command: "espeak-ng".to_string(),
            args: default_narration_args(),
        };
        assert_eq!(build_narrator(&settings).name(), "silent");

        settings.enabled = true;
        assert_eq!(build_narrator(&settings).name(), "espeak-ng");
    }

    #[test]
    fn test_silent_narrator_accepts_any_text() {
        SilentNarrator.speak("Harika!", Language::Turkish);
        SilentNarrator.speak("", Language::English);
    }
}
