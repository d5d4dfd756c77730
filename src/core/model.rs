//! # Session Data Model
//!
//! Passive structures describing one play-through. The JSON shape mirrors what
//! the content generator emits (camelCase keys), so a `Session` deserializes
//! straight from the model's response text.
//!
//! ```text
//! Session
//! ├── theme: Theme              // colors + optional name/mood
//! ├── levels: Vec<Level>        // ordered, non-empty
//! ├── coloring: Coloring        // template for the final activity
//! └── vocabulary: Vec<VocabularyEntry>
//! ```

use std::collections::HashSet;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

/// A single pictographic unit (an emoji).
pub type Symbol = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub background: String,
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_mood: Option<String>,
}

/// A rule hint shown above the question. Never evaluated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pair {
    pub source: Symbol,
    pub target: Symbol,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// 1-based position in the session.
    pub index: u32,
    pub pairs: Vec<Pair>,
    pub question: Vec<Symbol>,
    /// Candidate answers. Generators nest these either as `[["a"], ["b"]]` or
    /// `[["a", "b"]]`; both are flattened before play.
    pub options: Vec<Vec<Symbol>>,
    pub correct: Vec<Symbol>,
    pub voice_over: String,
}

impl Level {
    /// Symbols in `correct` that appear nowhere in `options`.
    /// A non-empty result means the level can never be completed.
    pub fn unreachable_answers(&self) -> Vec<&str> {
        let offered: HashSet<&str> = self.options.iter().flatten().map(String::as_str).collect();
        self.correct
            .iter()
            .map(String::as_str)
            .filter(|s| !offered.contains(s))
            .collect()
    }

    fn symbols(&self) -> impl Iterator<Item = &str> {
        self.pairs
            .iter()
            .flat_map(|p| [p.source.as_str(), p.target.as_str()])
            .chain(self.question.iter().map(String::as_str))
            .chain(self.options.iter().flatten().map(String::as_str))
            .chain(self.correct.iter().map(String::as_str))
    }
}

/// Identifier of a built-in coloring template.
///
/// Deserialization is lenient: anything outside the known set resolves to
/// `Fish`, matching how the template lookup treats unknown ids.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateId {
    #[default]
    Fish,
    Lion,
    Bird,
    Cat,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Fish,
        TemplateId::Lion,
        TemplateId::Bird,
        TemplateId::Cat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Fish => "fish",
            TemplateId::Lion => "lion",
            TemplateId::Bird => "bird",
            TemplateId::Cat => "cat",
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "fish" => TemplateId::Fish,
            "lion" => TemplateId::Lion,
            "bird" => TemplateId::Bird,
            "cat" => TemplateId::Cat,
            other => {
                warn!("Unknown coloring template '{}', using fish", other);
                TemplateId::Fish
            }
        }
    }
}

impl From<String> for TemplateId {
    fn from(id: String) -> Self {
        TemplateId::from_id(&id)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coloring {
    pub template_id: TemplateId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    pub emoji: Symbol,
    pub english: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub theme: Theme,
    pub levels: Vec<Level>,
    pub coloring: Coloring,
    pub vocabulary: Vec<VocabularyEntry>,
}

/// Symbols generated content must never contain (pig, boar, pig nose).
pub const FORBIDDEN_SYMBOLS: [&str; 3] = ["\u{1F437}", "\u{1F416}", "\u{1F43D}"];

/// Number of distinct vocabulary entries a generated session should carry.
pub const VOCABULARY_SIZE: usize = 6;

impl Session {
    /// Hard checks: a session failing these cannot be played as delivered.
    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("session has no levels".to_string());
        }
        let forbidden = self
            .levels
            .iter()
            .flat_map(Level::symbols)
            .chain(self.vocabulary.iter().map(|v| v.emoji.as_str()))
            .find(|s| FORBIDDEN_SYMBOLS.iter().any(|f| s.contains(f)));
        if let Some(symbol) = forbidden {
            return Err(format!("forbidden symbol {symbol} in session"));
        }
        Ok(())
    }

    /// Soft checks: logged, never blocking. Returns the number of issues found.
    pub fn log_consistency_warnings(&self) -> usize {
        let mut issues = 0;
        for level in &self.levels {
            let missing = level.unreachable_answers();
            if !missing.is_empty() {
                warn!(
                    "Level {} is unsolvable: correct symbols {:?} are not among the options",
                    level.index, missing
                );
                issues += 1;
            }
            if level.correct.is_empty() {
                warn!("Level {} has no correct symbols", level.index);
                issues += 1;
            }
        }
        let distinct: HashSet<&str> = self.vocabulary.iter().map(|v| v.emoji.as_str()).collect();
        if distinct.len() != VOCABULARY_SIZE || self.vocabulary.len() != VOCABULARY_SIZE {
            warn!(
                "Vocabulary has {} entries ({} distinct), expected {}",
                self.vocabulary.len(),
                distinct.len(),
                VOCABULARY_SIZE
            );
            issues += 1;
        }
        issues
    }
}

/// An RGB color parsed from the `#RRGGBB` strings used by themes and palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#RRGGBB` or `RRGGBB`. Shorthand and named colors are rejected.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Language hint passed to the speech capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Turkish,
    English,
}

impl Language {
    /// BCP 47 tag.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Turkish => "tr-TR",
            Language::English => "en-US",
        }
    }

    /// Voice name understood by espeak-style synthesizers.
    pub fn voice(self) -> &'static str {
        match self {
            Language::Turkish => "tr",
            Language::English => "en-us",
        }
    }
}
