//! The built-in session played whenever live generation is unavailable or fails.

use crate::core::model::{Coloring, Level, Pair, Session, TemplateId, Theme, VocabularyEntry};

fn symbols(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pair(source: &str, target: &str) -> Pair {
    Pair {
        source: source.to_string(),
        target: target.to_string(),
    }
}

fn word(emoji: &str, english: &str) -> VocabularyEntry {
    VocabularyEntry {
        emoji: emoji.to_string(),
        english: english.to_string(),
    }
}

/// Three animal/food levels ending in the lion coloring page.
pub fn fallback_session() -> Session {
    Session {
        theme: Theme {
            name: None,
            background: "#F0FFF4".to_string(),
            primary: "#4ADE80".to_string(),
            music_mood: None,
        },
        levels: vec![
            Level {
                index: 1,
                // Lion eats meat, rabbit eats carrot
                pairs: vec![pair("🦁", "🥩"), pair("🐰", "🥕")],
                question: symbols(&["🦁"]),
                options: vec![symbols(&["🥩"]), symbols(&["🥕"])],
                correct: symbols(&["🥩"]),
                voice_over: "Aslan acıkmış. Aslan ne yer?".to_string(),
            },
            Level {
                index: 2,
                pairs: vec![pair("🐸", "🪰"), pair("🐵", "🍌"), pair("🐱", "🥛")],
                question: symbols(&["🐸", "🐵"]),
                options: vec![symbols(&["🪰", "🍌"]), symbols(&["🥛", "🦴"])],
                correct: symbols(&["🪰", "🍌"]),
                voice_over: "Kurbağa ve maymun ne ister?".to_string(),
            },
            Level {
                index: 3,
                pairs: vec![pair("🐶", "🦴"), pair("🦁", "🥩"), pair("🐰", "🥬")],
                question: symbols(&["🐶", "🦁"]),
                options: vec![symbols(&["🦴", "🥩"]), symbols(&["🥬", "🍎"])],
                correct: symbols(&["🦴", "🥩"]),
                voice_over: "Köpek ve aslan nerede?".to_string(),
            },
        ],
        coloring: Coloring {
            template_id: TemplateId::Lion,
        },
        vocabulary: vec![
            word("🦁", "Lion"),
            word("🐰", "Rabbit"),
            word("🐸", "Frog"),
            word("🐵", "Monkey"),
            word("🐱", "Cat"),
            word("🐶", "Dog"),
        ],
    }
}
