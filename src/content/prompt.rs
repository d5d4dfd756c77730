//! The fixed generation request: prompt text plus the structured-output schema.

use serde_json::{Value, json};

pub const GENERATION_PROMPT: &str = r##"
You are an expert Game Designer for Turkish pre-school children (ages 5-6).

**STRICT RULES:**
1. **THEME:** MUST be ANIMAL based (Zoo, Forest, Farm).
2. **NO TEXT UI:** Use EMOJIS ONLY.
3. **NO PIGS:** Do NOT use the pig emoji (🐷, 🐖, 🐽).
4. **LOGIC CONSISTENCY:** Correct answers must always be in options.

**CONTENT REQUIREMENTS:**
1. **Levels:** Generate 3 levels of logic puzzles using ANIMALS.
2. **Coloring:** Select a templateId from ['fish', 'lion', 'bird', 'cat'].
3. **Vocabulary (CRITICAL):** Provide a list of EXACTLY 6 DISTINCT ANIMAL EMOJIS with their English names for the final screen.

**JSON OUTPUT FORMAT:**
{
  "theme": { "background": "#F0FFF4", "primary": "#4ADE80" },
  "levels": [
    {
      "index": 1,
      "pairs": [ {"source": "🦁", "target": "🟥"} ],
      "question": ["🦁"],
      "options": [ ["🟥"], ["🔵"] ],
      "correct": ["🟥"],
      "voiceOver": "Aslan kırmızı kare."
    }
  ],
  "coloring": {
    "templateId": "fish"
  },
  "vocabulary": [
    { "emoji": "🦁", "english": "Lion" },
    { "emoji": "🐱", "english": "Cat" },
    { "emoji": "🐶", "english": "Dog" },
    { "emoji": "🐘", "english": "Elephant" },
    { "emoji": "🦅", "english": "Eagle" },
    { "emoji": "🐸", "english": "Frog" }
  ]
}
"##;

/// Structured-output schema in the generator's OpenAPI subset (uppercase type names).
pub fn response_schema() -> Value {
    let string = json!({ "type": "STRING" });
    let string_array = json!({ "type": "ARRAY", "items": string });

    json!({
        "type": "OBJECT",
        "properties": {
            "theme": {
                "type": "OBJECT",
                "properties": {
                    "name": string,
                    "background": string,
                    "primary": string,
                    "musicMood": string
                },
                "required": ["background", "primary"]
            },
            "levels": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "index": { "type": "INTEGER" },
                        "pairs": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": { "source": string, "target": string },
                                "required": ["source", "target"]
                            }
                        },
                        "question": string_array,
                        "options": { "type": "ARRAY", "items": string_array },
                        "correct": string_array,
                        "voiceOver": string
                    },
                    "required": ["index", "pairs", "question", "options", "correct", "voiceOver"]
                }
            },
            "coloring": {
                "type": "OBJECT",
                "properties": {
                    "templateId": { "type": "STRING", "enum": ["fish", "lion", "bird", "cat"] }
                },
                "required": ["templateId"]
            },
            "vocabulary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": { "emoji": string, "english": string },
                    "required": ["emoji", "english"]
                }
            }
        },
        "required": ["theme", "levels", "coloring", "vocabulary"]
    })
}
