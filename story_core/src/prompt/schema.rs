//! The structured-output schema sent with every story request.

use serde_json::{json, Value};

/// JSON schema (in the Gemini `responseSchema` dialect) for a story step.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "story": {
                "type": "STRING",
                "description": "A short, engaging paragraph of the story. Maximum 100 words."
            },
            "problem": {
                "type": "STRING",
                "description": "A multiplication problem as a string, e.g., '12 * 9'. The complexity should match the requested difficulty."
            },
            "correctAnswer": {
                "type": "NUMBER",
                "description": "The numerical correct answer to the multiplication problem."
            },
            "choices": {
                "type": "ARRAY",
                "description": "An array of 2-3 short, descriptive action choices for the player. If the story is concluding, this can be an empty array.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["story", "problem", "correctAnswer", "choices"]
    })
}
