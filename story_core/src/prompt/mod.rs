//! Prompt construction and reply validation for the story model.
//!
//! Each turn sends three things:
//! 1. **System instruction**: who the model is and the rules it must follow
//! 2. **Turn prompt**: the opening scene, or the player's last choice
//! 3. **Response schema**: the JSON shape every reply must have
//!
//! The reply text is then validated into a [`GameStep`] by [`parse_step`].

mod schema;

pub use schema::*;

use quest_rules::{Difficulty, GameStep};

use crate::error::StoryError;

/// The game-master instruction for a given puzzle difficulty.
pub fn system_instruction(difficulty: Difficulty) -> String {
    format!(
        "You are a creative and fun game master designing a text-based adventure game for students in 5th and 6th grade (ages 10-13). \
The game's theme is a magical fantasy world called 'Aethelgard'. \
Your primary goal is to help them practice multiplication in an exciting way.\n\
\n\
RULES:\n\
1.  Each turn, you will generate a short story segment (max 100 words), a multiplication problem, the correct answer, and 2-3 choices for the player.\n\
2.  The story must be engaging, age-appropriate, and lead into the math problem naturally. The problem should feel like a puzzle to solve to progress.\n\
3.  The multiplication problems must be {}.\n\
4.  The player's choices should directly influence the next part of the story.\n\
5.  If a player's choice leads to a natural conclusion (e.g., they find the treasure, defeat the dragon), make the story a concluding paragraph and provide an empty array for the choices.\n\
6.  You must always respond in the specified JSON format.",
        difficulty.prompt_description()
    )
}

/// The user prompt for one turn.
///
/// Without a choice this asks for the opening scene; with one it asks the
/// model to continue from it.
pub fn turn_prompt(choice: Option<&str>, difficulty: Difficulty) -> String {
    match choice {
        Some(choice) => format!(
            "The player chose to: \"{}\". Continue the story from there.",
            choice
        ),
        None => format!(
            "Start the game with an exciting opening scene in the Whispering Woods of Aethelgard. The difficulty is set to {}.",
            difficulty
        ),
    }
}

/// Validate the model's reply text into a story step.
///
/// Surrounding whitespace is ignored. All four fields must be present with
/// the right types; unknown extra fields are tolerated.
pub fn parse_step(text: &str) -> Result<GameStep, StoryError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoryError::EmptyResponse);
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_mentions_difficulty() {
        let easy = system_instruction(Difficulty::Easy);
        assert!(easy.contains("Aethelgard"));
        assert!(easy.contains("must be easy 1-digit by 1-digit multiplication (e.g., 7 * 8)."));

        let hard = system_instruction(Difficulty::Hard);
        assert!(hard.contains("challenging 2-digit by 2-digit"));
        assert!(hard.contains("6.  You must always respond in the specified JSON format."));
    }

    #[test]
    fn test_opening_prompt() {
        let prompt = turn_prompt(None, Difficulty::Medium);
        assert!(prompt.contains("Whispering Woods"));
        assert!(prompt.ends_with("The difficulty is set to medium."));
    }

    #[test]
    fn test_choice_prompt() {
        let prompt = turn_prompt(Some("Follow the glowing fox"), Difficulty::Hard);
        assert_eq!(
            prompt,
            "The player chose to: \"Follow the glowing fox\". Continue the story from there."
        );
    }

    #[test]
    fn test_parse_step() {
        let step = parse_step(
            r#"
            {
                "story": "A river blocks your path.",
                "problem": "12 * 9",
                "correctAnswer": 108,
                "choices": ["Build a raft", "Search for a bridge"],
                "mood": "tense"
            }
            "#,
        )
        .unwrap();

        assert_eq!(step.problem, "12 * 9");
        assert_eq!(step.correct_answer, 108.0);
        assert_eq!(step.choices.len(), 2);
        assert!(step.is_correct("108"));
    }

    #[test]
    fn test_parse_concluding_step() {
        let step = parse_step(
            r#"{"story": "The dragon sleeps.", "problem": "3 * 4", "correctAnswer": 12, "choices": []}"#,
        )
        .unwrap();
        assert!(step.is_conclusion());
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        let missing_answer = r#"{"story": "s", "problem": "2 * 2", "choices": []}"#;
        assert!(matches!(
            parse_step(missing_answer),
            Err(StoryError::InvalidStep(_))
        ));

        let string_answer = r#"{"story": "s", "problem": "2 * 2", "correctAnswer": "4", "choices": []}"#;
        assert!(matches!(
            parse_step(string_answer),
            Err(StoryError::InvalidStep(_))
        ));

        let choices_not_array = r#"{"story": "s", "problem": "2 * 2", "correctAnswer": 4, "choices": "run"}"#;
        assert!(matches!(
            parse_step(choices_not_array),
            Err(StoryError::InvalidStep(_))
        ));

        assert!(matches!(parse_step("not json"), Err(StoryError::InvalidStep(_))));
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(matches!(parse_step("  \n"), Err(StoryError::EmptyResponse)));
    }
}
