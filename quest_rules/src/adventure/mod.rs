//! Adventure model: difficulty tiers, story steps, and the quest identifier.

mod answer;

pub use answer::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for one playthrough of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestId(pub Uuid);

impl QuestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How hard the multiplication puzzles are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase identifier, as used in config files and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Short operand-size label for the difficulty picker.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "1-digit × 1-digit",
            Difficulty::Medium => "2-digit × 1-digit",
            Difficulty::Hard => "2-digit × 2-digit",
        }
    }

    /// How the tier is described to the language model.
    pub fn prompt_description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy 1-digit by 1-digit multiplication (e.g., 7 * 8)",
            Difficulty::Medium => "medium 2-digit by 1-digit multiplication (e.g., 15 * 8)",
            Difficulty::Hard => "challenging 2-digit by 2-digit multiplication (e.g., 23 * 14)",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}'")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// One step of the story: a scene, its puzzle, and what the player can do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStep {
    /// Short story paragraph leading into the puzzle.
    pub story: String,

    /// The multiplication problem, e.g. `"12 * 9"`.
    pub problem: String,

    pub correct_answer: f64,

    /// Actions offered to the player. Empty when the story has concluded.
    pub choices: Vec<String>,
}

impl GameStep {
    /// Whether this step ends the adventure.
    pub fn is_conclusion(&self) -> bool {
        self.choices.is_empty()
    }

    /// Whether `choice` is one of the offered actions.
    pub fn offers(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// Check a player's typed answer against this step's puzzle.
    pub fn is_correct(&self, input: &str) -> bool {
        check_answer(input, self.correct_answer)
    }
}
