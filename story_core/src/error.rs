//! Error types for story generation, configuration, and session events.

use thiserror::Error;

use crate::session::Phase;

/// The single message shown to the player when a story step cannot be produced.
pub const STORY_FAILURE_MESSAGE: &str =
    "Failed to generate the next step of the adventure. The magic may be unstable.";

/// Everything that can go wrong while asking the model for the next step.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("request to the story service failed: {0}")]
    Transport(String),

    #[error("story service answered with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("story service returned no text")]
    EmptyResponse,

    #[error("story step did not match the expected shape: {0}")]
    InvalidStep(#[from] serde_json::Error),
}

impl StoryError {
    /// The message the player sees. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        STORY_FAILURE_MESSAGE
    }
}

/// Problems loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no API key configured; set gemini.api_key, GEMINI_API_KEY, or API_KEY")]
    MissingApiKey,
}

/// Player events that do not fit the current state of the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while the game is {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },

    #[error("the puzzle must be solved before choosing a path")]
    PuzzleUnsolved,

    #[error("the puzzle has already been solved")]
    AlreadySolved,

    #[error("'{0}' is not one of the offered choices")]
    UnknownChoice(String),
}
