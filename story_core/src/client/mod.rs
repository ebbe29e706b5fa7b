//! Story generation - the seam between the game and the language model.
//!
//! [`StoryGenerator`] is what the session depends on. [`GeminiClient`] is the
//! production implementation: one blocking HTTP call per story step, validated
//! with [`parse_step`](crate::prompt::parse_step), never retried.

mod wire;

pub use wire::*;

use quest_rules::{Difficulty, GameStep};

use crate::config::GeminiConfig;
use crate::error::{ConfigError, StoryError};
use crate::prompt::{parse_step, response_schema, system_instruction, turn_prompt};

/// Produces the next step of the story.
pub trait StoryGenerator {
    /// Ask for the next step.
    ///
    /// `choice` is the action the player picked on the previous step, or
    /// `None` for the opening scene.
    fn next_step(&self, choice: Option<&str>, difficulty: Difficulty)
        -> Result<GameStep, StoryError>;
}

/// Story generator backed by the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
    agent: ureq::Agent,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from configuration, resolving the API key.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, ConfigError> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(api_key, config))
    }

    /// Build a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &GeminiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .build();

        Self {
            api_key: api_key.into(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            agent,
        }
    }

    /// Full URL of the `generateContent` call for the configured model.
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Build the request body for one turn.
    pub fn build_request(
        &self,
        choice: Option<&str>,
        difficulty: Difficulty,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: RequestContent::text(None, system_instruction(difficulty)),
            contents: vec![RequestContent::text(
                Some("user"),
                turn_prompt(choice, difficulty),
            )],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
                temperature: self.temperature,
            },
        }
    }

    fn send(&self, request: &GenerateContentRequest) -> Result<GameStep, StoryError> {
        let response = match self
            .agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .send_json(request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(StoryError::Status { code, body });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(StoryError::Transport(transport.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| StoryError::Transport(e.to_string()))?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = envelope.text().ok_or(StoryError::EmptyResponse)?;

        parse_step(&text)
    }
}

impl StoryGenerator for GeminiClient {
    fn next_step(
        &self,
        choice: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<GameStep, StoryError> {
        tracing::debug!(
            model = %self.model,
            %difficulty,
            opening = choice.is_none(),
            "Requesting story step"
        );

        let request = self.build_request(choice, difficulty);
        match self.send(&request) {
            Ok(step) => {
                tracing::debug!(
                    problem = %step.problem,
                    choices = step.choices.len(),
                    "Received story step"
                );
                Ok(step)
            }
            Err(e) => {
                tracing::error!("Error fetching next story step from Gemini: {}", e);
                Err(e)
            }
        }
    }
}
