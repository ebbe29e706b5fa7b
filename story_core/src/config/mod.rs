//! Configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration. The API key may also come from the environment.

use quest_rules::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EchoesConfig {
    pub gemini: GeminiConfig,
    pub session: SessionConfig,
}

impl EchoesConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Settings for the Gemini story service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Takes precedence over the environment when set.
    pub api_key: Option<String>,

    pub model: String,

    /// Base URL of the REST API, without a trailing slash.
    pub endpoint: String,

    /// Sampling temperature for story generation.
    pub temperature: f32,

    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.9,
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Find the API key: the configured value first, then the environment.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with a custom
    /// environment lookup.
    pub fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .into_iter()
            .chain(API_KEY_ENV_VARS.into_iter().filter_map(|name| lookup(name)))
            .find(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Settings for the game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long an unlock notification stays visible.
    pub notification_secs: u64,

    pub default_difficulty: Difficulty,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notification_secs: 4,
            default_difficulty: Difficulty::Medium,
        }
    }
}

impl SessionConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}
