//! Configuration for the coaching engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::engine::errors::{CoachError, CoachResult};

/// Environment variable holding the completion backend API key.
pub const API_KEY_ENV: &str = "FITLIFE_OPENAI_API_KEY";

/// Placeholder values that must never reach the backend.
const PLACEHOLDER_KEYS: [&str; 2] = ["your-openai-api-key-here", "your-openai-api-key"];

/// Top-level configuration for the coaching engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Completion backend settings.
    pub completion: CompletionConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Behavioral thresholds.
    pub behavior: BehaviorConfig,
    /// Optional fixed seed for message/video selection (deterministic tests).
    pub rng_seed: Option<u64>,
}

impl CoachConfig {
    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> CoachResult<()> {
        Url::parse(&self.completion.base_url)?;

        if let Some(key) = &self.completion.api_key {
            if PLACEHOLDER_KEYS.contains(&key.trim()) {
                return Err(CoachError::InvalidConfig(
                    "completion.api_key is a placeholder value".to_string(),
                ));
            }
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(CoachError::InvalidConfig(
                "completion.temperature must be within [0, 2]".to_string(),
            ));
        }

        if self.completion.max_output_tokens == 0 {
            return Err(CoachError::InvalidConfig(
                "completion.max_output_tokens must be > 0".to_string(),
            ));
        }

        if self.completion.timeout_seconds == 0 {
            return Err(CoachError::InvalidConfig(
                "completion.timeout_seconds must be > 0".to_string(),
            ));
        }

        if self.behavior.checkin_after_hours == 0 {
            return Err(CoachError::InvalidConfig(
                "behavior.checkin_after_hours must be > 0".to_string(),
            ));
        }

        if self.behavior.prompt_cooldown_seconds == 0 {
            return Err(CoachError::InvalidConfig(
                "behavior.prompt_cooldown_seconds must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Completion backend settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key; read from `FITLIFE_OPENAI_API_KEY` by default.
    pub api_key: Option<String>,
    /// Responses API endpoint.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Output token cap per reply.
    pub max_output_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            base_url: "https://api.openai.com/v1/responses".to_string(),
            model: "gpt-4.1".to_string(),
            temperature: 0.7,
            max_output_tokens: 400,
            timeout_seconds: 30,
        }
    }
}

/// Storage configuration for profile data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `SQLite` database path.
    pub sqlite_path: PathBuf,
    /// Profile table name.
    pub profile_table: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("coach.sqlite"),
            profile_table: "user_profiles".to_string(),
        }
    }
}

/// Behavioral thresholds used by the turn pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Hours of chat silence before a check-in reminder is generated.
    pub checkin_after_hours: i64,
    /// Follow-up window after an inactivity prompt, in seconds.
    pub prompt_cooldown_seconds: i64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            checkin_after_hours: 24,
            prompt_cooldown_seconds: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn placeholder_key_is_rejected() {
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("your-openai-api-key-here".to_string());
        assert!(matches!(
            config.validate(),
            Err(CoachError::InvalidConfig(_))
        ));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = CoachConfig::default();
        config.completion.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = CoachConfig::default();
        config.completion.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}
