//! Runtime configuration, read from the environment.

use std::fmt;
use std::sync::Arc;

use claude::Claude;
use thiserror::Error;

use crate::narrative::{ClaudeNarrator, NarrativeService, NarratorConfig, OfflineNarrator};
use crate::speech::{CommandSpeaker, SilentSpeaker, Speaker};

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Configuration for a game.
#[derive(Clone, Default)]
pub struct GameConfig {
    /// Anthropic API key. Without one the narrator runs offline.
    pub api_key: Option<String>,

    /// Alternative API root for the narrator.
    pub base_url: Option<String>,

    /// Narrator generation settings.
    pub narrator: NarratorConfig,

    /// Text-to-speech command line, e.g. `espeak-ng -v cmn -s 190`.
    pub tts_command: Option<String>,

    /// Seed for question generation. Random when unset.
    pub seed: Option<u64>,
}

impl fmt::Debug for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("narrator", &self.narrator)
            .field("tts_command", &self.tts_command)
            .field("seed", &self.seed)
            .finish()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get("ANTHROPIC_API_KEY");
        config.base_url = get("ANTHROPIC_BASE_URL");
        config.narrator.model = get("GALAXY_MODEL");
        config.tts_command = get("GALAXY_TTS_COMMAND");

        if let Some(raw) = get("GALAXY_MAX_TOKENS") {
            config.narrator.max_tokens = parse_number("GALAXY_MAX_TOKENS", &raw)?;
        }
        if let Some(raw) = get("GALAXY_TEMPERATURE") {
            config.narrator.temperature = Some(parse_number("GALAXY_TEMPERATURE", &raw)?);
        }
        if let Some(raw) = get("GALAXY_SEED") {
            config.seed = Some(parse_number("GALAXY_SEED", &raw)?);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Drop the API key so the narrator runs on canned lines.
    pub fn offline(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tts_command(mut self, command: impl Into<String>) -> Self {
        self.tts_command = Some(command.into());
        self
    }

    /// Whether the narrator will call the API.
    pub fn is_online(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the narrative service this configuration describes.
    pub fn build_narrator(&self) -> Arc<dyn NarrativeService> {
        match &self.api_key {
            Some(key) => {
                let mut client = Claude::new(key.clone());
                if let Some(url) = &self.base_url {
                    client = client.with_base_url(url.clone());
                }
                let narrator = ClaudeNarrator::new(client).with_config(self.narrator.clone());
                tracing::info!(model = narrator.model(), "narrator online");
                Arc::new(narrator)
            }
            None => {
                tracing::warn!("ANTHROPIC_API_KEY not set, narrator running offline");
                Arc::new(OfflineNarrator)
            }
        }
    }

    /// Build the speaker this configuration describes.
    pub fn build_speaker(&self) -> Box<dyn Speaker> {
        match self
            .tts_command
            .as_deref()
            .and_then(CommandSpeaker::from_command_line)
        {
            Some(speaker) => Box::new(speaker),
            None => Box::new(SilentSpeaker),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_is_offline() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert!(!config.is_online());
        assert_eq!(config.narrator.max_tokens, 512);
        assert!(config.tts_command.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = GameConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ANTHROPIC_BASE_URL", "http://localhost:4000/v1"),
            ("GALAXY_MODEL", "claude-3-5-haiku-latest"),
            ("GALAXY_MAX_TOKENS", "256"),
            ("GALAXY_TEMPERATURE", "0.5"),
            ("GALAXY_TTS_COMMAND", "say -v Ting-Ting"),
            ("GALAXY_SEED", "42"),
        ]))
        .unwrap();

        assert!(config.is_online());
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:4000/v1"));
        assert_eq!(config.narrator.model.as_deref(), Some("claude-3-5-haiku-latest"));
        assert_eq!(config.narrator.max_tokens, 256);
        assert_eq!(config.narrator.temperature, Some(0.5));
        assert_eq!(config.tts_command.as_deref(), Some("say -v Ting-Ting"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = GameConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "  ")])).unwrap();
        assert!(!config.is_online());
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = GameConfig::from_lookup(lookup(&[("GALAXY_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("GALAXY_MAX_TOKENS"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GameConfig::new().with_api_key("sk-ant-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-ant-secret"));
        assert!(printed.contains("<redacted>"));

        let offline = format!("{:?}", GameConfig::new());
        assert!(offline.contains("api_key: None"));
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_api_key("k")
            .with_seed(7)
            .with_tts_command("espeak-ng")
            .offline();
        assert!(!config.is_online());
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tts_command.as_deref(), Some("espeak-ng"));
    }
}
