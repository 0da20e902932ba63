//! Narrators backed by the Claude API, plus an offline stand-in.

use async_trait::async_trait;
use claude::{Claude, Request};

use super::{parse_dialogue, prompts, NarrativeError, NarrativeService, Phase};
use crate::dialogue::DialogueLine;
use crate::question::Question;

/// Generation settings for the narrator.
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// Model override (defaults to the client's model).
    pub model: Option<String>,

    /// Maximum tokens per reply.
    pub max_tokens: usize,

    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 512,
            temperature: Some(0.9),
        }
    }
}

/// Narrator that asks Claude for dialogue and debriefs.
pub struct ClaudeNarrator {
    client: Claude,
    config: NarratorConfig,
}

impl ClaudeNarrator {
    pub fn new(client: Claude) -> Self {
        Self {
            client,
            config: NarratorConfig::default(),
        }
    }

    /// Create a narrator from the ANTHROPIC_API_KEY environment variable.
    pub fn from_env() -> Result<Self, NarrativeError> {
        Ok(Self::new(Claude::from_env()?))
    }

    pub fn with_config(mut self, config: NarratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Model the narrator asks for.
    pub fn model(&self) -> &str {
        self.config.model.as_deref().unwrap_or_else(|| self.client.model())
    }

    fn request(&self, prompt: String) -> Request {
        let mut request = Request::prompt(prompt)
            .with_system(prompts::SYSTEM_PROMPT)
            .with_max_tokens(self.config.max_tokens);
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }
}

#[async_trait]
impl NarrativeService for ClaudeNarrator {
    async fn fetch_dialogue(
        &self,
        phase: Phase,
        level: u32,
    ) -> Result<Vec<DialogueLine>, NarrativeError> {
        let prompt = prompts::dialogue_prompt(phase, level).ok_or(NarrativeError::NoPrompt(phase))?;
        tracing::debug!(model = self.model(), %phase, level, "requesting dialogue");
        let text = self.client.complete_text(self.request(prompt)).await?;
        if text.trim().is_empty() {
            return Err(NarrativeError::Empty);
        }
        parse_dialogue(&text)
    }

    async fn fetch_report(
        &self,
        score: u32,
        mistakes: &[Question],
    ) -> Result<String, NarrativeError> {
        let prompt = prompts::report_prompt(score, mistakes);
        tracing::debug!(model = self.model(), score, mistakes = mistakes.len(), "requesting report");
        let text = self.client.complete_text(self.request(prompt)).await?;
        Ok(text)
    }
}

/// Narrator used when no API key is configured. Every request fails, so the
/// game runs entirely on canned narrative.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineNarrator;

#[async_trait]
impl NarrativeService for OfflineNarrator {
    async fn fetch_dialogue(
        &self,
        _phase: Phase,
        _level: u32,
    ) -> Result<Vec<DialogueLine>, NarrativeError> {
        Err(NarrativeError::Unavailable("offline".to_string()))
    }

    async fn fetch_report(
        &self,
        _score: u32,
        _mistakes: &[Question],
    ) -> Result<String, NarrativeError> {
        Err(NarrativeError::Unavailable("offline".to_string()))
    }
}
