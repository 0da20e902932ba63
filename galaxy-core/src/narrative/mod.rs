//! Narrative service: story dialogue and after-action reports.
//!
//! The service itself may fail in any way it likes. The game only ever talks
//! to it through [`dialogue_or_fallback`] and [`report_or_fallback`], which
//! turn every failure or unusable reply into a canned value.

mod remote;
pub mod fallback;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::dialogue::DialogueLine;
use crate::question::Question;

pub use self::remote::{ClaudeNarrator, NarratorConfig, OfflineNarrator};

/// Point in the story a dialogue is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Opening briefing at the start of a run.
    Start,
    /// A boss has just appeared.
    BossApproach,
    /// Reserved: level cleared. Never requested by the game loop.
    Victory,
    /// Reserved: shields down. Never requested by the game loop.
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "START",
            Phase::BossApproach => "BOSS_APPROACH",
            Phase::Victory => "VICTORY",
            Phase::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Errors from a narrative service.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Claude API error: {0}")]
    Client(#[from] claude::Error),

    #[error("Malformed dialogue: {0}")]
    Malformed(String),

    #[error("Empty response")]
    Empty,

    #[error("Narrator unavailable: {0}")]
    Unavailable(String),

    #[error("No prompt for phase {0}")]
    NoPrompt(Phase),
}

/// Source of story dialogue and debriefs.
#[async_trait]
pub trait NarrativeService: Send + Sync {
    /// Dialogue lines for a story phase, in speaking order.
    async fn fetch_dialogue(
        &self,
        phase: Phase,
        level: u32,
    ) -> Result<Vec<DialogueLine>, NarrativeError>;

    /// A short debrief for a finished run.
    async fn fetch_report(&self, score: u32, mistakes: &[Question])
        -> Result<String, NarrativeError>;
}

/// Fetch dialogue, substituting the phase's canned lines on failure or on
/// an empty reply. Never returns an empty vector.
pub async fn dialogue_or_fallback(
    service: &dyn NarrativeService,
    phase: Phase,
    level: u32,
) -> Vec<DialogueLine> {
    match service.fetch_dialogue(phase, level).await {
        Ok(lines) if !lines.is_empty() => {
            tracing::debug!(%phase, level, lines = lines.len(), "dialogue received");
            lines
        }
        Ok(_) => {
            tracing::warn!(%phase, level, "narrator returned no dialogue, using fallback");
            fallback::dialogue(phase)
        }
        Err(e) => {
            tracing::warn!(%phase, level, error = %e, "dialogue fetch failed, using fallback");
            fallback::dialogue(phase)
        }
    }
}

/// Fetch the after-action report, substituting a canned debrief on failure
/// or on blank text.
pub async fn report_or_fallback(
    service: &dyn NarrativeService,
    score: u32,
    mistakes: &[Question],
) -> String {
    match service.fetch_report(score, mistakes).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!(score, "narrator returned a blank report, using fallback");
            fallback::blank_report(score)
        }
        Err(e) => {
            tracing::warn!(score, error = %e, "report fetch failed, using fallback");
            fallback::failed_report(score)
        }
    }
}

/// Extract dialogue lines from free-form model output.
///
/// Takes everything between the first `[` and the last `]` as a JSON array.
/// Entries that don't describe a valid line are skipped; if the array had
/// entries but none were valid, the reply is malformed.
pub fn parse_dialogue(text: &str) -> Result<Vec<DialogueLine>, NarrativeError> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Err(NarrativeError::Malformed("no JSON array in reply".to_string()));
    };
    if end < start {
        return Err(NarrativeError::Malformed("unbalanced brackets".to_string()));
    }

    let entries: Vec<serde_json::Value> = serde_json::from_str(&text[start..=end])
        .map_err(|e| NarrativeError::Malformed(e.to_string()))?;
    let total = entries.len();

    let lines: Vec<DialogueLine> = entries
        .into_iter()
        .filter_map(|value| serde_json::from_value::<DialogueLine>(value).ok())
        .filter(|line| !line.text.trim().is_empty())
        .collect();

    if total > 0 && lines.is_empty() {
        return Err(NarrativeError::Malformed(format!(
            "none of {total} entries were valid dialogue lines"
        )));
    }
    Ok(lines)
}
