//! Prompts sent to the language model.

use super::Phase;
use crate::question::Question;

/// System prompt shared by every request.
pub const SYSTEM_PROMPT: &str = "You write dialogue for a children's space arcade game \
that drills multiplication up to 19 x 19. Keep every line short, vivid and \
encouraging. Always answer in Simplified Chinese.";

const FORMAT_RULES: &str = "Reply with ONLY a JSON array of objects \
{ \"characterId\": ..., \"text\": \"Chinese text\", \"mood\": \"neutral\"|\"happy\"|\"angry\"|\"worried\" }. \
The mood field is optional.";

/// Prompt for a story phase, or `None` if the phase has no script.
pub fn dialogue_prompt(phase: Phase, level: u32) -> Option<String> {
    let body = match phase {
        Phase::Start => "Create a short dialogue (2-3 lines) for the game intro.\n\
             Characters:\n\
             1. 'nova' (Commander): welcomes the cadet (the player). Serious.\n\
             2. 'sparky' (Robot): excited about the 19x19 engine.\n\
             characterId must be \"nova\" or \"sparky\"."
            .to_string(),
        Phase::BossApproach => format!(
            "Create a short dialogue (2 lines) for a boss fight (level {level}).\n\
             Characters:\n\
             1. 'chaos' (Villain): taunts the player about multiplication being hard.\n\
             2. 'nova' (Commander): tells the player to focus.\n\
             characterId must be \"chaos\" or \"nova\"."
        ),
        Phase::Victory => format!(
            "Create a dialogue (2 lines) for clearing level {level}.\n\
             1. 'sparky': cheering.\n\
             2. 'nova': good job.\n\
             characterId must be \"sparky\" or \"nova\"."
        ),
        Phase::GameOver => return None,
    };
    Some(format!("{body}\n{FORMAT_RULES}"))
}

/// Mistakes formatted the way the debrief prompt lists them.
pub fn format_mistakes(mistakes: &[Question]) -> String {
    mistakes
        .iter()
        .map(|m| format!("{} x {} = {}", m.factor_a, m.factor_b, m.answer))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt for the after-action report.
pub fn report_prompt(score: u32, mistakes: &[Question]) -> String {
    format!(
        "You are 'nova' (Commander). Debrief a student.\n\
         Score: {score}.\n\
         Mistakes: [{}].\n\
         Briefly explain one mistake if there are any. Encouraging tone.\n\
         Plain text, at most 2 sentences.",
        format_mistakes(mistakes)
    )
}
