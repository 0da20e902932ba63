//! The authoritative game state record.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::dialogue::DialogueLine;
use crate::question::Question;

/// Shield strength at the start of a run.
pub const MAX_HEALTH: u32 = 100;
/// Shield lost per wrong answer.
pub const WRONG_ANSWER_DAMAGE: u32 = 20;
/// Points for any correct answer, before the combo bonus.
pub const BASE_SCORE: u32 = 10;
/// Extra points per combo step.
pub const COMBO_BONUS: u32 = 2;
/// Bonus for destroying an enemy.
pub const KILL_BONUS: u32 = 50;

/// Top-level screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    Menu,
    StoryDialogue,
    Playing,
    GameOver,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Menu => "MENU",
            GameMode::StoryDialogue => "STORY_DIALOGUE",
            GameMode::Playing => "PLAYING",
            GameMode::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Everything the presentation layer renders about a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub score: u32,
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
    /// Every submitted answer since the run started, oldest first.
    pub questions_answered: Vec<Question>,
    pub current_question: Option<Question>,
    /// Consecutive correct answers.
    pub combo: u32,
    /// After-action report; only filled once the run is over.
    pub mission_briefing: String,
    pub current_dialogue: Option<DialogueLine>,
    pub dialogue_queue: VecDeque<DialogueLine>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            mode: GameMode::Menu,
            score: 0,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            level: 1,
            questions_answered: Vec::new(),
            current_question: None,
            combo: 0,
            mission_briefing: String::new(),
            current_dialogue: None,
            dialogue_queue: VecDeque::new(),
        }
    }
}

impl GameState {
    /// The menu state shown before any run.
    pub fn new() -> Self {
        Self::default()
    }

    /// A brand-new run at level 1 with the given opening question.
    ///
    /// The mode is left at `Menu`; the opening dialogue moves it on.
    pub fn fresh_run(first_question: Question) -> Self {
        Self {
            current_question: Some(first_question),
            ..Self::default()
        }
    }

    /// Score awarded for a correct answer at the current combo.
    pub fn score_gain(&self) -> u32 {
        BASE_SCORE + self.combo * COMBO_BONUS
    }

    /// Shield as a fraction of the maximum.
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    /// Answers that were wrong, in the order they were given.
    pub fn mistakes(&self) -> Vec<Question> {
        self.questions_answered
            .iter()
            .filter(|q| q.is_mistake())
            .cloned()
            .collect()
    }

    /// Check the structural invariants. Returns a description of the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.health > self.max_health {
            return Err(format!(
                "health {} exceeds max {}",
                self.health, self.max_health
            ));
        }
        if self.health == 0 && self.mode != GameMode::GameOver {
            return Err(format!("health is 0 but mode is {}", self.mode));
        }
        let in_dialogue = self.mode == GameMode::StoryDialogue;
        if in_dialogue != self.current_dialogue.is_some() {
            return Err(format!(
                "mode {} with current dialogue present = {}",
                self.mode,
                self.current_dialogue.is_some()
            ));
        }
        if self.level == 0 {
            return Err("level must be at least 1".to_string());
        }
        if let Some(q) = self.questions_answered.iter().find(|q| !q.is_answered()) {
            return Err(format!("history entry {q} has no recorded answer"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{CharacterId, DialogueLine};

    #[test]
    fn test_default_is_menu() {
        let state = GameState::new();
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.health, MAX_HEALTH);
        assert_eq!(state.level, 1);
        assert!(state.current_question.is_none());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_fresh_run() {
        let state = GameState::fresh_run(Question::new(12, 12));
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.current_question.as_ref().map(|q| q.answer), Some(144));
        assert!(state.questions_answered.is_empty());
    }

    #[test]
    fn test_score_gain_grows_with_combo() {
        let mut state = GameState::new();
        assert_eq!(state.score_gain(), 10);
        state.combo = 3;
        assert_eq!(state.score_gain(), 16);
    }

    #[test]
    fn test_mistakes_filter() {
        let mut state = GameState::new();
        state.questions_answered = vec![
            Question::new(2, 3).record(6),
            Question::new(4, 5).record(21),
            Question::new(11, 11).record(111),
        ];
        let mistakes = state.mistakes();
        assert_eq!(mistakes.len(), 2);
        assert_eq!(mistakes[0].answer, 20);
        assert_eq!(mistakes[1].answer, 121);
    }

    #[test]
    fn test_invariant_violations_are_reported() {
        let mut state = GameState::new();
        state.health = 0;
        assert!(state.check_invariants().is_err());

        let mut state = GameState::new();
        state.mode = GameMode::StoryDialogue;
        assert!(state.check_invariants().is_err());
        state.current_dialogue = Some(DialogueLine::new(CharacterId::Nova, "..."));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_mode_serializes_screaming() {
        let json = serde_json::to_string(&GameMode::StoryDialogue).unwrap();
        assert_eq!(json, "\"STORY_DIALOGUE\"");
    }
}
