//! Testing utilities for the game.
//!
//! This module provides tools for integration testing:
//! - `ScriptedNarrator` for deterministic narrative without API calls
//! - `RecordingSpeaker` for checking what was narrated
//! - `TestHarness` for scripted game scenarios
//! - Assertion helpers for verifying game state

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::dialogue::DialogueLine;
use crate::enemy::{Enemy, EnemyKind};
use crate::game::Game;
use crate::narrative::{NarrativeError, NarrativeService, Phase};
use crate::question::Question;
use crate::round::RoundEvent;
use crate::speech::Speaker;
use crate::state::GameMode;

/// Seed used by the harness unless a test picks its own.
pub const HARNESS_SEED: u64 = 42;

/// A request the scripted narrator received.
#[derive(Debug, Clone, PartialEq)]
pub enum NarratorCall {
    Dialogue { phase: Phase, level: u32 },
    Report { score: u32, mistakes: Vec<Question> },
}

/// A narrative service that returns scripted replies.
///
/// Dialogue and report replies are queued separately and handed out in
/// order. Once a queue runs dry every request fails, which sends the game
/// down its fallback path.
#[derive(Default)]
pub struct ScriptedNarrator {
    dialogue: Mutex<VecDeque<Result<Vec<DialogueLine>, NarrativeError>>>,
    reports: Mutex<VecDeque<Result<String, NarrativeError>>>,
    calls: Mutex<Vec<NarratorCall>>,
    delay: Option<Duration>,
}

impl ScriptedNarrator {
    /// A narrator with nothing scripted: every request fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful dialogue reply.
    pub fn with_dialogue(self, lines: Vec<DialogueLine>) -> Self {
        lock(&self.dialogue).push_back(Ok(lines));
        self
    }

    /// Queue a failed dialogue reply.
    pub fn with_dialogue_error(self, error: NarrativeError) -> Self {
        lock(&self.dialogue).push_back(Err(error));
        self
    }

    /// Queue a successful report reply.
    pub fn with_report(self, text: impl Into<String>) -> Self {
        lock(&self.reports).push_back(Ok(text.into()));
        self
    }

    /// Queue a failed report reply.
    pub fn with_report_error(self, error: NarrativeError) -> Self {
        lock(&self.reports).push_back(Err(error));
        self
    }

    /// Sleep this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<NarratorCall> {
        lock(&self.calls).clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl NarrativeService for ScriptedNarrator {
    async fn fetch_dialogue(
        &self,
        phase: Phase,
        level: u32,
    ) -> Result<Vec<DialogueLine>, NarrativeError> {
        lock(&self.calls).push(NarratorCall::Dialogue { phase, level });
        self.pause().await;
        let reply = lock(&self.dialogue).pop_front();
        reply.unwrap_or_else(|| Err(NarrativeError::Unavailable("script exhausted".to_string())))
    }

    async fn fetch_report(
        &self,
        score: u32,
        mistakes: &[Question],
    ) -> Result<String, NarrativeError> {
        lock(&self.calls).push(NarratorCall::Report {
            score,
            mistakes: mistakes.to_vec(),
        });
        self.pause().await;
        let reply = lock(&self.reports).pop_front();
        reply.unwrap_or_else(|| Err(NarrativeError::Unavailable("script exhausted".to_string())))
    }
}

/// A speaker that remembers what it was asked to say.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the game.
#[derive(Debug, Default, Clone)]
pub struct RecordingSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
    cancels: Arc<Mutex<usize>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, oldest first.
    pub fn spoken(&self) -> Vec<String> {
        lock(&self.spoken).clone()
    }

    pub fn last(&self) -> Option<String> {
        lock(&self.spoken).last().cloned()
    }

    /// How many times narration was explicitly cancelled.
    pub fn cancels(&self) -> usize {
        *lock(&self.cancels)
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        lock(&self.spoken).push(text.to_string());
    }

    fn cancel(&mut self) {
        *lock(&self.cancels) += 1;
    }
}

/// Test harness for running game scenarios.
pub struct TestHarness {
    /// The game under test.
    pub game: Game,
    /// The narrator the game talks to.
    pub narrator: Arc<ScriptedNarrator>,
    /// Shared handle on the game's speaker.
    pub speaker: RecordingSpeaker,
}

impl TestHarness {
    /// A harness whose narrator always fails, so every phase falls back.
    pub fn new() -> Self {
        Self::with_narrator(ScriptedNarrator::new())
    }

    pub fn with_narrator(narrator: ScriptedNarrator) -> Self {
        let narrator = Arc::new(narrator);
        let speaker = RecordingSpeaker::new();
        let game = Game::with_seed(
            Arc::clone(&narrator) as Arc<dyn NarrativeService>,
            Box::new(speaker.clone()),
            HARNESS_SEED,
        );
        Self {
            game,
            narrator,
            speaker,
        }
    }

    /// Start a run and click through the intro until play begins.
    pub async fn start_playing(&mut self) -> &mut Self {
        self.game.start();
        self.game.settle().await;
        self.skip_dialogue();
        self
    }

    /// Advance until the dialogue queue is exhausted.
    pub fn skip_dialogue(&mut self) -> &mut Self {
        while self.game.mode() == GameMode::StoryDialogue {
            self.game.advance_dialogue();
        }
        self
    }

    /// Replace the active question.
    pub fn force_question(&mut self, factor_a: u32, factor_b: u32) -> &mut Self {
        self.game.state_mut().current_question = Some(Question::new(factor_a, factor_b));
        self
    }

    /// Replace the active enemy with a fresh one of `kind`.
    pub fn force_enemy(&mut self, kind: EnemyKind) -> &mut Self {
        self.game.set_enemy(Enemy::new(kind));
        self
    }

    pub fn set_health(&mut self, health: u32) -> &mut Self {
        self.game.state_mut().health = health;
        self
    }

    pub fn set_combo(&mut self, combo: u32) -> &mut Self {
        self.game.state_mut().combo = combo;
        self
    }

    pub fn set_level(&mut self, level: u32) -> &mut Self {
        self.game.state_mut().level = level;
        self
    }

    pub fn set_score(&mut self, score: u32) -> &mut Self {
        self.game.state_mut().score = score;
        self
    }

    /// Type a number on the keypad without submitting it.
    pub fn type_number(&mut self, value: u32) -> &mut Self {
        for ch in value.to_string().chars() {
            if let Some(d) = ch.to_digit(10) {
                self.game.press_digit(d as u8);
            }
        }
        self
    }

    /// Type and submit an answer.
    pub fn answer(&mut self, value: u32) -> Vec<RoundEvent> {
        self.type_number(value);
        self.game.submit()
    }

    /// Submit the right answer to the active question.
    pub fn answer_correctly(&mut self) -> Vec<RoundEvent> {
        let answer = self.current_answer();
        self.answer(answer)
    }

    /// Submit an answer that is off by one.
    pub fn answer_wrong(&mut self) -> Vec<RoundEvent> {
        let answer = self.current_answer();
        self.answer(answer + 1)
    }

    fn current_answer(&self) -> u32 {
        self.game
            .state()
            .current_question
            .as_ref()
            .map(|q| q.answer)
            .unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.game.state().score
    }

    pub fn health(&self) -> u32 {
        self.game.state().health
    }

    pub fn combo(&self) -> u32 {
        self.game.state().combo
    }

    pub fn history_len(&self) -> usize {
        self.game.state().questions_answered.len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the game is in the given mode.
#[track_caller]
pub fn assert_mode(harness: &TestHarness, mode: GameMode) {
    assert_eq!(
        harness.game.mode(),
        mode,
        "Expected mode {mode}, got {}",
        harness.game.mode()
    );
}

/// Assert score, shield and combo at once.
#[track_caller]
pub fn assert_stats(harness: &TestHarness, score: u32, health: u32, combo: u32) {
    let actual = (harness.score(), harness.health(), harness.combo());
    assert_eq!(
        actual,
        (score, health, combo),
        "Expected score/health/combo {score}/{health}/{combo}, got {}/{}/{}",
        actual.0,
        actual.1,
        actual.2
    );
}

/// Assert the structural invariants of the game state hold.
#[track_caller]
pub fn assert_invariants(harness: &TestHarness) {
    if let Err(violation) = harness.game.state().check_invariants() {
        panic!("State invariant violated: {violation}");
    }
}

/// Assert a round produced an event matching `pred`.
#[track_caller]
pub fn assert_event(events: &[RoundEvent], pred: impl Fn(&RoundEvent) -> bool) {
    assert!(
        events.iter().any(pred),
        "Expected matching event in {events:?}"
    );
}
