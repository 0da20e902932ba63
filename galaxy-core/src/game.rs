//! The game state machine.
//!
//! [`Game`] owns the authoritative [`GameState`] together with the active
//! enemy, the keypad buffer and the one narrative job that may be in flight.
//! The presentation layer drives it through seven input handlers and polls it
//! once per frame with [`Game::poll_narrative`]; nothing here ever blocks on
//! the narrator.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::answer::AnswerBuffer;
use crate::config::GameConfig;
use crate::dialogue::{self, DialogueLine};
use crate::enemy::{Enemy, EnemySpawner};
use crate::narrative::{
    dialogue_or_fallback, fallback, report_or_fallback, NarrativeService, Phase,
};
use crate::question;
use crate::round::{self, RoundEvent};
use crate::speech::Speaker;
use crate::state::{GameMode, GameState};

/// How long the wrong-answer message stays up.
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(3);

/// What a pending narrative job is fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Opening dialogue for a new run.
    Intro,
    /// Dialogue for a boss that just appeared.
    BossApproach { level: u32 },
    /// After-action report for a finished run.
    Report,
}

/// Result of a narrative job, already passed through the fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    Dialogue(Vec<DialogueLine>),
    Report(String),
}

type JobFuture = Pin<Box<dyn Future<Output = JobOutput> + Send + 'static>>;

enum JobTask {
    Spawned(JoinHandle<JobOutput>),
    /// Created without a runtime; runs when the game is next polled.
    Deferred(JobFuture),
}

struct PendingJob {
    kind: JobKind,
    task: JobTask,
}

/// Transient message shown after a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub shown_at: Instant,
}

/// A running game.
pub struct Game {
    state: GameState,
    enemy: Option<Enemy>,
    buffer: AnswerBuffer,
    feedback: Option<Feedback>,
    spawner: EnemySpawner,
    rng: StdRng,
    narrator: Arc<dyn NarrativeService>,
    speaker: Box<dyn Speaker>,
    job: Option<PendingJob>,
}

impl Game {
    /// Create a game at the menu with a randomly seeded question generator.
    pub fn new(narrator: Arc<dyn NarrativeService>, speaker: Box<dyn Speaker>) -> Self {
        Self::with_rng(narrator, speaker, StdRng::from_entropy())
    }

    /// Create a game whose questions are reproducible from `seed`.
    pub fn with_seed(
        narrator: Arc<dyn NarrativeService>,
        speaker: Box<dyn Speaker>,
        seed: u64,
    ) -> Self {
        Self::with_rng(narrator, speaker, StdRng::seed_from_u64(seed))
    }

    /// Create a game from configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let narrator = config.build_narrator();
        let speaker = config.build_speaker();
        match config.seed {
            Some(seed) => Self::with_seed(narrator, speaker, seed),
            None => Self::new(narrator, speaker),
        }
    }

    fn with_rng(narrator: Arc<dyn NarrativeService>, speaker: Box<dyn Speaker>, rng: StdRng) -> Self {
        Self {
            state: GameState::new(),
            enemy: None,
            buffer: AnswerBuffer::new(),
            feedback: None,
            spawner: EnemySpawner::new(),
            rng,
            narrator,
            speaker,
            job: None,
        }
    }

    // ========================================================================
    // Snapshot accessors
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref()
    }

    pub fn buffer(&self) -> &AnswerBuffer {
        &self.buffer
    }

    /// The wrong-answer message, while it is showing.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_ref().map(|f| f.message.as_str())
    }

    /// True while a narrative job is in flight.
    pub fn is_loading(&self) -> bool {
        self.job.is_some()
    }

    pub fn pending_job(&self) -> Option<JobKind> {
        self.job.as_ref().map(|job| job.kind)
    }

    /// Mutable access to the state, for test setups and tooling.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Replace the active enemy, for test setups and tooling.
    pub fn set_enemy(&mut self, enemy: Enemy) {
        self.enemy = Some(enemy);
    }

    // ========================================================================
    // Input handlers
    // ========================================================================

    /// Append a digit to the answer.
    pub fn press_digit(&mut self, digit: u8) {
        if self.state.mode == GameMode::Playing {
            self.buffer.push(digit);
        }
    }

    /// Remove the last typed digit.
    pub fn delete_digit(&mut self) {
        if self.state.mode == GameMode::Playing {
            self.buffer.pop();
        }
    }

    pub fn clear_buffer(&mut self) {
        if self.state.mode == GameMode::Playing {
            self.buffer.clear();
        }
    }

    /// Fire the typed answer at the enemy.
    ///
    /// Returns what happened, or nothing if the submission was rejected.
    pub fn submit(&mut self) -> Vec<RoundEvent> {
        if self.state.mode != GameMode::Playing || self.job.is_some() {
            return Vec::new();
        }
        let Some(enemy) = self.enemy.as_ref() else {
            return Vec::new();
        };
        let Some(submitted) = self.buffer.value() else {
            return Vec::new();
        };
        let Some(outcome) = round::resolve(
            &self.state,
            enemy,
            submitted,
            &mut self.rng,
            &mut self.spawner,
        ) else {
            return Vec::new();
        };
        self.buffer.clear();

        let game_over = outcome.is_game_over();
        self.state = outcome.state;
        self.enemy = Some(outcome.enemy);

        for event in &outcome.events {
            match event {
                RoundEvent::Wrong { question, .. } if !game_over => {
                    self.feedback = Some(Feedback {
                        message: format!(
                            "错误！{} x {} = {}",
                            question.factor_a, question.factor_b, question.answer
                        ),
                        shown_at: Instant::now(),
                    });
                    self.speaker
                        .speak(&format!("警报！正确答案是 {}", question.answer));
                }
                RoundEvent::BossApproaching { level } => {
                    tracing::info!(level, "boss approaching");
                    self.launch(JobKind::BossApproach { level: *level });
                }
                RoundEvent::ShieldsDown { final_score } => {
                    tracing::info!(
                        final_score,
                        level = self.state.level,
                        answered = self.state.questions_answered.len(),
                        "shields down"
                    );
                    self.feedback = None;
                    self.launch(JobKind::Report);
                }
                _ => {}
            }
        }

        outcome.events
    }

    /// Begin a new run from the menu.
    ///
    /// The opening dialogue is fetched first; the run itself is set up when
    /// it arrives.
    pub fn start(&mut self) {
        if self.state.mode != GameMode::Menu || self.job.is_some() {
            return;
        }
        self.launch(JobKind::Intro);
    }

    /// Leave the game over screen, discarding the run.
    pub fn return_to_menu(&mut self) {
        if self.state.mode != GameMode::GameOver {
            return;
        }
        if let Some(job) = self.job.take() {
            tracing::debug!(kind = ?job.kind, "discarding pending narrative job");
            if let JobTask::Spawned(handle) = job.task {
                handle.abort();
            }
        }
        self.speaker.cancel();
        self.state = GameState::new();
        self.enemy = None;
        self.buffer.clear();
        self.feedback = None;
    }

    /// Show the next dialogue line.
    pub fn advance_dialogue(&mut self) {
        dialogue::advance(&mut self.state, &mut *self.speaker);
    }

    // ========================================================================
    // Time and narrative jobs
    // ========================================================================

    /// Expire timed feedback.
    pub fn tick(&mut self, now: Instant) {
        if let Some(feedback) = &self.feedback {
            if now.saturating_duration_since(feedback.shown_at) >= FEEDBACK_DURATION {
                self.feedback = None;
            }
        }
    }

    /// Fold a finished narrative job into the state, if one has finished.
    ///
    /// Returns the kind of job that was applied.
    pub async fn poll_narrative(&mut self) -> Option<JobKind> {
        let finished = match &self.job.as_ref()?.task {
            JobTask::Spawned(handle) => handle.is_finished(),
            JobTask::Deferred(_) => true,
        };
        if !finished {
            return None;
        }
        self.settle().await
    }

    /// Wait for the pending narrative job, if any, and apply it.
    pub async fn settle(&mut self) -> Option<JobKind> {
        let PendingJob { kind, task } = self.job.take()?;
        let output = match task {
            JobTask::Spawned(handle) => match handle.await {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "narrative job failed, using fallback");
                    self.fallback_output(kind)
                }
            },
            JobTask::Deferred(future) => future.await,
        };
        self.complete(kind, output);
        Some(kind)
    }

    fn launch(&mut self, kind: JobKind) {
        let narrator = Arc::clone(&self.narrator);
        let future: JobFuture = match kind {
            JobKind::Intro => Box::pin(async move {
                JobOutput::Dialogue(dialogue_or_fallback(narrator.as_ref(), Phase::Start, 1).await)
            }),
            JobKind::BossApproach { level } => Box::pin(async move {
                JobOutput::Dialogue(
                    dialogue_or_fallback(narrator.as_ref(), Phase::BossApproach, level).await,
                )
            }),
            JobKind::Report => {
                let score = self.state.score;
                let mistakes = self.state.mistakes();
                Box::pin(async move {
                    JobOutput::Report(report_or_fallback(narrator.as_ref(), score, &mistakes).await)
                })
            }
        };

        let task = match Handle::try_current() {
            Ok(handle) => JobTask::Spawned(handle.spawn(future)),
            Err(_) => JobTask::Deferred(future),
        };
        tracing::debug!(?kind, "narrative job started");
        self.job = Some(PendingJob { kind, task });
    }

    fn fallback_output(&self, kind: JobKind) -> JobOutput {
        match kind {
            JobKind::Intro => JobOutput::Dialogue(fallback::dialogue(Phase::Start)),
            JobKind::BossApproach { .. } => {
                JobOutput::Dialogue(fallback::dialogue(Phase::BossApproach))
            }
            JobKind::Report => JobOutput::Report(fallback::failed_report(self.state.score)),
        }
    }

    fn complete(&mut self, kind: JobKind, output: JobOutput) {
        tracing::debug!(?kind, "narrative job finished");
        match (kind, output) {
            (JobKind::Intro, JobOutput::Dialogue(lines)) => {
                self.state = GameState::fresh_run(question::generate(&mut self.rng));
                self.enemy = Some(self.spawner.spawn(1));
                self.buffer.clear();
                self.feedback = None;
                let lines = non_empty_or(lines, Phase::Start);
                dialogue::play(&mut self.state, lines, &mut *self.speaker);
            }
            (JobKind::BossApproach { level }, JobOutput::Dialogue(lines)) => {
                if self.state.mode != GameMode::Playing {
                    tracing::debug!(level, mode = %self.state.mode, "boss dialogue arrived late, dropped");
                    return;
                }
                let lines = non_empty_or(lines, Phase::BossApproach);
                dialogue::play(&mut self.state, lines, &mut *self.speaker);
            }
            (JobKind::Report, JobOutput::Report(text)) => {
                if self.state.mode == GameMode::GameOver {
                    self.state.mission_briefing = text;
                }
            }
            (kind, output) => {
                tracing::warn!(?kind, ?output, "narrative job produced the wrong kind of output");
            }
        }
    }
}

fn non_empty_or(lines: Vec<DialogueLine>, phase: Phase) -> Vec<DialogueLine> {
    if lines.is_empty() {
        fallback::dialogue(phase)
    } else {
        lines
    }
}
