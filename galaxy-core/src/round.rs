//! Round resolution: everything one submitted answer changes.
//!
//! [`resolve`] is a pure computation over the current state. It returns the
//! next state, the enemy to fight next and a list of events describing what
//! happened; the game applies the whole outcome at once and starts any
//! narrative follow-up the events call for.

use rand::Rng;

use crate::enemy::{Enemy, EnemyKind, EnemySpawner};
use crate::question::{self, Question};
use crate::state::{GameMode, GameState, KILL_BONUS, WRONG_ANSWER_DAMAGE};

/// Something that happened during a round, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// The answer was right.
    Correct { question: Question, score_gain: u32 },
    /// The enemy took a hit and is still flying.
    EnemyDamaged { remaining_hp: u32 },
    /// The enemy was destroyed.
    EnemyDestroyed { kind: EnemyKind, bonus: u32 },
    /// The player advanced to a new level.
    LevelUp { level: u32 },
    /// A new enemy replaced the destroyed one.
    EnemySpawned { kind: EnemyKind },
    /// The new enemy is a boss; story dialogue should follow.
    BossApproaching { level: u32 },
    /// The answer was wrong.
    Wrong { question: Question, damage: u32 },
    /// Shields reached zero; the run is over.
    ShieldsDown { final_score: u32 },
}

/// The full result of resolving one answer.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub state: GameState,
    pub enemy: Enemy,
    pub events: Vec<RoundEvent>,
}

impl RoundOutcome {
    pub fn was_correct(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, RoundEvent::Correct { .. }))
    }

    pub fn enemy_destroyed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, RoundEvent::EnemyDestroyed { .. }))
    }

    /// Level of the boss that just appeared, if any.
    pub fn boss_level(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            RoundEvent::BossApproaching { level } => Some(*level),
            _ => None,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, RoundEvent::ShieldsDown { .. }))
    }
}

/// Resolve `submitted` against the active question and enemy.
///
/// Returns `None` (nothing changes) unless the game is in play with an
/// active question.
pub fn resolve<R: Rng>(
    state: &GameState,
    enemy: &Enemy,
    submitted: u32,
    rng: &mut R,
    spawner: &mut EnemySpawner,
) -> Option<RoundOutcome> {
    if state.mode != GameMode::Playing {
        return None;
    }
    let question = state.current_question.as_ref()?;

    let answered = question.record(submitted);
    let mut next = state.clone();
    let mut enemy = enemy.clone();
    let mut events = Vec::new();
    next.questions_answered.push(answered.clone());

    if answered.is_correct == Some(true) {
        let score_gain = state.score_gain();
        next.score += score_gain;
        events.push(RoundEvent::Correct {
            question: answered,
            score_gain,
        });

        if enemy.take_hit() {
            next.score += KILL_BONUS;
            events.push(RoundEvent::EnemyDestroyed {
                kind: enemy.kind,
                bonus: KILL_BONUS,
            });

            next.level += 1;
            events.push(RoundEvent::LevelUp { level: next.level });

            enemy = spawner.spawn(next.level);
            events.push(RoundEvent::EnemySpawned { kind: enemy.kind });
            if EnemyKind::is_boss_level(next.level) {
                events.push(RoundEvent::BossApproaching { level: next.level });
            }
        } else {
            events.push(RoundEvent::EnemyDamaged {
                remaining_hp: enemy.hp,
            });
        }

        next.current_question = Some(question::generate(rng));
        next.combo += 1;
    } else {
        next.combo = 0;
        next.health = next.health.saturating_sub(WRONG_ANSWER_DAMAGE);
        events.push(RoundEvent::Wrong {
            question: answered,
            damage: WRONG_ANSWER_DAMAGE,
        });

        if next.health == 0 {
            next.mode = GameMode::GameOver;
            events.push(RoundEvent::ShieldsDown {
                final_score: next.score,
            });
        }
    }

    tracing::debug!(
        submitted,
        score = next.score,
        health = next.health,
        combo = next.combo,
        level = next.level,
        "round resolved"
    );

    Some(RoundOutcome {
        state: next,
        enemy,
        events,
    })
}
