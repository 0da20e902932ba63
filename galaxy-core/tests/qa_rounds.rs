//! QA tests for round resolution through the game's input handlers.
//!
//! Run with: `cargo test -p galaxy-core --test qa_rounds`

use galaxy_core::testing::{assert_event, assert_invariants, assert_mode, assert_stats};
use galaxy_core::{EnemyKind, GameMode, JobKind, RoundEvent, TestHarness};

async fn playing() -> TestHarness {
    let mut harness = TestHarness::new();
    harness.start_playing().await;
    harness
}

// =============================================================================
// Correct answers
// =============================================================================

#[tokio::test]
async fn test_scout_kill_from_fresh_game() {
    let mut harness = playing().await;
    harness.force_question(12, 14).force_enemy(EnemyKind::Scout);
    let first_enemy = harness.game.enemy().map(|e| e.id);

    let events = harness.answer(168);

    assert_stats(&harness, 60, 100, 1);
    assert_eq!(harness.game.state().level, 2);
    assert_ne!(harness.game.enemy().map(|e| e.id), first_enemy);
    assert_eq!(harness.game.enemy().map(|e| e.kind), Some(EnemyKind::Scout));
    assert_event(&events, |e| matches!(e, RoundEvent::LevelUp { level: 2 }));
    assert!(harness.game.buffer().is_empty());
    assert_invariants(&harness);
}

#[tokio::test]
async fn test_combo_grows_by_one_per_correct_answer() {
    let mut harness = playing().await;
    harness.force_enemy(EnemyKind::Boss);

    for expected in 1..=4 {
        harness.answer_correctly();
        assert_eq!(harness.combo(), expected);
    }
    // 10 + 12 + 14 + 16; the boss still has one hit point left
    assert_eq!(harness.score(), 52);
    assert_eq!(harness.game.enemy().map(|e| e.hp), Some(1));
}

#[tokio::test]
async fn test_battleship_takes_two_hits() {
    let mut harness = playing().await;
    harness.set_level(3).force_enemy(EnemyKind::Battleship);

    let events = harness.answer_correctly();
    assert_event(&events, |e| {
        matches!(e, RoundEvent::EnemyDamaged { remaining_hp: 1 })
    });
    assert_eq!(harness.game.state().level, 3);

    let events = harness.answer_correctly();
    assert_event(&events, |e| matches!(e, RoundEvent::EnemyDestroyed { .. }));
    assert_eq!(harness.game.state().level, 4);
    assert_eq!(harness.score(), 10 + 12 + 50);
    assert_eq!(harness.combo(), 2);
    assert_invariants(&harness);
}

#[tokio::test]
async fn test_combo_carries_through_a_kill() {
    let mut harness = playing().await;
    harness
        .set_level(2)
        .set_score(60)
        .set_combo(1)
        .force_enemy(EnemyKind::Scout);

    let events = harness.answer_correctly();

    assert_event(&events, |e| matches!(e, RoundEvent::EnemyDestroyed { .. }));
    // 60 + (10 + 1 * 2) + 50
    assert_stats(&harness, 122, 100, 2);
    assert_eq!(harness.game.state().level, 3);
    assert_invariants(&harness);
}

#[tokio::test]
async fn test_reaching_level_five_summons_boss_dialogue() {
    let mut harness = playing().await;
    harness.set_level(4).set_score(200).set_health(60);

    let events = harness.answer_correctly();
    assert_event(&events, |e| {
        matches!(e, RoundEvent::BossApproaching { level: 5 })
    });
    assert_eq!(harness.game.enemy().map(|e| e.kind), Some(EnemyKind::Boss));
    assert_eq!(
        harness.game.pending_job(),
        Some(JobKind::BossApproach { level: 5 })
    );

    harness.game.settle().await;
    assert_mode(&harness, GameMode::StoryDialogue);
    assert_eq!(harness.score(), 260);
    assert_eq!(harness.health(), 60);
    assert_eq!(harness.game.state().level, 5);
    assert_invariants(&harness);
}

#[tokio::test]
async fn test_submit_ignored_while_boss_dialogue_is_loading() {
    let mut harness = playing().await;
    harness.set_level(9);
    harness.answer_correctly();
    assert!(harness.game.is_loading());

    let before = harness.game.state().clone();
    let events = harness.answer_correctly();
    assert!(events.is_empty());
    assert_eq!(harness.game.state().score, before.score);
    assert_eq!(harness.history_len(), before.questions_answered.len());
}

// =============================================================================
// Wrong answers
// =============================================================================

#[tokio::test]
async fn test_wrong_answer_costs_twenty_shield() {
    let mut harness = playing().await;
    harness.set_combo(4).set_score(90).force_question(13, 17);
    let question_before = harness.game.state().current_question.clone();

    let events = harness.answer(220);

    assert_stats(&harness, 90, 80, 0);
    assert_event(&events, |e| matches!(e, RoundEvent::Wrong { damage: 20, .. }));
    assert_eq!(harness.game.state().current_question, question_before);
    assert_eq!(harness.game.feedback(), Some("错误！13 x 17 = 221"));
    assert_eq!(
        harness.speaker.last().as_deref(),
        Some("警报！正确答案是 221")
    );
    let last = harness.game.state().questions_answered.last().cloned();
    assert_eq!(last.and_then(|q| q.is_correct), Some(false));
}

#[tokio::test]
async fn test_health_never_goes_negative() {
    let mut harness = playing().await;
    harness.set_health(10);
    harness.answer_wrong();

    assert_eq!(harness.health(), 0);
    assert_mode(&harness, GameMode::GameOver);
    assert_invariants(&harness);
}

#[tokio::test]
async fn test_five_misses_end_the_run() {
    let mut harness = playing().await;
    for shots in 1..=5 {
        harness.answer_wrong();
        assert_eq!(harness.health(), 100 - 20 * shots);
    }
    assert_mode(&harness, GameMode::GameOver);
    assert_eq!(harness.game.pending_job(), Some(JobKind::Report));
    assert!(harness.game.feedback().is_none());
}

// =============================================================================
// Rejected input
// =============================================================================

#[tokio::test]
async fn test_empty_submit_changes_nothing() {
    let mut harness = playing().await;
    harness.set_combo(2).set_score(40);

    let events = harness.game.submit();

    assert!(events.is_empty());
    assert_stats(&harness, 40, 100, 2);
    assert_eq!(harness.history_len(), 0);
}

#[tokio::test]
async fn test_keypad_editing() {
    let mut harness = playing().await;
    harness.type_number(1234);
    harness.game.press_digit(5);
    assert_eq!(harness.game.buffer().to_string(), "1234");

    harness.game.delete_digit();
    assert_eq!(harness.game.buffer().to_string(), "123");

    harness.game.clear_buffer();
    assert!(harness.game.buffer().is_empty());

    harness.game.press_digit(12);
    assert!(harness.game.buffer().is_empty());
}

#[tokio::test]
async fn test_keypad_ignored_during_dialogue() {
    let mut harness = TestHarness::new();
    harness.game.start();
    harness.game.settle().await;
    assert_mode(&harness, GameMode::StoryDialogue);

    harness.type_number(7);
    assert!(harness.game.buffer().is_empty());
    assert!(harness.game.submit().is_empty());
}
