//! Headless mode for the game.
//!
//! A line-oriented protocol on stdin/stdout for scripted play and automated
//! testing. Narrative jobs are awaited before the next line is read, so the
//! transcript is deterministic for a given seed in offline mode.

use std::io::{self, BufRead, Write};

use galaxy_core::{Game, GameConfig, GameMode, JobKind, RoundEvent};

/// Run the game in headless mode.
///
/// Commands, one per line:
/// - `start`  - launch a mission from the menu
/// - `next`   - advance story dialogue
/// - a number - fire that answer at the enemy
/// - `menu`   - return to base after game over
/// - `status` - print the current state
/// - `quit`   - exit
pub async fn run_headless(config: &GameConfig) -> anyhow::Result<()> {
    let mut game = Game::from_config(config);

    println!("=== Galaxy Math Academy (headless) ===");
    println!(
        "Narrator: {}",
        if config.is_online() { "Claude" } else { "offline" }
    );
    print_help();
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.chars().all(|c| c.is_ascii_digit()) {
            fire(&mut game, line).await;
            stdout.flush()?;
            continue;
        }

        match line {
            "quit" | "exit" => {
                println!("Goodbye!");
                break;
            }
            "start" => {
                if game.mode() != GameMode::Menu {
                    println!("[ERROR] Missions start from the menu (now {})", game.mode());
                } else {
                    println!("[LOADING] Establishing comms...");
                    game.start();
                    settle(&mut game).await;
                }
            }
            "next" => {
                if game.mode() != GameMode::StoryDialogue {
                    println!("[ERROR] No dialogue to advance");
                } else {
                    game.advance_dialogue();
                    print_dialogue_or_question(&game);
                }
            }
            "menu" => {
                if game.mode() != GameMode::GameOver {
                    println!("[ERROR] Return to base only after the mission ends");
                } else {
                    game.return_to_menu();
                    println!("[MENU] Back at base");
                }
            }
            "status" => print_status(&game),
            "help" => print_help(),
            _ => println!("[ERROR] Unknown command. Type help for help."),
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Type `digits` on the keypad and submit.
async fn fire(game: &mut Game, digits: &str) {
    if game.mode() != GameMode::Playing {
        println!("[ERROR] Weapons offline (mode {})", game.mode());
        return;
    }

    game.clear_buffer();
    for c in digits.chars() {
        if let Some(d) = c.to_digit(10) {
            game.press_digit(d as u8);
        }
    }
    let events = game.submit();
    if events.is_empty() {
        println!("[IGNORED]");
        return;
    }

    for event in &events {
        match event {
            RoundEvent::Correct { question, score_gain } => {
                println!("[CORRECT] {question} = {} (+{score_gain})", question.answer)
            }
            RoundEvent::EnemyDamaged { remaining_hp } => {
                println!("[HIT] Enemy hp {remaining_hp}")
            }
            RoundEvent::EnemyDestroyed { kind, bonus } => {
                println!("[DESTROYED] {} (+{bonus})", kind.name())
            }
            RoundEvent::LevelUp { level } => println!("[LEVEL] {level}"),
            RoundEvent::EnemySpawned { kind } => println!("[ENEMY] {}", kind.name()),
            RoundEvent::BossApproaching { level } => println!("[BOSS] Level {level}"),
            RoundEvent::Wrong { question, damage } => println!(
                "[WRONG] {question} = {} (shield -{damage})",
                question.answer
            ),
            RoundEvent::ShieldsDown { final_score } => {
                println!("[GAME OVER] Final score {final_score}")
            }
        }
    }

    if game.is_loading() {
        settle(game).await;
    } else {
        print_dialogue_or_question(game);
    }
}

/// Wait for the pending narrative job and print its result.
async fn settle(game: &mut Game) {
    match game.settle().await {
        Some(JobKind::Report) => {
            println!("[REPORT] {}", game.state().mission_briefing);
            println!("Type menu to return to base.");
        }
        Some(_) => print_dialogue_or_question(game),
        None => {}
    }
}

fn print_dialogue_or_question(game: &Game) {
    let state = game.state();
    if let Some(line) = &state.current_dialogue {
        println!("[DIALOGUE] {}: {}", line.character_id, line.text);
    } else if let Some(q) = &state.current_question {
        println!(
            "[QUESTION] {q} = ?  (score {}, shield {}, combo {})",
            state.score, state.health, state.combo
        );
    }
}

fn print_status(game: &Game) {
    let state = game.state();
    println!("[STATUS]");
    println!("  Mode: {}", state.mode);
    println!("  Score: {}", state.score);
    println!("  Shield: {}/{}", state.health, state.max_health);
    println!("  Level: {}", state.level);
    println!("  Combo: {}", state.combo);
    println!("  Answered: {}", state.questions_answered.len());
    if let Some(enemy) = game.enemy() {
        println!("  Enemy: {} ({}/{})", enemy.kind.name(), enemy.hp, enemy.max_hp);
    }
    if let Some(q) = &state.current_question {
        println!("  Question: {q}");
    }
    if game.is_loading() {
        println!("  Loading: yes");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  start   - Launch a mission");
    println!("  next    - Advance dialogue");
    println!("  <N>     - Fire answer N");
    println!("  menu    - Return to base after game over");
    println!("  status  - Show current game status");
    println!("  quit    - Exit the game");
}
