//! Multiplication space-shooter engine with an AI narrator.
//!
//! This crate provides:
//! - Question generation and enemy spawning
//! - Round resolution (score, combo, shields, levels)
//! - The game state machine with its seven input handlers
//! - Story dialogue from Claude, with canned fallbacks
//! - Spoken narration through an external TTS command
//!
//! # Quick Start
//!
//! ```ignore
//! use galaxy_core::{Game, GameConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::from_env()?;
//!     let mut game = Game::from_config(&config);
//!
//!     game.start();
//!     game.settle().await;
//!     while game.state().current_dialogue.is_some() {
//!         game.advance_dialogue();
//!     }
//!
//!     game.press_digit(4);
//!     game.press_digit(2);
//!     for event in game.submit() {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod config;
pub mod dialogue;
pub mod enemy;
pub mod game;
pub mod narrative;
pub mod question;
pub mod round;
pub mod speech;
pub mod state;
pub mod testing;

// Primary public API
pub use answer::AnswerBuffer;
pub use config::{ConfigError, GameConfig};
pub use dialogue::{CharacterId, DialogueLine, Mood};
pub use enemy::{Enemy, EnemyKind, EnemySpawner};
pub use game::{Game, JobKind};
pub use narrative::{NarrativeError, NarrativeService, Phase};
pub use question::Question;
pub use round::{RoundEvent, RoundOutcome};
pub use speech::{CommandSpeaker, SilentSpeaker, Speaker};
pub use state::{GameMode, GameState};
pub use testing::{RecordingSpeaker, ScriptedNarrator, TestHarness};
