//! TUI widgets for the game

pub mod battlefield;
pub mod dialogue;
pub mod hud;
pub mod keypad;
pub mod report;

pub use battlefield::BattlefieldWidget;
pub use dialogue::DialogueWidget;
pub use hud::HudWidget;
pub use keypad::AnswerWidget;
pub use report::GameOverWidget;
