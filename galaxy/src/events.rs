//! Event handling for the terminal game
//!
//! Keys map onto the game's seven input handlers; what a key does depends
//! on the current mode.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use galaxy_core::GameMode;

use crate::app::App;
use crate::effects;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.game.mode() {
        GameMode::Menu => handle_menu(app, key),
        GameMode::StoryDialogue => handle_dialogue(app, key),
        GameMode::Playing => handle_playing(app, key),
        GameMode::GameOver => handle_game_over(app, key),
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => {
            app.game.start();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

fn handle_dialogue(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            app.continue_dialogue();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_playing(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(digit) = c.to_digit(10) {
                app.game.press_digit(digit as u8);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.game.delete_digit();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') | KeyCode::Delete | KeyCode::Esc => {
            app.game.clear_buffer();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let events = app.game.submit();
            let now = Instant::now();
            effects::process_events(app, &events, now);
            app.sync_dialogue(now);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_game_over(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char('m') => {
            app.game.return_to_menu();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::TestHarness;

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(TestHarness::new().game, false);
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, ev), EventResult::Quit);
    }

    #[test]
    fn test_enter_on_menu_starts() {
        let mut app = App::new(TestHarness::new().game, false);
        press(&mut app, KeyCode::Enter);
        assert!(app.game.is_loading());
    }

    #[tokio::test]
    async fn test_keypad_round_trip() {
        let mut harness = TestHarness::new();
        harness.start_playing().await;
        harness.force_question(6, 7);
        let mut app = App::new(harness.game, false);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.game.buffer().to_string(), "42");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game.state().score, 60);
        assert!(app.flashes.laser());
    }
}
