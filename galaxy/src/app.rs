//! Main application state: the game plus presentation-only timers.

use std::time::{Duration, Instant};

use galaxy_core::{DialogueLine, Game, GameMode, JobKind};

use crate::ui::theme::GameTheme;

/// Delay between revealed characters of a dialogue line.
pub const TYPEWRITER_STEP: Duration = Duration::from_millis(30);

/// Short-lived visual effects triggered by round events.
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    /// Laser beam from the ship to the enemy.
    pub laser_until: Option<Instant>,
    /// Enemy blinks after being hit.
    pub enemy_hit_until: Option<Instant>,
    /// Screen edge flashes after a wrong answer.
    pub player_hit_until: Option<Instant>,
}

impl Flashes {
    fn expire(&mut self, now: Instant) {
        for slot in [
            &mut self.laser_until,
            &mut self.enemy_hit_until,
            &mut self.player_hit_until,
        ] {
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
            }
        }
    }

    pub fn laser(&self) -> bool {
        self.laser_until.is_some()
    }

    pub fn enemy_hit(&self) -> bool {
        self.enemy_hit_until.is_some()
    }

    pub fn player_hit(&self) -> bool {
        self.player_hit_until.is_some()
    }
}

/// Character-by-character reveal of the current dialogue line.
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    key: Option<(String, usize)>,
    total: usize,
    started: Option<Instant>,
    revealed: usize,
    finished: bool,
}

impl Typewriter {
    /// Restart if the displayed line changed.
    fn sync(&mut self, line: Option<&DialogueLine>, queued: usize, now: Instant) {
        let key = line.map(|l| (l.text.clone(), queued));
        if key == self.key {
            return;
        }
        self.total = line.map(|l| l.text.chars().count()).unwrap_or(0);
        self.key = key;
        self.started = line.map(|_| now);
        self.revealed = 0;
        self.finished = line.is_none();
    }

    fn advance(&mut self, now: Instant) {
        if self.finished {
            return;
        }
        if let Some(started) = self.started {
            let steps = now.saturating_duration_since(started).as_millis()
                / TYPEWRITER_STEP.as_millis();
            self.revealed = (steps as usize).min(self.total);
            self.finished = self.revealed >= self.total;
        }
    }

    /// Show the rest of the line immediately.
    pub fn finish(&mut self) {
        self.revealed = self.total;
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of characters currently visible.
    pub fn revealed(&self) -> usize {
        self.revealed
    }
}

/// Main application state
pub struct App {
    pub game: Game,
    pub theme: GameTheme,
    pub flashes: Flashes,
    pub typewriter: Typewriter,
    /// Whether the narrator is backed by the API.
    pub online: bool,
    status_message: Option<(String, Instant)>,
    pub animation_frame: u8,
    pub should_quit: bool,
}

impl App {
    pub fn new(game: Game, online: bool) -> Self {
        Self {
            game,
            theme: GameTheme::default(),
            flashes: Flashes::default(),
            typewriter: Typewriter::default(),
            online,
            status_message: None,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Advance timers and animations.
    pub fn tick(&mut self, now: Instant) {
        self.game.tick(now);
        self.flashes.expire(now);
        self.sync_dialogue(now);
        self.typewriter.advance(now);
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, until)| now >= *until)
        {
            self.status_message = None;
        }
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Keep the typewriter on the line the game is showing.
    pub fn sync_dialogue(&mut self, now: Instant) {
        let state = self.game.state();
        self.typewriter
            .sync(state.current_dialogue.as_ref(), state.dialogue_queue.len(), now);
    }

    /// React to a narrative job that just landed.
    pub fn on_job_finished(&mut self, kind: JobKind) {
        self.sync_dialogue(Instant::now());
        if kind == JobKind::Report {
            self.set_status("任务报告已送达", Duration::from_secs(2));
        }
    }

    /// Enter or Space in story mode: finish the line, or move on.
    pub fn continue_dialogue(&mut self) {
        if self.game.mode() != GameMode::StoryDialogue {
            return;
        }
        if self.typewriter.is_finished() {
            self.game.advance_dialogue();
            self.sync_dialogue(Instant::now());
        } else {
            self.typewriter.finish();
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, duration: Duration) {
        self.status_message = Some((message.into(), Instant::now() + duration));
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    /// Visible part of the current dialogue line.
    pub fn visible_dialogue(&self) -> Option<(&DialogueLine, String)> {
        let line = self.game.state().current_dialogue.as_ref()?;
        let shown: String = line.text.chars().take(self.typewriter.revealed()).collect();
        Some((line, shown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::{CharacterId, TestHarness};

    fn app() -> App {
        App::new(TestHarness::new().game, false)
    }

    #[test]
    fn test_typewriter_reveals_over_time() {
        let mut tw = Typewriter::default();
        let line = DialogueLine::new(CharacterId::Nova, "你好世界");
        let t0 = Instant::now();

        tw.sync(Some(&line), 0, t0);
        assert_eq!(tw.revealed(), 0);
        assert!(!tw.is_finished());

        tw.advance(t0 + Duration::from_millis(65));
        assert_eq!(tw.revealed(), 2);

        tw.advance(t0 + Duration::from_millis(500));
        assert_eq!(tw.revealed(), 4);
        assert!(tw.is_finished());
    }

    #[test]
    fn test_typewriter_restarts_on_new_line() {
        let mut tw = Typewriter::default();
        let t0 = Instant::now();
        tw.sync(Some(&DialogueLine::new(CharacterId::Nova, "一")), 1, t0);
        tw.finish();
        tw.sync(Some(&DialogueLine::new(CharacterId::Nova, "一")), 0, t0);
        assert!(!tw.is_finished());
    }

    #[test]
    fn test_flashes_expire() {
        let now = Instant::now();
        let mut flashes = Flashes {
            laser_until: Some(now + Duration::from_millis(400)),
            enemy_hit_until: Some(now + Duration::from_millis(200)),
            player_hit_until: None,
        };
        flashes.expire(now + Duration::from_millis(300));
        assert!(flashes.laser());
        assert!(!flashes.enemy_hit());
        flashes.expire(now + Duration::from_millis(400));
        assert!(!flashes.laser());
    }

    #[tokio::test]
    async fn test_continue_dialogue_finishes_then_advances() {
        let mut app = app();
        app.game.start();
        app.game.settle().await;
        app.sync_dialogue(Instant::now());

        app.continue_dialogue();
        assert!(app.typewriter.is_finished());
        assert_eq!(app.game.state().dialogue_queue.len(), 1);

        app.continue_dialogue();
        assert_eq!(app.game.state().dialogue_queue.len(), 0);
        assert!(!app.typewriter.is_finished());
    }
}
