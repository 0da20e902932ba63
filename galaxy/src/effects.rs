//! Round-event-to-UI mapping

use std::time::{Duration, Instant};

use galaxy_core::RoundEvent;

use crate::app::App;

const LASER: Duration = Duration::from_millis(400);
const ENEMY_HIT: Duration = Duration::from_millis(200);
const PLAYER_HIT: Duration = Duration::from_millis(500);
const STATUS: Duration = Duration::from_millis(1500);

/// Process round events and start the matching visual effects
pub fn process_events(app: &mut App, events: &[RoundEvent], now: Instant) {
    for event in events {
        process_event(app, event, now);
    }
}

fn process_event(app: &mut App, event: &RoundEvent, now: Instant) {
    match event {
        RoundEvent::Correct { score_gain, .. } => {
            app.flashes.laser_until = Some(now + LASER);
            app.flashes.enemy_hit_until = Some(now + ENEMY_HIT);
            app.set_status(format!("命中! +{score_gain}"), STATUS);
        }

        RoundEvent::EnemyDamaged { remaining_hp } => {
            tracing::trace!(remaining_hp, "enemy damaged");
        }

        RoundEvent::EnemyDestroyed { kind, bonus } => {
            app.set_status(format!("{} 已摧毁! +{bonus}", kind.name()), STATUS);
        }

        RoundEvent::LevelUp { level } => {
            tracing::debug!(level, "level up");
        }

        RoundEvent::EnemySpawned { .. } => {}

        RoundEvent::BossApproaching { .. } => {
            app.set_status("警告: 检测到巨型敌舰!", STATUS);
        }

        RoundEvent::Wrong { .. } => {
            app.flashes.player_hit_until = Some(now + PLAYER_HIT);
        }

        RoundEvent::ShieldsDown { .. } => {
            app.flashes = Default::default();
        }
    }
}
