//! Enemy archetypes and spawning.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Render identity for an enemy ship. Never used by game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub Uuid);

impl EnemyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EnemyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A display color as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS-style hex notation, e.g. `#4ade80`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Scout,
    Battleship,
    Boss,
}

impl EnemyKind {
    /// The archetype that guards a given level.
    ///
    /// Every fifth level is a boss; otherwise every third is a battleship.
    pub fn for_level(level: u32) -> Self {
        if level % 5 == 0 {
            EnemyKind::Boss
        } else if level % 3 == 0 {
            EnemyKind::Battleship
        } else {
            EnemyKind::Scout
        }
    }

    /// Whether the given level is guarded by a boss.
    pub fn is_boss_level(level: u32) -> bool {
        Self::for_level(level) == EnemyKind::Boss
    }

    pub fn max_hp(&self) -> u32 {
        match self {
            EnemyKind::Scout => 1,
            EnemyKind::Battleship => 2,
            EnemyKind::Boss => 5,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            EnemyKind::Scout => Rgb(0x4a, 0xde, 0x80),
            EnemyKind::Battleship => Rgb(0xc0, 0x84, 0xfc),
            EnemyKind::Boss => Rgb(0xf4, 0x3f, 0x5e),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Scout => "Scout",
            EnemyKind::Battleship => "Battleship",
            EnemyKind::Boss => "Boss",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ship currently being fought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    pub color: Rgb,
}

impl Enemy {
    /// A fresh, undamaged enemy of the given kind.
    pub fn new(kind: EnemyKind) -> Self {
        let max_hp = kind.max_hp();
        Self {
            id: EnemyId::new(),
            kind,
            hp: max_hp,
            max_hp,
            color: kind.color(),
        }
    }

    /// Remove one hit point. Returns true if the ship is destroyed.
    pub fn take_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }
}

/// Creates enemies for levels.
#[derive(Debug, Default)]
pub struct EnemySpawner {
    spawned: u64,
}

impl EnemySpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the enemy guarding `level`.
    pub fn spawn(&mut self, level: u32) -> Enemy {
        let enemy = Enemy::new(EnemyKind::for_level(level));
        self.spawned += 1;
        tracing::debug!(
            level,
            kind = %enemy.kind,
            id = %enemy.id,
            total = self.spawned,
            "spawned enemy"
        );
        enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_by_level() {
        assert_eq!(EnemyKind::for_level(1), EnemyKind::Scout);
        assert_eq!(EnemyKind::for_level(2), EnemyKind::Scout);
        assert_eq!(EnemyKind::for_level(3), EnemyKind::Battleship);
        assert_eq!(EnemyKind::for_level(5), EnemyKind::Boss);
        assert_eq!(EnemyKind::for_level(6), EnemyKind::Battleship);
        assert_eq!(EnemyKind::for_level(10), EnemyKind::Boss);
    }

    #[test]
    fn test_boss_wins_over_battleship() {
        assert_eq!(EnemyKind::for_level(15), EnemyKind::Boss);
        assert_eq!(EnemyKind::for_level(30), EnemyKind::Boss);
        assert!(EnemyKind::is_boss_level(45));
    }

    #[test]
    fn test_spawn_hp_and_color() {
        let mut spawner = EnemySpawner::new();

        let scout = spawner.spawn(1);
        assert_eq!((scout.hp, scout.max_hp), (1, 1));
        assert_eq!(scout.color.hex(), "#4ade80");

        let battleship = spawner.spawn(3);
        assert_eq!((battleship.hp, battleship.max_hp), (2, 2));
        assert_eq!(battleship.color.hex(), "#c084fc");

        let boss = spawner.spawn(5);
        assert_eq!((boss.hp, boss.max_hp), (5, 5));
        assert_eq!(boss.color.hex(), "#f43f5e");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut spawner = EnemySpawner::new();
        let a = spawner.spawn(1);
        let b = spawner.spawn(1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_take_hit_never_underflows() {
        let mut enemy = Enemy::new(EnemyKind::Battleship);
        assert!(!enemy.take_hit());
        assert_eq!(enemy.hp, 1);
        assert!(enemy.take_hit());
        assert!(enemy.take_hit());
        assert_eq!(enemy.hp, 0);
        assert!(enemy.hp <= enemy.max_hp);
    }
}
