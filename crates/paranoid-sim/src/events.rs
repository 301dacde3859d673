//! Internal simulation events.
//!
//! The combat resolver and the timer dispatch describe what happened as
//! events; the level state machine is the only consumer allowed to turn them
//! into score, lives and phase changes.

use hecs::Entity;

use paranoid_core::enums::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An entity left the world (hit, expired, or flew off the arena).
    EntityDestroyed { kind: EntityKind, entity: Entity },
    /// An asteroid was replaced by `children` smaller asteroids.
    AsteroidSplit { parent: Entity, children: usize },
    /// Points earned by the player.
    ScoreAwarded { points: u32 },
    /// The ship was hit.
    LifeLost,
    /// The level deadline elapsed.
    LevelTimerExpired { level: u8 },
}
