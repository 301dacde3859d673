//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::BulletSource;

/// Facing angle in radians, measured from +x toward +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub radians: f64,
}

/// Constant tumble rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngularVelocity {
    pub deg_per_sec: f64,
}

/// Sprite scale relative to the unscaled art. Also scales the collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub factor: f64,
}

/// The player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    /// False on levels where the player steers the asteroids instead.
    pub movable: bool,
}

/// Marks an entity as an asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid;

/// A projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub source: BulletSource,
    /// Number of times this bullet has reflected off the arena bounds.
    pub bounces: u32,
}

/// Marks an entity as the hostile UFO.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ufo;

/// Remaining lifetime; the entity is despawned when it reaches zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifespan {
    pub remaining_ticks: u64,
}

/// Reflects off the arena bounds instead of leaving the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bouncy;
