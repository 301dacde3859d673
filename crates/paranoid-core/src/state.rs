//! Game state snapshot: the complete visible state sent to the front end each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Arena, Position, SimTime};

/// Complete game state broadcast to the front end after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub arena: ArenaView,
    pub hud: HudView,
    pub ship: Option<ShipView>,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<BulletView>,
    pub ufo: Option<UfoView>,
    pub audio_events: Vec<AudioEvent>,
    /// Status line for the current phase (e.g. why a level was skipped).
    pub message: Option<String>,
}

/// Heads-up display values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub level: u8,
    /// Score for the current level.
    pub score: u32,
    /// Score accumulated over the whole run.
    pub run_score: u32,
    pub lives: i32,
    /// Whole seconds left before the level deadline. Never negative.
    pub time_left_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaView {
    pub width: f64,
    pub height: f64,
}

impl From<Arena> for ArenaView {
    fn from(arena: Arena) -> Self {
        Self {
            width: arena.width,
            height: arena.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    /// Facing angle (radians).
    pub rotation: f64,
    pub scale: f64,
    pub movable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub position: Position,
    pub rotation: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub source: BulletSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UfoView {
    pub position: Position,
}
