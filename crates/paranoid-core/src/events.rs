//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::BulletSource;

/// Audio cues for the front end. The weapon cue is the one the voice intro customizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A bullet was fired.
    ShotFired { source: BulletSource },
    /// An asteroid was hit; `split` is true when children were spawned.
    AsteroidDestroyed { split: bool },
    /// The UFO was destroyed.
    UfoDestroyed,
    /// The ship lost a life.
    ShipHit { lives_left: i32 },
    /// A level was entered.
    LevelStarted { level: u8 },
    /// Lives ran out.
    GameOver { run_score: u32 },
    /// The last level was survived.
    GameCompleted { run_score: u32 },
}
