//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro screen: voice capture and weapon sound setup.
    #[default]
    Intro,
    /// A level is running.
    Playing,
    /// A level is running but simulation time is frozen.
    Paused,
    /// Lives ran out. Awaiting restart.
    GameOver,
    /// The last level's deadline elapsed. Awaiting restart.
    Completed,
}

impl GamePhase {
    /// Whether a level is loaded (running or paused).
    pub fn in_level(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }

    /// Whether the phase only accepts a restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Completed)
    }

    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Intro => "Intro",
            GamePhase::Playing => "Playing",
            GamePhase::Paused => "Paused",
            GamePhase::GameOver => "GameOver",
            GamePhase::Completed => "Completed",
        }
    }
}

/// Who fired a bullet. Decides which collision rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletSource {
    Ship,
    Asteroid,
    Ufo,
}

impl BulletSource {
    /// Bullets fired at the player rather than by the player.
    pub fn is_hostile(self) -> bool {
        !matches!(self, BulletSource::Ship)
    }
}

/// Entity category, used in destruction events and collision dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Bullet,
    Ufo,
}
