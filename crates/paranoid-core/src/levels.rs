//! Per-level tuning table.
//!
//! Each level toggles a handful of rule flags; the simulation reads them at
//! level entry and on every collision.

use serde::{Deserialize, Serialize};

use crate::constants::{BOUNCE_LEVEL, MAX_LEVEL_DURATION_MS};
use crate::error::SimError;

/// Immutable rule set for one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// How long the level runs before it advances on its own (ms).
    pub duration_ms: u64,
    /// Asteroids spawned at level start.
    pub asteroid_count: u32,
    /// The player flies the ship. When false the player turns and fires the asteroids.
    pub ship_control: bool,
    /// Asteroids fire at the ship (on levels without ship control) and the UFO is armed.
    pub asteroids_bullets: bool,
    /// The ship responds to rotation input.
    pub ship_rotates: bool,
    /// Asteroids drift with random velocity instead of sitting on a fixed ring.
    pub asteroid_movement: bool,
    /// Destroyed asteroids spawn smaller children.
    pub asteroid_splits: bool,
    /// A hostile UFO crosses the arena.
    #[serde(default)]
    pub ufo_spawn: bool,
}

/// Levels 1..=N, indexed from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    /// Build a table, rejecting empty tables and levels that are zero-length
    /// or longer than [`MAX_LEVEL_DURATION_MS`].
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, SimError> {
        if levels.is_empty() {
            return Err(SimError::InvalidLevelTable("no levels defined".into()));
        }
        if let Some(idx) = levels.iter().position(|l| l.duration_ms == 0) {
            return Err(SimError::InvalidLevelTable(format!(
                "level {} has zero duration",
                idx + 1
            )));
        }
        if let Some(idx) = levels
            .iter()
            .position(|l| l.duration_ms > MAX_LEVEL_DURATION_MS)
        {
            return Err(SimError::InvalidLevelTable(format!(
                "level {} lasts {} ms, more than the maximum of {} ms",
                idx + 1,
                levels[idx].duration_ms,
                MAX_LEVEL_DURATION_MS
            )));
        }
        if levels.len() > u8::MAX as usize {
            return Err(SimError::InvalidLevelTable(format!(
                "{} levels exceeds the maximum of {}",
                levels.len(),
                u8::MAX
            )));
        }
        Ok(Self { levels })
    }

    /// Look up a level by its 1-based number.
    pub fn get(&self, level: u8) -> Result<&LevelConfig, SimError> {
        level
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx as usize))
            .ok_or(SimError::UnknownLevel(level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of the final level.
    pub fn last_level(&self) -> u8 {
        self.levels.len() as u8
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    /// The five scripted levels.
    fn default() -> Self {
        let level = |asteroid_count, ship_control, asteroids_bullets, asteroid_movement, asteroid_splits| {
            LevelConfig {
                duration_ms: 5000,
                asteroid_count,
                ship_control,
                asteroids_bullets,
                ship_rotates: ship_control,
                asteroid_movement,
                asteroid_splits,
                ufo_spawn: false,
            }
        };

        Self {
            levels: vec![
                // 1: classic warm-up
                level(5, true, false, true, true),
                // 2: the player is the asteroid field
                level(8, false, true, false, true),
                // 3: ricochet bullets, no splitting
                level(10, true, false, true, false),
                // 4: dense field
                level(12, true, false, true, true),
                // 5: UFO raid
                LevelConfig {
                    ufo_spawn: true,
                    ..level(8, true, true, true, true)
                },
            ],
        }
    }
}

/// Whether bullets on this level reflect off the arena bounds.
pub fn is_bounce_level(level: u8) -> bool {
    level == BOUNCE_LEVEL
}
