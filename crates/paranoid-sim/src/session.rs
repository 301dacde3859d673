//! The single mutable game session.

use paranoid_core::constants::STARTING_LIVES;
use paranoid_core::enums::GamePhase;

use crate::timers::TimerId;

/// Score, lives, level and phase for the whole run. Owned by the engine and
/// handed to the level state machine; nothing else mutates it.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Current level number (1-based). Meaningful while a level is loaded;
    /// kept at the last played level on the end screens.
    pub level: u8,
    /// Score for the current level. Reset at every level start.
    pub score: u32,
    /// Score accumulated across the run. Reset on restart.
    pub run_score: u32,
    pub lives: i32,
    /// Tick at which the current level was entered.
    pub level_started_tick: u64,
    /// Deadline timer for the current level. Some exactly while a level is loaded.
    pub level_timer: Option<TimerId>,
    /// Status line surfaced in the snapshot.
    pub message: Option<String>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: GamePhase::Intro,
            level: 1,
            score: 0,
            run_score: 0,
            lives: STARTING_LIVES,
            level_started_tick: 0,
            level_timer: None,
            message: None,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the intro with fresh counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.run_score = self.run_score.saturating_add(points);
    }

    /// Remove one life and return what is left.
    pub fn lose_life(&mut self) -> i32 {
        self.lives -= 1;
        self.lives
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives <= 0
    }
}
