//! HUD values derived from the session and the level deadline.

use paranoid_core::constants::TICK_RATE;
use paranoid_core::state::HudView;

use crate::session::GameSession;
use crate::timers::Scheduler;

/// Whole seconds left on the level deadline, rounded up. Zero once it has
/// fired or when no level is loaded.
pub fn time_left_secs(session: &GameSession, scheduler: &Scheduler, now: u64) -> u64 {
    session
        .level_timer
        .and_then(|id| scheduler.remaining_ticks(id, now))
        .map(|ticks| ticks.div_ceil(TICK_RATE as u64))
        .unwrap_or(0)
}

pub fn build(session: &GameSession, scheduler: &Scheduler, now: u64) -> HudView {
    HudView {
        level: session.level,
        score: session.score,
        run_score: session.run_score,
        lives: session.lives,
        time_left_secs: time_left_secs(session, scheduler, now),
    }
}
