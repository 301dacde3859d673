//! Level state machine.
//!
//! Owns every phase transition: intro to level 1, level to level, and the
//! two terminal screens. Each transition starts by tearing down the current
//! level (deadline, UFO timers, entities) so nothing from the old level can
//! fire into the new one.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use paranoid_core::constants::{ms_to_ticks, STARTING_LIVES};
use paranoid_core::enums::{EntityKind, GamePhase};
use paranoid_core::error::SimError;
use paranoid_core::events::AudioEvent;
use paranoid_core::levels::LevelTable;
use paranoid_core::types::Arena;

use crate::events::GameEvent;
use crate::session::GameSession;
use crate::timers::{Scheduler, TimerKind};
use crate::world_setup;

/// Borrowed view of everything a transition touches. Built by the engine
/// for the duration of one call.
pub struct LevelContext<'a> {
    pub session: &'a mut GameSession,
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub scheduler: &'a mut Scheduler,
    pub arena: &'a Arena,
    pub levels: &'a LevelTable,
    /// Current simulation tick.
    pub tick: u64,
    pub audio_events: &'a mut Vec<AudioEvent>,
    pub despawn_buffer: &'a mut Vec<Entity>,
}

impl LevelContext<'_> {
    /// Intro → level 1.
    pub fn begin_play(&mut self) -> Result<(), SimError> {
        self.expect_phase("BeginPlay", |p| p == GamePhase::Intro)?;
        self.session.message = None;
        self.session.run_score = 0;
        self.enter_level_or_recover(1);
        Ok(())
    }

    /// Game over / completed → intro, with all counters reset.
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.expect_phase("Restart", GamePhase::is_terminal)?;
        self.teardown();
        self.scheduler.clear();
        self.session.reset();
        log::info!("Restarted, back to intro");
        Ok(())
    }

    /// Load level `level`: fresh entities, full lives, zero level score and a
    /// new deadline.
    pub fn enter_level(&mut self, level: u8) -> Result<(), SimError> {
        if !self.arena.is_valid() {
            return Err(SimError::InvalidArena {
                width: self.arena.width,
                height: self.arena.height,
            });
        }
        let levels = self.levels;
        let config = levels.get(level)?;

        self.teardown();
        world_setup::setup_level(
            self.world,
            self.rng,
            self.scheduler,
            self.arena,
            config,
            self.tick,
        );

        self.session.level = level;
        self.session.lives = STARTING_LIVES;
        self.session.score = 0;
        self.session.level_started_tick = self.tick;
        self.session.level_timer = Some(self.scheduler.schedule_once(
            TimerKind::LevelDeadline { level },
            self.tick,
            ms_to_ticks(config.duration_ms),
        ));
        self.session.phase = GamePhase::Playing;

        self.audio_events.push(AudioEvent::LevelStarted { level });
        log::info!(
            "Entered level {} ({} asteroids, ship control: {}, {} ms)",
            level,
            config.asteroid_count,
            config.ship_control,
            config.duration_ms
        );
        Ok(())
    }

    /// Enter `level`; if that fails, skip forward until a level loads or the
    /// table runs out, in which case fall back to the intro. Never leaves the
    /// session inside a half-built level.
    pub fn enter_level_or_recover(&mut self, level: u8) {
        let mut next = level;
        loop {
            let err = match self.enter_level(next) {
                Ok(()) => return,
                Err(e) => e,
            };
            log::error!("Level {} failed to start: {}", next, err);
            self.session.message = Some(format!("Level {} could not start: {}", next, err));

            match next.checked_add(1).filter(|n| *n <= self.levels.last_level()) {
                Some(n) => next = n,
                None => {
                    self.teardown();
                    let message = self.session.message.take();
                    self.session.reset();
                    self.session.message = message;
                    log::warn!("No playable level left, returning to intro");
                    return;
                }
            }
        }
    }

    /// Deadline of the current level elapsed: next level, or the completed
    /// screen after the last one.
    pub fn advance(&mut self) {
        let current = self.session.level;
        if current >= self.levels.last_level() {
            self.complete();
        } else {
            log::info!("Level {} survived", current);
            self.enter_level_or_recover(current + 1);
        }
    }

    pub fn game_over(&mut self) {
        self.teardown();
        self.session.phase = GamePhase::GameOver;
        self.audio_events.push(AudioEvent::GameOver {
            run_score: self.session.run_score,
        });
        log::info!(
            "Game over on level {} (run score {})",
            self.session.level,
            self.session.run_score
        );
    }

    pub fn complete(&mut self) {
        self.teardown();
        self.session.phase = GamePhase::Completed;
        self.audio_events.push(AudioEvent::GameCompleted {
            run_score: self.session.run_score,
        });
        log::info!("All levels completed (run score {})", self.session.run_score);
    }

    /// Apply one tick's gameplay events to the session. Stops at the first
    /// phase transition; whatever follows it belonged to the old level.
    /// Returns true if a transition happened.
    pub fn handle_events(&mut self, events: Vec<GameEvent>) -> bool {
        for event in events {
            match event {
                GameEvent::ScoreAwarded { points } => self.session.award(points),
                GameEvent::LifeLost => {
                    let lives_left = self.session.lose_life();
                    self.audio_events.push(AudioEvent::ShipHit { lives_left });
                    log::debug!("Ship hit, {} lives left", lives_left);
                    if self.session.is_out_of_lives() {
                        self.game_over();
                        return true;
                    }
                }
                GameEvent::LevelTimerExpired { level } => {
                    // A deadline from a level we already left is stale.
                    if level == self.session.level {
                        self.advance();
                        return true;
                    }
                }
                GameEvent::EntityDestroyed {
                    kind: EntityKind::Ufo,
                    entity,
                } => {
                    self.scheduler.cancel_for_entity(entity);
                }
                GameEvent::EntityDestroyed { .. } | GameEvent::AsteroidSplit { .. } => {}
            }
        }
        false
    }

    /// Cancel the deadline and every UFO timer, then despawn the level's
    /// entities.
    fn teardown(&mut self) {
        if let Some(id) = self.session.level_timer.take() {
            self.scheduler.cancel(id);
        }
        self.scheduler
            .cancel_where(|kind| matches!(kind, TimerKind::UfoFire { .. }));
        world_setup::clear_level(self.world, self.despawn_buffer);
    }

    fn expect_phase(
        &self,
        command: &'static str,
        accepts: impl Fn(GamePhase) -> bool,
    ) -> Result<(), SimError> {
        if accepts(self.session.phase) {
            Ok(())
        } else {
            Err(SimError::RejectedCommand {
                command,
                phase: self.session.phase.name(),
            })
        }
    }
}
