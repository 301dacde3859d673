//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the game session and the
//! timer scheduler, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless (no terminal dependency),
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use paranoid_core::commands::PlayerCommand;
use paranoid_core::enums::GamePhase;
use paranoid_core::error::SimError;
use paranoid_core::events::AudioEvent;
use paranoid_core::levels::LevelTable;
use paranoid_core::state::GameStateSnapshot;
use paranoid_core::types::{Arena, SimTime};

use crate::events::GameEvent;
use crate::level::LevelContext;
use crate::session::GameSession;
use crate::systems;
use crate::systems::input::Controls;
use crate::timers::{Scheduler, TimerKind};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub arena: Arena,
    pub levels: LevelTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
            levels: LevelTable::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    session: GameSession,
    scheduler: Scheduler,
    arena: Arena,
    levels: LevelTable,
    rng: ChaCha8Rng,
    controls: Controls,
    fire_requested: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            session: GameSession::new(),
            scheduler: Scheduler::new(),
            arena: config.arena,
            levels: config.levels,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            controls: Controls::default(),
            fire_requested: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.session.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }
        self.fire_requested = false;

        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the game session (level, score, lives).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Get a mutable reference to the ECS world (for tests that stage contacts).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Jump straight into a level, bypassing the intro.
    #[cfg(test)]
    pub fn force_level(&mut self, level: u8) {
        self.level_context().enter_level_or_recover(level);
    }

    fn level_context(&mut self) -> LevelContext<'_> {
        LevelContext {
            session: &mut self.session,
            world: &mut self.world,
            rng: &mut self.rng,
            scheduler: &mut self.scheduler,
            arena: &self.arena,
            levels: &self.levels,
            tick: self.time.tick,
            audio_events: &mut self.audio_events,
            despawn_buffer: &mut self.despawn_buffer,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(e) = self.handle_command(command) {
                log::debug!("{}", e);
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), SimError> {
        let phase = self.session.phase;
        match command {
            PlayerCommand::SetControls {
                rotate_left,
                rotate_right,
                thrust,
            } => {
                self.controls = Controls {
                    rotate_left,
                    rotate_right,
                    thrust,
                };
            }
            PlayerCommand::Fire => {
                if phase != GamePhase::Playing {
                    return Err(rejected("Fire", phase));
                }
                self.fire_requested = true;
            }
            PlayerCommand::BeginPlay => self.level_context().begin_play()?,
            PlayerCommand::Restart => self.level_context().restart()?,
            PlayerCommand::Pause => {
                if phase != GamePhase::Playing {
                    return Err(rejected("Pause", phase));
                }
                self.session.phase = GamePhase::Paused;
                log::info!("Paused on level {}", self.session.level);
            }
            PlayerCommand::Resume => {
                if phase != GamePhase::Paused {
                    return Err(rejected("Resume", phase));
                }
                self.session.phase = GamePhase::Playing;
                log::info!("Resumed level {}", self.session.level);
            }
        }
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.tick;
        let level = self.session.level;
        let config = match self.levels.get(level) {
            Ok(config) => config.clone(),
            Err(e) => {
                log::error!("Running level vanished from the table: {}", e);
                self.level_context().advance();
                return;
            }
        };

        // 1. Timers. UFO shots go out now; a deadline is held back until the
        //    collision events are in, so losing the last life wins a tie.
        let mut deadline = Vec::new();
        for (_id, kind) in self.scheduler.poll(now) {
            match kind {
                TimerKind::UfoFire { ufo } => {
                    systems::ufo::fire(&mut self.world, ufo, level, &mut self.audio_events);
                }
                TimerKind::LevelDeadline { level } => {
                    deadline.push(GameEvent::LevelTimerExpired { level });
                }
            }
        }
        // 2. Player input
        systems::input::run(
            &mut self.world,
            &self.controls,
            self.fire_requested,
            &config,
            level,
            &mut self.audio_events,
        );
        // 3. Movement integration
        systems::movement::run(&mut self.world);
        // 4. Bullet lifespans
        let mut events = Vec::new();
        systems::cleanup::expire_lifespans(&mut self.world, &mut self.despawn_buffer, &mut events);
        // 5. Arena bounds
        systems::cleanup::enforce_bounds(
            &mut self.world,
            &self.arena,
            &mut self.despawn_buffer,
            &mut events,
        );
        // 6. Collisions
        let contacts = systems::collision::detect(&self.world);
        events.extend(systems::combat::resolve(
            &mut self.world,
            &mut self.rng,
            &contacts,
            &config,
            level,
            &mut self.audio_events,
        ));
        events.extend(deadline);
        // 7. Score, lives and level transitions
        self.level_context().handle_events(events);
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let audio_events = std::mem::take(&mut self.audio_events);
        let hud = systems::hud::build(&self.session, &self.scheduler, self.time.tick);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.session.phase,
            &self.arena,
            hud,
            audio_events,
            self.session.message.clone(),
        )
    }
}

fn rejected(command: &'static str, phase: GamePhase) -> SimError {
    SimError::RejectedCommand {
        command,
        phase: phase.name(),
    }
}
