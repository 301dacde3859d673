//! Simulation engine for Paranoid Asteroids.
//!
//! Owns the hecs ECS world, the game session and the timer scheduler, runs
//! systems at a fixed tick rate, and produces GameStateSnapshots for the
//! front end.

pub mod engine;
pub mod events;
pub mod level;
pub mod session;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use paranoid_core as core;

#[cfg(test)]
mod tests;
