//! Paranoid Asteroids terminal application.
//!
//! This crate wires the simulation and the voice intro together and
//! drives them from a crossterm front end.

pub mod audio;
pub mod config;
pub mod frontend;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod state;
pub mod terminal;

pub use paranoid_core as core;
