//! Core types and definitions for Paranoid Asteroids.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, level tables and constants.
//! It has no dependency on the ECS, the terminal, or any audio backend.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod levels;
pub mod state;
pub mod types;
