//! Error types for the simulation.

use thiserror::Error;

/// Failures inside the simulation. None of these are fatal to the process;
/// the level state machine recovers from them at the transition boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Requested a level number the table does not define.
    #[error("level {0} is not defined")]
    UnknownLevel(u8),

    /// A level table failed validation.
    #[error("invalid level table: {0}")]
    InvalidLevelTable(String),

    /// The arena has a non-positive or non-finite dimension.
    #[error("invalid arena {width}x{height}")]
    InvalidArena { width: f64, height: f64 },

    /// A command arrived in a phase that cannot accept it.
    #[error("command {command} rejected in phase {phase}")]
    RejectedCommand {
        command: &'static str,
        phase: &'static str,
    },
}
