//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Controls ---
    /// Current held state of the steering keys. Stays in effect until the next update.
    SetControls {
        rotate_left: bool,
        rotate_right: bool,
        thrust: bool,
    },
    /// Fire once (edge-triggered).
    Fire,

    // --- Flow ---
    /// Leave the intro and start level 1. Sent once a weapon sound is ready.
    BeginPlay,
    /// Return to the intro from the game over or completed screen.
    Restart,
    /// Freeze the running level.
    Pause,
    /// Unfreeze the running level.
    Resume,
}
