//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; anything that outlives a tick lives in components,
//! the session, or the scheduler.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod hud;
pub mod input;
pub mod movement;
pub mod snapshot;
pub mod ufo;
