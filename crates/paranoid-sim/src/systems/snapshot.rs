//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use paranoid_core::components::*;
use paranoid_core::enums::GamePhase;
use paranoid_core::events::AudioEvent;
use paranoid_core::state::*;
use paranoid_core::types::{Arena, Position, SimTime};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    arena: &Arena,
    hud: HudView,
    audio_events: Vec<AudioEvent>,
    message: Option<String>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        arena: (*arena).into(),
        hud,
        ship: build_ship(world),
        asteroids: build_asteroids(world),
        bullets: build_bullets(world),
        ufo: build_ufo(world),
        audio_events,
        message,
    }
}

fn build_ship(world: &World) -> Option<ShipView> {
    world
        .query::<(&Ship, &Position, &Rotation, &Scale)>()
        .iter()
        .next()
        .map(|(_, (ship, pos, rot, scale))| ShipView {
            position: *pos,
            rotation: rot.radians,
            scale: scale.factor,
            movable: ship.movable,
        })
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    world
        .query::<(&Asteroid, &Position, &Rotation, &Scale)>()
        .iter()
        .map(|(_, (_, pos, rot, scale))| AsteroidView {
            position: *pos,
            rotation: rot.radians,
            scale: scale.factor,
        })
        .collect()
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(_, (bullet, pos))| BulletView {
            position: *pos,
            source: bullet.source,
        })
        .collect()
}

fn build_ufo(world: &World) -> Option<UfoView> {
    world
        .query::<(&Ufo, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| UfoView { position: *pos })
}
