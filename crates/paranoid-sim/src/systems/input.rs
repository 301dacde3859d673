//! Player input system: steering, thrust and firing.
//!
//! On levels with ship control the keys drive the ship. On levels without
//! it the same keys turn every asteroid, and fire makes each asteroid shoot.

use hecs::World;

use paranoid_core::components::{Asteroid, Rotation, Scale, Ship};
use paranoid_core::constants::*;
use paranoid_core::enums::{BulletSource, EntityKind};
use paranoid_core::events::AudioEvent;
use paranoid_core::levels::LevelConfig;
use paranoid_core::types::{Position, Velocity};

use crate::world_setup::{self, BulletSpec};

/// Held state of the steering keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

impl Controls {
    /// Turn direction for this tick: -1 left, +1 right, 0 none. Left wins a tie.
    pub fn turn(&self) -> f64 {
        if self.rotate_left {
            -1.0
        } else if self.rotate_right {
            1.0
        } else {
            0.0
        }
    }
}

/// Apply one tick of input.
pub fn run(
    world: &mut World,
    controls: &Controls,
    fire: bool,
    config: &LevelConfig,
    level: u8,
    audio_events: &mut Vec<AudioEvent>,
) {
    if config.ship_control {
        steer_ship(world, controls, config);
        if fire {
            fire_from_ship(world, level, audio_events);
        }
    } else {
        turn_asteroids(world, controls);
        if fire && config.asteroids_bullets {
            fire_from_asteroids(world, level, audio_events);
        }
    }
}

fn steer_ship(world: &mut World, controls: &Controls, config: &LevelConfig) {
    let turn = controls.turn() * SHIP_TURN_DEG_PER_TICK.to_radians();

    for (_entity, (ship, rotation, velocity)) in
        world.query_mut::<(&Ship, &mut Rotation, &mut Velocity)>()
    {
        if config.ship_rotates {
            rotation.radians += turn;
        }

        if !ship.movable {
            continue;
        }
        if controls.thrust {
            velocity.x += rotation.radians.cos() * SHIP_THRUST * DT;
            velocity.y += rotation.radians.sin() * SHIP_THRUST * DT;
            let speed = velocity.speed();
            if speed > SHIP_MAX_SPEED {
                velocity.x *= SHIP_MAX_SPEED / speed;
                velocity.y *= SHIP_MAX_SPEED / speed;
            }
        } else {
            let keep = SHIP_DRAG_PER_SEC.powf(DT);
            velocity.x *= keep;
            velocity.y *= keep;
        }
    }
}

fn turn_asteroids(world: &mut World, controls: &Controls) {
    let turn = controls.turn() * SHIP_TURN_DEG_PER_TICK.to_radians();
    if turn == 0.0 {
        return;
    }
    for (_entity, (_asteroid, rotation)) in world.query_mut::<(&Asteroid, &mut Rotation)>() {
        rotation.radians += turn;
    }
}

fn fire_from_ship(world: &mut World, level: u8, audio_events: &mut Vec<AudioEvent>) {
    let muzzle = world
        .query_mut::<(&Ship, &Position, &Rotation, &Scale)>()
        .into_iter()
        .next()
        .map(|(_, (_, pos, rot, scale))| (*pos, rot.radians, scale.factor));

    if let Some((origin, facing, scale)) = muzzle {
        world_setup::spawn_bullet(
            world,
            BulletSpec::from_firer(EntityKind::Ship, scale, origin, facing, BulletSource::Ship, level),
        );
        audio_events.push(AudioEvent::ShotFired {
            source: BulletSource::Ship,
        });
    }
}

fn fire_from_asteroids(world: &mut World, level: u8, audio_events: &mut Vec<AudioEvent>) {
    let muzzles: Vec<(Position, f64, f64)> = world
        .query_mut::<(&Asteroid, &Position, &Rotation, &Scale)>()
        .into_iter()
        .map(|(_, (_, pos, rot, scale))| (*pos, rot.radians, scale.factor))
        .collect();

    if muzzles.is_empty() {
        return;
    }
    for (origin, facing, scale) in muzzles {
        world_setup::spawn_bullet(
            world,
            BulletSpec::from_firer(
                EntityKind::Asteroid,
                scale,
                origin,
                facing,
                BulletSource::Asteroid,
                level,
            ),
        );
    }
    audio_events.push(AudioEvent::ShotFired {
        source: BulletSource::Asteroid,
    });
}
