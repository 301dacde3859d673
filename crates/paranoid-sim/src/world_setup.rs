//! Entity spawn factories.
//!
//! Creates the ship, asteroids, bullets and the UFO with the component
//! bundles the systems expect.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use paranoid_core::components::*;
use paranoid_core::constants::*;
use paranoid_core::enums::{BulletSource, EntityKind};
use paranoid_core::levels::{is_bounce_level, LevelConfig};
use paranoid_core::types::{Arena, Position, Velocity};

use crate::systems::collision::body_radius;
use crate::timers::{Scheduler, TimerKind};

/// Populate the world for a freshly entered level: ship, asteroids and,
/// when the level calls for it, the UFO. The caller clears the previous
/// level first.
pub fn setup_level(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    arena: &Arena,
    config: &LevelConfig,
    now: u64,
) {
    spawn_ship(world, arena, config.ship_control);

    let fixed = !config.asteroid_movement;
    let total = config.asteroid_count as usize;
    for index in 0..total {
        spawn_asteroid(world, rng, arena, fixed, index, total);
    }

    if config.ufo_spawn {
        spawn_ufo(world, rng, scheduler, arena, now);
    }
}

/// Spawn the ship at the arena centre, facing right.
pub fn spawn_ship(world: &mut World, arena: &Arena, movable: bool) -> Entity {
    world.spawn((
        Ship { movable },
        arena.center(),
        Velocity::default(),
        Rotation::default(),
        Scale { factor: SHIP_SCALE },
    ))
}

/// Spawn one full-size asteroid.
///
/// Fixed asteroids sit still on a ring of radius `0.4 × min(width, height)`
/// around the centre, evenly spaced by `index / total`. Drifting asteroids
/// start anywhere in the arena with a random velocity.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    arena: &Arena,
    fixed: bool,
    index: usize,
    total: usize,
) -> Entity {
    let (position, velocity) = if fixed {
        (ring_position(arena, index, total), Velocity::default())
    } else {
        let position = Position::new(
            rng.gen_range(0.0..=arena.width),
            rng.gen_range(0.0..=arena.height),
        );
        (position, random_velocity(rng, ASTEROID_MAX_SPEED))
    };
    spawn_asteroid_at(world, rng, position, velocity, ASTEROID_SCALE)
}

/// Ring slot `index` of `total`, starting at angle 0 (due right of centre).
pub fn ring_position(arena: &Arena, index: usize, total: usize) -> Position {
    let angle = index as f64 / total.max(1) as f64 * std::f64::consts::TAU;
    let radius = arena.width.min(arena.height) * ASTEROID_RING_FACTOR;
    let center = arena.center();
    let offset = DVec2::from_angle(angle) * radius;
    Position::new(center.x + offset.x, center.y + offset.y)
}

/// Spawn an asteroid with an explicit position, velocity and scale. Every
/// asteroid gets its own random tumble.
pub fn spawn_asteroid_at(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    velocity: Velocity,
    scale: f64,
) -> Entity {
    let spin = rng.gen_range(-ASTEROID_MAX_SPIN_DEG..=ASTEROID_MAX_SPIN_DEG);
    world.spawn((
        Asteroid,
        position,
        velocity,
        Rotation::default(),
        AngularVelocity { deg_per_sec: spin },
        Scale { factor: scale },
    ))
}

/// Spawn the children of a split asteroid at the parent's position.
pub fn spawn_split_children(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    child_scale: f64,
) -> Vec<Entity> {
    (0..SPLIT_COUNT)
        .map(|_| {
            let velocity = random_velocity(rng, SPLIT_MAX_SPEED);
            spawn_asteroid_at(world, rng, position, velocity, child_scale)
        })
        .collect()
}

fn random_velocity(rng: &mut ChaCha8Rng, max: f64) -> Velocity {
    Velocity::new(rng.gen_range(-max..=max), rng.gen_range(-max..=max))
}

/// Everything needed to launch a bullet.
#[derive(Debug, Clone, Copy)]
pub struct BulletSpec {
    /// Centre of the firer.
    pub origin: Position,
    /// Direction of travel (radians).
    pub facing: f64,
    pub speed: f64,
    pub source: BulletSource,
    /// Distance from `origin` along `facing` at which the bullet appears.
    pub muzzle_offset: f64,
    /// Level the bullet is fired on; decides lifespan vs ricochet.
    pub level: u8,
}

impl BulletSpec {
    /// A bullet leaving the edge of a firer of the given kind and scale.
    pub fn from_firer(
        kind: EntityKind,
        scale: f64,
        origin: Position,
        facing: f64,
        source: BulletSource,
        level: u8,
    ) -> Self {
        let speed = match source {
            BulletSource::Ufo => UFO_BULLET_SPEED,
            BulletSource::Ship | BulletSource::Asteroid => BULLET_SPEED,
        };
        Self {
            origin,
            facing,
            speed,
            source,
            muzzle_offset: body_radius(kind, scale),
            level,
        }
    }
}

/// Spawn a bullet. On the bounce level it ricochets forever; everywhere
/// else it expires after `BULLET_LIFESPAN_MS`.
pub fn spawn_bullet(world: &mut World, spec: BulletSpec) -> Entity {
    let dir = DVec2::from_angle(spec.facing);
    let muzzle = dir * spec.muzzle_offset;
    let position = Position::new(spec.origin.x + muzzle.x, spec.origin.y + muzzle.y);
    let velocity = Velocity::from_angle(spec.facing, spec.speed);

    let entity = world.spawn((
        Bullet {
            source: spec.source,
            bounces: 0,
        },
        position,
        velocity,
        Rotation {
            radians: spec.facing,
        },
        Scale {
            factor: BULLET_SCALE,
        },
    ));

    let extra = if is_bounce_level(spec.level) {
        world.insert_one(entity, Bouncy)
    } else {
        world.insert_one(
            entity,
            Lifespan {
                remaining_ticks: ms_to_ticks(BULLET_LIFESPAN_MS),
            },
        )
    };
    if let Err(e) = extra {
        log::warn!("Bullet {:?} vanished before setup: {}", entity, e);
    }

    entity
}

/// Spawn the UFO at the left edge, heading right, and arm its fire timer.
pub fn spawn_ufo(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    arena: &Arena,
    now: u64,
) -> Entity {
    let y = rng.gen_range(0.0..=arena.height);
    let ufo = world.spawn((
        Ufo,
        Position::new(0.0, y),
        Velocity::new(UFO_SPEED, 0.0),
        Rotation::default(),
        Scale { factor: UFO_SCALE },
    ));
    scheduler.schedule_repeating(
        TimerKind::UfoFire { ufo },
        now,
        ms_to_ticks(UFO_FIRE_INTERVAL_MS),
    );
    log::debug!("UFO {:?} spawned at y={:.0}", ufo, y);
    ufo
}

/// Despawn every gameplay entity. Timers acting on them are the caller's job.
pub fn clear_level(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Ship>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Asteroid>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Bullet>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Ufo>().into_iter().map(|(e, _)| e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
