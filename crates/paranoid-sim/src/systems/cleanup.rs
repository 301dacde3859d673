//! Cleanup systems: lifespan expiry and arena bounds.

use hecs::{Entity, World};

use paranoid_core::components::{Asteroid, Bouncy, Bullet, Lifespan, Scale, Ship, Ufo};
use paranoid_core::enums::EntityKind;
use paranoid_core::types::{Arena, Position, Velocity};

use crate::events::GameEvent;
use crate::systems::collision::body_radius;

/// Count down every `Lifespan` and despawn what runs out. Uses a
/// pre-allocated buffer to avoid per-tick allocation.
pub fn expire_lifespans(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    despawn_buffer.clear();

    for (entity, lifespan) in world.query_mut::<&mut Lifespan>() {
        lifespan.remaining_ticks = lifespan.remaining_ticks.saturating_sub(1);
        if lifespan.remaining_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    despawn(world, despawn_buffer, EntityKind::Bullet, events);
}

/// Keep everything consistent with the arena edges:
/// the ship is clamped inside, asteroids wrap around, bouncy bullets reflect,
/// and other bullets and the UFO are removed once they leave.
pub fn enforce_bounds(
    world: &mut World,
    arena: &Arena,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    // Ship: clamp and kill the outward velocity component.
    for (_entity, (_ship, pos, vel)) in world.query_mut::<(&Ship, &mut Position, &mut Velocity)>() {
        if pos.x < 0.0 || pos.x > arena.width {
            pos.x = pos.x.clamp(0.0, arena.width);
            vel.x = 0.0;
        }
        if pos.y < 0.0 || pos.y > arena.height {
            pos.y = pos.y.clamp(0.0, arena.height);
            vel.y = 0.0;
        }
    }

    // Asteroids: wrap once fully off screen.
    for (_entity, (_asteroid, pos, scale)) in
        world.query_mut::<(&Asteroid, &mut Position, &Scale)>()
    {
        let margin = body_radius(EntityKind::Asteroid, scale.factor);
        pos.x = wrap(pos.x, arena.width, margin);
        pos.y = wrap(pos.y, arena.height, margin);
    }

    // Bouncy bullets: reflect off each edge.
    for (_entity, (bullet, _bouncy, pos, vel)) in
        world.query_mut::<(&mut Bullet, &Bouncy, &mut Position, &mut Velocity)>()
    {
        let mut reflected = false;
        if pos.x < 0.0 || pos.x > arena.width {
            pos.x = reflect(pos.x, arena.width);
            vel.x = -vel.x;
            reflected = true;
        }
        if pos.y < 0.0 || pos.y > arena.height {
            pos.y = reflect(pos.y, arena.height);
            vel.y = -vel.y;
            reflected = true;
        }
        if reflected {
            bullet.bounces += 1;
        }
    }

    // Everything else that left the arena.
    despawn_buffer.clear();
    for (entity, (_bullet, pos)) in world
        .query_mut::<(&Bullet, &Position)>()
        .without::<&Bouncy>()
    {
        if !arena.contains(pos) {
            despawn_buffer.push(entity);
        }
    }
    despawn(world, despawn_buffer, EntityKind::Bullet, events);

    for (entity, (_ufo, pos, scale)) in world.query_mut::<(&Ufo, &Position, &Scale)>() {
        let margin = body_radius(EntityKind::Ufo, scale.factor);
        if pos.x > arena.width + margin
            || pos.x < -margin
            || pos.y > arena.height + margin
            || pos.y < -margin
        {
            despawn_buffer.push(entity);
        }
    }
    despawn(world, despawn_buffer, EntityKind::Ufo, events);
}

fn despawn(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    kind: EntityKind,
    events: &mut Vec<GameEvent>,
) {
    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            events.push(GameEvent::EntityDestroyed { kind, entity });
        }
    }
}

/// Wrap a coordinate so an object leaving one edge by more than `margin`
/// reappears just outside the opposite edge.
fn wrap(value: f64, extent: f64, margin: f64) -> f64 {
    if value < -margin {
        value + extent + 2.0 * margin
    } else if value > extent + margin {
        value - extent - 2.0 * margin
    } else {
        value
    }
}

/// Mirror a coordinate that overshot `[0, extent]` back inside.
fn reflect(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        (-value).min(extent)
    } else if value > extent {
        (2.0 * extent - value).max(0.0)
    } else {
        value
    }
}
