//! Overlap detection between gameplay entities.
//!
//! Stands in for the engine's collision report: circle colliders sized from
//! the sprite art, tested pairwise per rule category. Deciding what an
//! overlap means is the combat resolver's job.

use hecs::{Component, Entity, World};

use paranoid_core::components::{Asteroid, Bullet, Scale, Ship, Ufo};
use paranoid_core::constants::*;
use paranoid_core::enums::EntityKind;
use paranoid_core::types::Position;

/// Collider radius for an entity of `kind` drawn at `scale`.
pub fn body_radius(kind: EntityKind, scale: f64) -> f64 {
    let sprite = match kind {
        EntityKind::Ship => SHIP_SPRITE_SIZE,
        EntityKind::Asteroid => ASTEROID_SPRITE_SIZE,
        EntityKind::Bullet => BULLET_SPRITE_SIZE,
        EntityKind::Ufo => UFO_SPRITE_SIZE,
    };
    sprite * scale / 2.0
}

/// A reported overlap, tagged by the pair of kinds involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    BulletAsteroid { bullet: Entity, asteroid: Entity },
    BulletUfo { bullet: Entity, ufo: Entity },
    BulletShip { bullet: Entity, ship: Entity },
    ShipAsteroid { ship: Entity, asteroid: Entity },
    ShipUfo { ship: Entity, ufo: Entity },
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    position: Position,
    radius: f64,
}

impl Body {
    fn overlaps(&self, other: &Body) -> bool {
        self.position.distance_to(&other.position) <= self.radius + other.radius
    }
}

fn bodies<T: Component>(world: &World, kind: EntityKind) -> Vec<Body> {
    world
        .query::<(&T, &Position, &Scale)>()
        .iter()
        .map(|(entity, (_, position, scale))| Body {
            entity,
            position: *position,
            radius: body_radius(kind, scale.factor),
        })
        .collect()
}

/// Report every overlapping pair. Order is bullets first (against
/// asteroids, UFO, ship), then ship contacts; within a category it follows
/// world iteration order.
pub fn detect(world: &World) -> Vec<Contact> {
    let ships = bodies::<Ship>(world, EntityKind::Ship);
    let asteroids = bodies::<Asteroid>(world, EntityKind::Asteroid);
    let bullets = bodies::<Bullet>(world, EntityKind::Bullet);
    let ufos = bodies::<Ufo>(world, EntityKind::Ufo);

    let mut contacts = Vec::new();

    for bullet in &bullets {
        for asteroid in asteroids.iter().filter(|a| bullet.overlaps(a)) {
            contacts.push(Contact::BulletAsteroid {
                bullet: bullet.entity,
                asteroid: asteroid.entity,
            });
        }
        for ufo in ufos.iter().filter(|u| bullet.overlaps(u)) {
            contacts.push(Contact::BulletUfo {
                bullet: bullet.entity,
                ufo: ufo.entity,
            });
        }
        for ship in ships.iter().filter(|s| bullet.overlaps(s)) {
            contacts.push(Contact::BulletShip {
                bullet: bullet.entity,
                ship: ship.entity,
            });
        }
    }

    for ship in &ships {
        for asteroid in asteroids.iter().filter(|a| ship.overlaps(a)) {
            contacts.push(Contact::ShipAsteroid {
                ship: ship.entity,
                asteroid: asteroid.entity,
            });
        }
        for ufo in ufos.iter().filter(|u| ship.overlaps(u)) {
            contacts.push(Contact::ShipUfo {
                ship: ship.entity,
                ufo: ufo.entity,
            });
        }
    }

    contacts
}
