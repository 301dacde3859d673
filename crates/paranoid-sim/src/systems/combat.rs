//! Combat resolver: turns reported contacts into destruction, splits and
//! events.
//!
//! The resolver mutates the world (despawns, split children) but never the
//! session. Score and life changes leave here as `GameEvent`s.

use std::collections::HashSet;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use paranoid_core::components::{Bullet, Scale};
use paranoid_core::constants::*;
use paranoid_core::enums::{BulletSource, EntityKind};
use paranoid_core::events::AudioEvent;
use paranoid_core::levels::{is_bounce_level, LevelConfig};
use paranoid_core::types::Position;

use crate::events::GameEvent;
use crate::systems::collision::Contact;
use crate::world_setup;

/// Scale of the children an asteroid of `scale` splits into, or `None` when
/// it should simply be destroyed.
pub fn split_scale(scale: f64, splits_enabled: bool) -> Option<f64> {
    if !splits_enabled {
        return None;
    }
    let child = scale * SPLIT_SHRINK;
    (child >= MIN_ASTEROID_SCALE).then_some(child)
}

struct Resolver<'a> {
    world: &'a mut World,
    rng: &'a mut ChaCha8Rng,
    config: &'a LevelConfig,
    level: u8,
    audio_events: &'a mut Vec<AudioEvent>,
    destroyed: HashSet<Entity>,
    events: Vec<GameEvent>,
}

/// Apply the level's collision rules to each contact, in report order.
/// An entity destroyed by an earlier contact is skipped in later ones.
pub fn resolve(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    contacts: &[Contact],
    config: &LevelConfig,
    level: u8,
    audio_events: &mut Vec<AudioEvent>,
) -> Vec<GameEvent> {
    let mut resolver = Resolver {
        world,
        rng,
        config,
        level,
        audio_events,
        destroyed: HashSet::new(),
        events: Vec::new(),
    };

    for contact in contacts {
        resolver.apply(*contact);
    }

    resolver.events
}

impl Resolver<'_> {
    fn apply(&mut self, contact: Contact) {
        match contact {
            Contact::BulletAsteroid { bullet, asteroid } => self.bullet_hits_asteroid(bullet, asteroid),
            Contact::BulletUfo { bullet, ufo } => self.bullet_hits_ufo(bullet, ufo),
            Contact::BulletShip { bullet, ship } => self.bullet_hits_ship(bullet, ship),
            Contact::ShipAsteroid { ship, asteroid } => self.ship_hits_asteroid(ship, asteroid),
            Contact::ShipUfo { ship, ufo } => self.ship_hits_ufo(ship, ufo),
        }
    }

    fn alive(&self, entity: Entity) -> bool {
        !self.destroyed.contains(&entity) && self.world.contains(entity)
    }

    fn bullet(&self, entity: Entity) -> Option<Bullet> {
        self.world.get::<&Bullet>(entity).ok().map(|b| *b)
    }

    fn destroy(&mut self, entity: Entity, kind: EntityKind) {
        if self.destroyed.insert(entity) {
            let _ = self.world.despawn(entity);
            self.events.push(GameEvent::EntityDestroyed { kind, entity });
        }
    }

    fn bullet_hits_asteroid(&mut self, bullet: Entity, asteroid: Entity) {
        if !self.alive(bullet) || !self.alive(asteroid) {
            return;
        }
        // Hostile shots pass through the field they were fired from.
        match self.bullet(bullet) {
            Some(b) if b.source == BulletSource::Ship => {}
            _ => return,
        }

        let parent = {
            let pos = self.world.get::<&Position>(asteroid).ok().map(|p| *p);
            let scale = self.world.get::<&Scale>(asteroid).ok().map(|s| s.factor);
            pos.zip(scale)
        };
        let Some((position, scale)) = parent else {
            return;
        };

        self.destroy(bullet, EntityKind::Bullet);

        let children = match split_scale(scale, self.config.asteroid_splits) {
            Some(child_scale) => {
                world_setup::spawn_split_children(self.world, self.rng, position, child_scale).len()
            }
            None => 0,
        };
        self.destroy(asteroid, EntityKind::Asteroid);
        if children > 0 {
            self.events.push(GameEvent::AsteroidSplit {
                parent: asteroid,
                children,
            });
        }

        self.events.push(GameEvent::ScoreAwarded {
            points: ASTEROID_POINTS,
        });
        self.audio_events.push(AudioEvent::AsteroidDestroyed {
            split: children > 0,
        });
    }

    fn bullet_hits_ufo(&mut self, bullet: Entity, ufo: Entity) {
        if !self.alive(bullet) || !self.alive(ufo) {
            return;
        }
        match self.bullet(bullet) {
            Some(b) if b.source == BulletSource::Ship => {}
            _ => return,
        }

        self.destroy(bullet, EntityKind::Bullet);
        self.destroy(ufo, EntityKind::Ufo);
        self.events.push(GameEvent::ScoreAwarded { points: UFO_POINTS });
        self.audio_events.push(AudioEvent::UfoDestroyed);
    }

    fn bullet_hits_ship(&mut self, bullet: Entity, ship: Entity) {
        if !self.alive(bullet) || !self.alive(ship) {
            return;
        }
        let Some(b) = self.bullet(bullet) else {
            return;
        };
        // The ship's own shots only hurt it after ricocheting on the bounce level.
        let ricochet = b.source == BulletSource::Ship && b.bounces > 0 && is_bounce_level(self.level);
        if !b.source.is_hostile() && !ricochet {
            return;
        }

        self.destroy(bullet, EntityKind::Bullet);
        self.events.push(GameEvent::LifeLost);
    }

    fn ship_hits_asteroid(&mut self, ship: Entity, asteroid: Entity) {
        if !self.alive(ship) || !self.alive(asteroid) {
            return;
        }
        // When the player is steering the asteroids, touching them is harmless.
        if !self.config.ship_control {
            return;
        }

        self.destroy(asteroid, EntityKind::Asteroid);
        self.events.push(GameEvent::LifeLost);
    }

    fn ship_hits_ufo(&mut self, ship: Entity, ufo: Entity) {
        if !self.alive(ship) || !self.alive(ufo) {
            return;
        }

        self.destroy(ufo, EntityKind::Ufo);
        self.audio_events.push(AudioEvent::UfoDestroyed);
        self.events.push(GameEvent::LifeLost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scale_halves() {
        assert_eq!(split_scale(0.2, true), Some(0.1));
        assert!((split_scale(0.1, true).unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_split_scale_below_minimum() {
        assert_eq!(split_scale(0.08, true), None);
        assert_eq!(split_scale(0.01, true), None);
    }

    #[test]
    fn test_split_scale_disabled() {
        assert_eq!(split_scale(0.2, false), None);
    }
}
