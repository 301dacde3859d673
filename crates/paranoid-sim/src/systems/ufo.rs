//! UFO fire-interval handler.

use hecs::{Entity, World};

use paranoid_core::components::{Scale, Ship, Ufo};
use paranoid_core::enums::{BulletSource, EntityKind};
use paranoid_core::events::AudioEvent;
use paranoid_core::types::Position;

use crate::world_setup::{self, BulletSpec};

/// Fire one shot from `ufo` at the ship's current position. The aim is
/// computed now, not when the UFO spawned. Returns the bullet, or `None` if
/// the UFO or the ship is gone.
pub fn fire(
    world: &mut World,
    ufo: Entity,
    level: u8,
    audio_events: &mut Vec<AudioEvent>,
) -> Option<Entity> {
    let (origin, scale) = {
        let mut query = world.query_one::<(&Ufo, &Position, &Scale)>(ufo).ok()?;
        let (_, pos, scale) = query.get()?;
        (*pos, scale.factor)
    };

    let target = world
        .query::<(&Ship, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)?;

    let facing = origin.angle_to(&target);
    let bullet = world_setup::spawn_bullet(
        world,
        BulletSpec::from_firer(EntityKind::Ufo, scale, origin, facing, BulletSource::Ufo, level),
    );
    audio_events.push(AudioEvent::ShotFired {
        source: BulletSource::Ufo,
    });
    Some(bullet)
}
