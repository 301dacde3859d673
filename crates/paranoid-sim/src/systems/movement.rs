//! Kinematic integration system.
//!
//! position += velocity * dt, rotation += angular velocity * dt.

use hecs::World;

use paranoid_core::components::{AngularVelocity, Rotation};
use paranoid_core::constants::DT;
use paranoid_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity,
/// and tumble everything with an AngularVelocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }

    for (_entity, (rot, spin)) in world.query_mut::<(&mut Rotation, &AngularVelocity)>() {
        rot.radians += spin.deg_per_sec.to_radians() * DT;
    }
}
