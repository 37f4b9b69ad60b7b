//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick. Velocities live in
//! multiplier-scaled space, so integrating with the raw tick duration
//! already moves hulls faster under fast-forward. Frozen hulls carry zero
//! velocity and therefore do not drift.

use hecs::World;

use flotilla_core::constants::HOURS_PER_TICK;
use flotilla_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * HOURS_PER_TICK;
    }
}
