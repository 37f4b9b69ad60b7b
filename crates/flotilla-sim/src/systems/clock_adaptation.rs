//! Clock adaptation system — fans a clock transition out to every hull.
//!
//! Runs synchronously while the engine drains the command queue, so a
//! rescale always lands on a tick boundary: after the previous tick's
//! thrust computation and before the next one. The regulator therefore
//! always measures a consistent (multiplier, velocity) pair.

use hecs::World;

use flotilla_core::components::{Attitude, Helm, KinematicProfile, ShipId};
use flotilla_core::types::Velocity;

use crate::clock::ClockEvent;
use crate::navigator::Navigator;

/// Apply one clock transition to every hull.
pub fn run(world: &mut World, event: ClockEvent) {
    for (_entity, (ship, profile, helm, attitude, velocity)) in world.query_mut::<(
        &ShipId,
        &mut KinematicProfile,
        &mut Helm,
        &mut Attitude,
        &mut Velocity,
    )>() {
        let mut nav = Navigator {
            ship: *ship,
            profile,
            helm,
            attitude,
            velocity,
        };
        match event {
            ClockEvent::Paused => nav.on_pause_changed(true),
            ClockEvent::Resumed => nav.on_pause_changed(false),
            ClockEvent::RateChanged { old, new } => nav.on_rate_changed(old, new),
        }
    }
}
