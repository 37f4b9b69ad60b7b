//! Heading interpolation system — the per-frame half of the helm.
//!
//! Rotates each hull's facing toward its ordered heading at the hull's
//! bounded turn rate. Hulls whose turn already completed are skipped by the
//! navigator's fast path.

use hecs::World;

use flotilla_core::components::{Attitude, Helm, KinematicProfile, ShipId};
use flotilla_core::events::HelmEvent;
use flotilla_core::types::Velocity;

use crate::navigator::Navigator;

/// Advance every hull's facing by one frame of `ticks_elapsed` ticks.
pub fn run(world: &mut World, multiplier: f64, ticks_elapsed: u64, events: &mut Vec<HelmEvent>) {
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
        let (_underway, event) = nav.try_process_heading_change(ticks_elapsed, multiplier);
        events.extend(event);
    }
}
