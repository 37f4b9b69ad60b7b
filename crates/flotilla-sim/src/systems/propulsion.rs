//! Thrust regulation system — the fixed-physics-step half of the helm.
//!
//! Each tick, every hull's navigator measures its base-rate speed, selects
//! a thrust band, and integrates velocity under that thrust and linear
//! drag. Position integration happens separately in `movement`.

use hecs::World;

use flotilla_core::components::{Attitude, Helm, KinematicProfile, ShipId};
use flotilla_core::events::HelmEvent;
use flotilla_core::types::Velocity;

use crate::navigator::Navigator;

/// Apply one physics step of thrust to every hull.
pub fn run(world: &mut World, multiplier: f64, events: &mut Vec<HelmEvent>) {
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
        events.extend(nav.apply_thrust_for_tick(multiplier));
    }
}
