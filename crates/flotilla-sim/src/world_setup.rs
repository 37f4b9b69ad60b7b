//! Entity spawn factories for setting up the simulation world.
//!
//! Creates hulls from a scenario's ship groups with appropriate component
//! bundles and class kinematics.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flotilla_core::components::{Attitude, Helm, Hull, KinematicProfile, ShipId};
use flotilla_core::enums::ShipClass;
use flotilla_core::types::{Heading, Position, Velocity};

use crate::scenario::Scenario;

/// Station-keeping jitter applied to spawn positions (nautical miles).
const SPAWN_JITTER_NM: f64 = 0.05;

/// Kinematics for a hull class: (mass kt, drag /hr, max thrust, turn deg/hr).
/// Top speeds come out as thrust / (mass * drag): corvette 35 kn, frigate
/// 30 kn, destroyer 32 kn, oiler 16 kn.
pub fn class_profile(class: ShipClass) -> KinematicProfile {
    match class {
        ShipClass::Corvette => KinematicProfile::new(2.0, 0.9, 63.0, 3600.0),
        ShipClass::Frigate => KinematicProfile::new(4.0, 0.8, 96.0, 2700.0),
        ShipClass::Destroyer => KinematicProfile::new(8.0, 0.7, 179.2, 2400.0),
        ShipClass::FleetOiler => KinematicProfile::new(30.0, 0.6, 288.0, 900.0),
    }
}

/// Spawn every hull a scenario describes. Ship ids run 0..count in group
/// order; each hull faces its group bearing, dead in the water.
/// Returns the number of hulls spawned.
pub fn setup_fleet(world: &mut World, rng: &mut ChaCha8Rng, scenario: &Scenario) -> u32 {
    let mut next_id = 0u32;
    for group in &scenario.groups {
        let facing = Heading::from_bearing_deg(group.bearing_deg);
        let along = facing.vec();
        // Abeam axis: the bearing rotated 90 degrees clockwise.
        let abeam = DVec3::new(along.y, -along.x, 0.0);

        for i in 0..group.count {
            let jitter = DVec3::new(
                rng.gen_range(-SPAWN_JITTER_NM..SPAWN_JITTER_NM),
                rng.gen_range(-SPAWN_JITTER_NM..SPAWN_JITTER_NM),
                0.0,
            );
            let station =
                along * group.station_nm + abeam * (group.spacing_nm * i as f64) + jitter;

            world.spawn((
                Hull,
                ShipId(next_id),
                group.class,
                Position(station),
                Velocity::ZERO,
                Attitude { facing },
                class_profile(group.class),
                Helm::new(facing),
            ));
            next_id += 1;
        }
    }
    next_id
}
