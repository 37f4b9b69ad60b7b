//! Snapshot system: queries the ECS world and builds a complete
//! FleetSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use flotilla_core::components::{Attitude, Helm, Hull, ShipId};
use flotilla_core::enums::ShipClass;
use flotilla_core::events::HelmEvent;
use flotilla_core::state::{ClockView, FleetSnapshot, ShipView};
use flotilla_core::types::{Position, SimTime, Velocity};

use crate::clock::SimClock;

/// Build a complete FleetSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    clock: &SimClock,
    events: Vec<HelmEvent>,
) -> FleetSnapshot {
    let mut ships: Vec<ShipView> = world
        .query::<(&Hull, &ShipId, &ShipClass, &Position, &Velocity, &Attitude, &Helm)>()
        .iter()
        .map(|(_, (_hull, ship, class, pos, vel, attitude, helm))| {
            // Report the speed a status display should show: base-rate
            // knots, taken from the pause snapshot while frozen.
            let scaled_speed = match helm.pause_snapshot {
                Some(snapshot) => snapshot.speed(),
                None => vel.speed(),
            };
            ShipView {
                ship: ship.0,
                class: *class,
                position: *pos,
                bearing_deg: attitude.facing.bearing_deg(),
                speed_kn: scaled_speed / clock.multiplier(),
                requested_speed_kn: helm.intent.speed_kn,
                requested_bearing_deg: helm.intent.heading.bearing_deg(),
                regulation: helm.regulation,
                turn_underway: helm.turn_underway,
            }
        })
        .collect();

    ships.sort_by_key(|s| s.ship);

    FleetSnapshot {
        time: *time,
        clock: ClockView {
            multiplier: clock.multiplier(),
            paused: clock.is_paused(),
        },
        ships,
        events,
    }
}
