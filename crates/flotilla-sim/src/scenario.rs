//! Fleet scenarios — ship compositions plus a schedule of timed orders.
//!
//! A scenario describes what to spawn (groups of a hull class stationed
//! along a bearing) and what happens when (tick-stamped fleet commands,
//! dispatched by the engine exactly like externally queued orders).

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use flotilla_core::commands::FleetCommand;
use flotilla_core::constants::TICK_RATE;
use flotilla_core::enums::ShipClass;
use flotilla_core::types::Heading;

/// A complete scenario definition. Validate before building a world from
/// it — the engine refuses invalid scenarios with a typed error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub groups: Vec<ShipGroup>,
    #[serde(default)]
    pub orders: Vec<ScheduledOrder>,
}

/// A group of identical hulls stationed along a bearing from the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipGroup {
    pub class: ShipClass,
    pub count: u32,
    /// Bearing of the group's station and initial facing (degrees).
    pub bearing_deg: f64,
    /// Distance of the first hull from the origin (nautical miles).
    pub station_nm: f64,
    /// Abeam spacing between successive hulls (nautical miles).
    pub spacing_nm: f64,
}

/// A fleet command dispatched when the simulation reaches a tick.
///
/// Orders fire on simulation ticks, which do not advance while paused — a
/// scheduled `Pause` can only be lifted by an externally queued `Resume`
/// (or one scheduled for the same tick).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledOrder {
    pub at_tick: u64,
    pub command: FleetCommand,
}

/// Scenario validation failures.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario {name:?} has no ship groups")]
    EmptyFleet { name: String },
    #[error("group {group} in scenario {name:?} has zero ships")]
    EmptyGroup { name: String, group: usize },
    #[error("order at tick {at_tick} addresses unknown ship {ship} (fleet has {fleet_size})")]
    UnknownShip {
        at_tick: u64,
        ship: u32,
        fleet_size: u32,
    },
    #[error("order at tick {at_tick} has a non-finite speed")]
    NonFiniteSpeed { at_tick: u64 },
    #[error("order at tick {at_tick} has a non-finite time scale")]
    NonFiniteTimeScale { at_tick: u64 },
}

impl Scenario {
    /// Total hulls the scenario spawns. Ship ids are assigned 0..count in
    /// group order.
    pub fn ship_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Check structural validity: a non-empty fleet and orders that address
    /// ships which will exist.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.groups.is_empty() {
            return Err(ScenarioError::EmptyFleet {
                name: self.name.clone(),
            });
        }
        for (index, group) in self.groups.iter().enumerate() {
            if group.count == 0 {
                return Err(ScenarioError::EmptyGroup {
                    name: self.name.clone(),
                    group: index,
                });
            }
        }

        let fleet_size = self.ship_count();
        for order in &self.orders {
            let ship = match order.command {
                FleetCommand::SetCourse { ship, .. } => Some(ship),
                FleetCommand::SetSpeed { ship, speed_kn } => {
                    if !speed_kn.is_finite() {
                        return Err(ScenarioError::NonFiniteSpeed {
                            at_tick: order.at_tick,
                        });
                    }
                    Some(ship)
                }
                FleetCommand::AllStop { ship } => Some(ship),
                FleetCommand::SetTimeScale { scale } => {
                    if !scale.is_finite() {
                        return Err(ScenarioError::NonFiniteTimeScale {
                            at_tick: order.at_tick,
                        });
                    }
                    None
                }
                FleetCommand::Pause | FleetCommand::Resume => None,
            };
            if let Some(ship) = ship {
                if ship >= fleet_size {
                    return Err(ScenarioError::UnknownShip {
                        at_tick: order.at_tick,
                        ship,
                        fleet_size,
                    });
                }
            }
        }
        Ok(())
    }
}

/// "Patrol Exercise" — two frigates work up to patrol speed, come about to
/// East together, then settle to cruise.
pub fn patrol_exercise() -> Scenario {
    Scenario {
        name: "Patrol Exercise".to_string(),
        groups: vec![ShipGroup {
            class: ShipClass::Frigate,
            count: 2,
            bearing_deg: 0.0,
            station_nm: 2.0,
            spacing_nm: 0.5,
        }],
        orders: vec![
            order(0, FleetCommand::SetSpeed { ship: 0, speed_kn: 24.0 }),
            order(0, FleetCommand::SetSpeed { ship: 1, speed_kn: 24.0 }),
            order(
                secs_to_ticks(60.0),
                FleetCommand::SetCourse {
                    ship: 0,
                    heading: Heading::from_bearing_deg(90.0),
                },
            ),
            order(
                secs_to_ticks(60.0),
                FleetCommand::SetCourse {
                    ship: 1,
                    heading: Heading::from_bearing_deg(90.0),
                },
            ),
            order(secs_to_ticks(120.0), FleetCommand::SetSpeed { ship: 0, speed_kn: 14.0 }),
            order(secs_to_ticks(120.0), FleetCommand::SetSpeed { ship: 1, speed_kn: 14.0 }),
        ],
    }
}

/// "Convoy Run" — an oiler with a destroyer escort turns onto a new leg,
/// then the watch fast-forwards the transit.
pub fn convoy_run() -> Scenario {
    let leg_bearing = 45.0;
    Scenario {
        name: "Convoy Run".to_string(),
        groups: vec![
            ShipGroup {
                class: ShipClass::FleetOiler,
                count: 1,
                bearing_deg: leg_bearing,
                station_nm: 0.0,
                spacing_nm: 0.0,
            },
            ShipGroup {
                class: ShipClass::Destroyer,
                count: 2,
                bearing_deg: leg_bearing,
                station_nm: 1.5,
                spacing_nm: 1.0,
            },
        ],
        orders: vec![
            order(0, FleetCommand::SetSpeed { ship: 0, speed_kn: 14.0 }),
            order(0, FleetCommand::SetSpeed { ship: 1, speed_kn: 14.0 }),
            order(0, FleetCommand::SetSpeed { ship: 2, speed_kn: 14.0 }),
            order(
                secs_to_ticks(90.0),
                FleetCommand::SetCourse {
                    ship: 0,
                    heading: Heading::from_bearing_deg(normalize_deg(leg_bearing + 60.0)),
                },
            ),
            order(
                secs_to_ticks(90.0),
                FleetCommand::SetCourse {
                    ship: 1,
                    heading: Heading::from_bearing_deg(normalize_deg(leg_bearing + 60.0)),
                },
            ),
            order(
                secs_to_ticks(90.0),
                FleetCommand::SetCourse {
                    ship: 2,
                    heading: Heading::from_bearing_deg(normalize_deg(leg_bearing + 60.0)),
                },
            ),
            order(secs_to_ticks(150.0), FleetCommand::SetTimeScale { scale: 4.0 }),
        ],
    }
}

fn order(at_tick: u64, command: FleetCommand) -> ScheduledOrder {
    ScheduledOrder { at_tick, command }
}

/// Convert real seconds at 1x into ticks.
fn secs_to_ticks(secs: f64) -> u64 {
    (secs * TICK_RATE as f64) as u64
}

fn normalize_deg(deg: f64) -> f64 {
    deg.to_radians().rem_euclid(TAU).to_degrees()
}
