//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hull class — determines the kinematic profile a ship spawns with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// Light, agile escort.
    Corvette,
    /// General-purpose escort.
    #[default]
    Frigate,
    /// Heavy escort, slower to turn.
    Destroyer,
    /// Replenishment oiler — ponderous, low top speed.
    FleetOiler,
}

/// Speed-regulation state of a hull, derived each tick from the ratio of
/// current to requested speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegulationState {
    /// No speed ordered.
    #[default]
    Idle,
    /// Below the ordered speed, thrusting to close the gap.
    Accelerating,
    /// Above the ordered speed, coasting or easing off under drag.
    Decelerating,
    /// Holding the ordered speed.
    OnTarget,
}
