//! Fleet state snapshot — the complete visible state produced each tick.
//!
//! Snapshots are the interface to the presentation layer (status text,
//! fleet roll-ups); the core only assembles the data.

use serde::{Deserialize, Serialize};

use crate::enums::{RegulationState, ShipClass};
use crate::events::HelmEvent;
use crate::types::{Position, SimTime};

/// Complete fleet state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub time: SimTime,
    pub clock: ClockView,
    /// Per-ship status, sorted by ship id.
    pub ships: Vec<ShipView>,
    /// Helm events raised this tick.
    pub events: Vec<HelmEvent>,
}

/// Simulation clock status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockView {
    pub multiplier: f64,
    pub paused: bool,
}

impl Default for ClockView {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            paused: false,
        }
    }
}

/// One ship's visible status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub ship: u32,
    pub class: ShipClass,
    pub position: Position,
    /// Current facing as a compass bearing (degrees).
    pub bearing_deg: f64,
    /// Current speed in base-rate knots (normalized by the clock
    /// multiplier, so the displayed value matches the ordered scale).
    pub speed_kn: f64,
    /// Ordered speed in knots.
    pub requested_speed_kn: f64,
    /// Ordered facing as a compass bearing (degrees).
    pub requested_bearing_deg: f64,
    pub regulation: RegulationState,
    pub turn_underway: bool,
}
