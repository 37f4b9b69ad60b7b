//! Fleet commands sent from the order source to the simulation.
//!
//! Commands are validated at this boundary (heading normalization is
//! enforced by the `Heading` type on deserialize) and queued for processing
//! at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Heading;

/// All possible orders the simulation accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FleetCommand {
    // --- Per-ship navigation ---
    /// Turn a ship to a new heading at its bounded turn rate.
    SetCourse { ship: u32, heading: Heading },
    /// Regulate a ship toward a new speed (knots). Values above the hull's
    /// top speed are clamped, not rejected.
    SetSpeed { ship: u32, speed_kn: f64 },
    /// Shorthand for ordering zero speed.
    AllStop { ship: u32 },

    // --- Simulation control ---
    /// Pause the simulation; every hull freezes in place.
    Pause,
    /// Resume from pause.
    Resume,
    /// Change the time-scale multiplier (clamped to the allowed range).
    SetTimeScale { scale: f64 },
}
