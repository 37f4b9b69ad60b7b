//! Fundamental geometric and simulation types.
//!
//! The simulation frame is x = East, y = North, z = Up; surface hulls keep
//! z at 0. Positions are in nautical miles, speeds in knots, simulation
//! time in hours. Compass bearings are measured from North, clockwise.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{HOURS_PER_TICK, UNIT_LENGTH_TOLERANCE};

/// World position of a hull (nautical miles).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// World-space velocity of a hull (knots).
///
/// At clock multiplier `k` the stored vector lives in k-scaled space: it is
/// `k` times the base-rate velocity, so positions integrated with the raw
/// tick duration advance `k` times as fast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Error returned when a raw vector fails the unit-length contract.
#[derive(Debug, Clone, thiserror::Error)]
#[error("heading vector is not unit length (|v| = {length})")]
pub struct NotUnitLength {
    pub length: f64,
}

/// Unit-length direction vector — the facing of a hull, or the facing an
/// order requests.
///
/// Normalization is an invariant of the type: `new` asserts it (callers
/// passing a non-unit vector have a bug), while the serde boundary and
/// `TryFrom` reject bad data with [`NotUnitLength`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DVec3", into = "DVec3")]
pub struct Heading(DVec3);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in hours. Advances faster under a clock
    /// multiplier above 1 and not at all while paused.
    pub elapsed_hours: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Range to another position in nautical miles.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Compass bearing to another position in degrees.
    pub fn bearing_deg_to(&self, other: &Position) -> f64 {
        let d = other.0 - self.0;
        d.x.atan2(d.y).rem_euclid(std::f64::consts::TAU).to_degrees()
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    pub const ZERO: Velocity = Velocity(DVec3::ZERO);

    /// Speed magnitude in knots (scaled space — divide by the clock
    /// multiplier for the base-rate speed).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl Heading {
    /// Wrap an already-normalized vector. Panics if the vector is not unit
    /// length — a non-normalized heading is a caller bug, not a runtime
    /// condition.
    pub fn new(v: DVec3) -> Self {
        assert!(
            (v.length() - 1.0).abs() <= UNIT_LENGTH_TOLERANCE,
            "heading must be a unit vector, |v| = {}",
            v.length()
        );
        Self(v)
    }

    /// Heading due North.
    pub const NORTH: Heading = Heading(DVec3::Y);

    /// Heading from a compass bearing in degrees (0 = North, clockwise).
    pub fn from_bearing_deg(bearing_deg: f64) -> Self {
        let rad = bearing_deg.to_radians();
        Self(DVec3::new(rad.sin(), rad.cos(), 0.0))
    }

    /// The underlying unit vector.
    pub fn vec(&self) -> DVec3 {
        self.0
    }

    /// Compass bearing in degrees.
    pub fn bearing_deg(&self) -> f64 {
        self.0
            .x
            .atan2(self.0.y)
            .rem_euclid(std::f64::consts::TAU)
            .to_degrees()
    }

    /// Unsigned angle to another heading in radians.
    pub fn angle_to(&self, other: &Heading) -> f64 {
        self.0.angle_between(other.0)
    }

    /// Whether two headings point the same way within the shared tolerance.
    pub fn approx_eq(&self, other: &Heading) -> bool {
        self.angle_to(other) <= crate::constants::HEADING_TOLERANCE_RAD
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self::NORTH
    }
}

impl TryFrom<DVec3> for Heading {
    type Error = NotUnitLength;

    fn try_from(v: DVec3) -> Result<Self, Self::Error> {
        let length = v.length();
        if (length - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
            return Err(NotUnitLength { length });
        }
        Ok(Self(v))
    }
}

impl From<Heading> for DVec3 {
    fn from(h: Heading) -> DVec3 {
        h.0
    }
}

impl SimTime {
    /// Advance by one tick under the given clock multiplier.
    pub fn advance(&mut self, multiplier: f64) {
        self.tick += 1;
        self.elapsed_hours += HOURS_PER_TICK * multiplier;
    }
}
