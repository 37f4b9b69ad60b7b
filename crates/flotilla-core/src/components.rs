//! ECS components for hecs entities.
//!
//! Components are plain data structs with no simulation logic. Control
//! behavior lives in the helm algorithms and the sim systems.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::RegulationState;
use crate::types::{Heading, Velocity};

/// Marks an entity as a ship hull under navigation control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull;

/// Stable ship identifier, assigned at spawn and used by fleet commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Physical orientation of the hull. This is the authoritative current
/// facing — requested headings live in [`NavigationIntent`], and the helm
/// rotates this toward them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub facing: Heading,
}

/// Mass, drag, and propulsive limits of a hull.
///
/// The derived top speed `max_thrust / (mass * drag)` is computed lazily and
/// cached; the cache is invalidated whenever `max_thrust` changes, so the
/// fields stay private behind accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicProfile {
    /// Displacement in kilotonnes.
    mass_kt: f64,
    /// Linear drag coefficient (per hour). Steady-state speed under a
    /// sustained thrust F is F / (mass * drag).
    drag_per_hour: f64,
    /// Maximum propulsive output (kilonewton-equivalents).
    max_thrust_kn: f64,
    /// Maximum turn rate in degrees per sim-hour.
    turn_rate_deg_per_hour: f64,
    #[serde(skip)]
    max_speed_cache: Option<f64>,
}

impl KinematicProfile {
    /// Panics on non-positive mass, drag, or turn rate and on a negative
    /// thrust limit — those are caller bugs, not runtime conditions.
    pub fn new(mass_kt: f64, drag_per_hour: f64, max_thrust_kn: f64, turn_rate_deg_per_hour: f64) -> Self {
        assert!(mass_kt > 0.0, "mass must be positive, got {mass_kt}");
        assert!(drag_per_hour > 0.0, "drag must be positive, got {drag_per_hour}");
        assert!(max_thrust_kn >= 0.0, "max thrust must be non-negative, got {max_thrust_kn}");
        assert!(
            turn_rate_deg_per_hour > 0.0,
            "turn rate must be positive, got {turn_rate_deg_per_hour}"
        );
        Self {
            mass_kt,
            drag_per_hour,
            max_thrust_kn,
            turn_rate_deg_per_hour,
            max_speed_cache: None,
        }
    }

    pub fn mass_kt(&self) -> f64 {
        self.mass_kt
    }

    pub fn drag_per_hour(&self) -> f64 {
        self.drag_per_hour
    }

    pub fn max_thrust_kn(&self) -> f64 {
        self.max_thrust_kn
    }

    pub fn turn_rate_deg_per_hour(&self) -> f64 {
        self.turn_rate_deg_per_hour
    }

    /// Top sustainable speed in knots, cached until `set_max_thrust_kn`.
    pub fn max_speed_kn(&mut self) -> f64 {
        match self.max_speed_cache {
            Some(v) => v,
            None => {
                let v = self.max_thrust_kn / (self.mass_kt * self.drag_per_hour);
                self.max_speed_cache = Some(v);
                v
            }
        }
    }

    /// Change the thrust limit (battle damage, refit) and invalidate the
    /// cached top speed.
    pub fn set_max_thrust_kn(&mut self, max_thrust_kn: f64) {
        assert!(max_thrust_kn >= 0.0, "max thrust must be non-negative, got {max_thrust_kn}");
        self.max_thrust_kn = max_thrust_kn;
        self.max_speed_cache = None;
    }

    /// Thrust required to hold `speed_kn` against drag.
    pub fn thrust_to_sustain_kn(&self, speed_kn: f64) -> f64 {
        speed_kn * self.mass_kt * self.drag_per_hour
    }
}

/// The navigation target set by the most recent orders. Mutated only
/// through the navigator's command API; the hull's actual facing and speed
/// converge toward these.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NavigationIntent {
    /// Ordered facing (unit vector, enforced by [`Heading`]).
    pub heading: Heading,
    /// Ordered speed in knots, clamped to the hull's top speed on write.
    pub speed_kn: f64,
}

/// Half-open ratio interval `[lo, hi)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioBand {
    pub lo: f64,
    pub hi: f64,
}

impl RatioBand {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.lo && ratio < self.hi
    }
}

/// Precomputed thrust selection table, rebuilt whenever the ordered speed
/// genuinely changes.
///
/// The bands partition current/requested speed ratio; each lookup returns a
/// fixed thrust instead of a continuously computed proportional response.
/// Invariant: no stored thrust exceeds `max_thrust_kn` (clamped at
/// construction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrustBands {
    pub way_below: RatioBand,
    pub on_target: RatioBand,
    pub slightly_above: RatioBand,
    pub way_above: RatioBand,
    /// Thrust holding the ordered speed against drag.
    pub thrust_at_target_kn: f64,
    /// Reduced thrust applied while slightly above the ordered speed —
    /// easing off instead of cutting to zero avoids oscillation around the
    /// target.
    pub thrust_when_above_kn: f64,
    pub max_thrust_kn: f64,
}

impl ThrustBands {
    /// Band set for "no speed ordered": every lookup yields zero thrust.
    pub fn no_thrust() -> Self {
        Self {
            way_below: RatioBand::new(0.0, ON_TARGET_RATIO_LO),
            on_target: RatioBand::new(ON_TARGET_RATIO_LO, ON_TARGET_RATIO_HI),
            slightly_above: RatioBand::new(ON_TARGET_RATIO_HI, ABOVE_TARGET_RATIO_HI),
            way_above: RatioBand::new(ABOVE_TARGET_RATIO_HI, WAY_ABOVE_RATIO_CEILING),
            thrust_at_target_kn: 0.0,
            thrust_when_above_kn: 0.0,
            max_thrust_kn: 0.0,
        }
    }
}

impl Default for ThrustBands {
    fn default() -> Self {
        Self::no_thrust()
    }
}

/// Per-hull navigation state: intent, the precomputed thrust table, and the
/// transient turn/pause bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Helm {
    pub intent: NavigationIntent,
    pub bands: ThrustBands,
    pub regulation: RegulationState,
    /// True while the hull is still rotating toward the ordered heading.
    pub turn_underway: bool,
    /// Velocity captured at pause onset. `Some` means the hull is frozen:
    /// live velocity is zeroed and integration is skipped until resume
    /// restores (and possibly rescales) this snapshot.
    pub pause_snapshot: Option<Velocity>,
}

impl Helm {
    /// Helm for a freshly spawned hull: intent matches the spawn facing,
    /// no speed ordered.
    pub fn new(facing: Heading) -> Self {
        Self {
            intent: NavigationIntent {
                heading: facing,
                speed_kn: 0.0,
            },
            bands: ThrustBands::no_thrust(),
            regulation: RegulationState::Idle,
            turn_underway: false,
            pause_snapshot: None,
        }
    }
}
