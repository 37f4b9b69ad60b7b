//! Thrust-band computation — the precomputed actuation table behind the
//! speed regulator.
//!
//! Direct proportional thrust either oscillates around the target speed or
//! closes on it too slowly at this tick rate. Instead, each genuine speed
//! order precomputes a small table keyed by the current/requested speed
//! ratio; per-tick regulation is then a cheap band lookup.

use flotilla_core::components::{RatioBand, ThrustBands};
use flotilla_core::constants::*;
use tracing::debug;

/// Which ratio band a measured speed falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBand {
    /// Well under the ordered speed — full thrust.
    WayBelow,
    /// Holding the ordered speed — sustaining thrust.
    OnTarget,
    /// Marginally fast — eased thrust, decelerating gently under drag.
    SlightlyAbove,
    /// Far too fast — no thrust, coast until drag bleeds it off.
    WayAbove,
}

/// Build the thrust table for an ordered speed.
///
/// `thrust_to_sustain_kn` is the thrust holding that speed against drag
/// (`speed * mass * drag`). Both stored thrusts are clamped to
/// `max_thrust_kn` and never exceed it. An order of zero speed yields the
/// all-zero table.
///
/// Deterministic and side-effect free — cheap enough to call on every
/// speed-change event.
pub fn compute_bands(requested_speed_kn: f64, thrust_to_sustain_kn: f64, max_thrust_kn: f64) -> ThrustBands {
    if requested_speed_kn <= 0.0 {
        return ThrustBands::no_thrust();
    }

    ThrustBands {
        way_below: RatioBand::new(0.0, ON_TARGET_RATIO_LO),
        on_target: RatioBand::new(ON_TARGET_RATIO_LO, ON_TARGET_RATIO_HI),
        slightly_above: RatioBand::new(ON_TARGET_RATIO_HI, ABOVE_TARGET_RATIO_HI),
        way_above: RatioBand::new(ABOVE_TARGET_RATIO_HI, WAY_ABOVE_RATIO_CEILING),
        thrust_at_target_kn: thrust_to_sustain_kn.min(max_thrust_kn),
        thrust_when_above_kn: (thrust_to_sustain_kn / ABOVE_TARGET_RATIO_HI).min(max_thrust_kn),
        max_thrust_kn,
    }
}

/// Classify a speed ratio. `None` means the ratio escaped every defined
/// band (at or beyond the way-above ceiling).
pub fn classify_ratio(bands: &ThrustBands, ratio: f64) -> Option<SpeedBand> {
    if bands.way_below.contains(ratio) {
        Some(SpeedBand::WayBelow)
    } else if bands.on_target.contains(ratio) {
        Some(SpeedBand::OnTarget)
    } else if bands.slightly_above.contains(ratio) {
        Some(SpeedBand::SlightlyAbove)
    } else if bands.way_above.contains(ratio) {
        Some(SpeedBand::WayAbove)
    } else {
        None
    }
}

/// Thrust for a speed ratio. Ratios outside every band fall back to zero
/// thrust — regulation re-evaluates every tick, so a transient zero
/// self-corrects.
pub fn thrust_for_ratio(bands: &ThrustBands, ratio: f64) -> f64 {
    match classify_ratio(bands, ratio) {
        Some(SpeedBand::WayBelow) => bands.max_thrust_kn,
        Some(SpeedBand::OnTarget) => bands.thrust_at_target_kn,
        Some(SpeedBand::SlightlyAbove) => bands.thrust_when_above_kn,
        Some(SpeedBand::WayAbove) => 0.0,
        None => {
            debug!(ratio, "speed ratio outside every band, coasting");
            0.0
        }
    }
}
