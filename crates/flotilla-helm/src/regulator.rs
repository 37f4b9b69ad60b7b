//! Speed regulation — order intake and per-tick thrust selection.
//!
//! Clock-rate-agnostic: callers measure current speed in base-rate knots
//! (scaled-space speed divided by the clock multiplier) and scale the
//! returned thrust back up on application.

use flotilla_core::components::{KinematicProfile, ThrustBands};
use flotilla_core::constants::{ON_TARGET_RATIO_HI, ON_TARGET_RATIO_LO};
use flotilla_core::enums::RegulationState;

use crate::bands::{self, SpeedBand};

/// Outcome of applying a speed order.
#[derive(Debug, Clone, Copy)]
pub enum SpeedOrderOutcome {
    /// The order took effect; the intent and band table should be replaced.
    Applied {
        /// Ordered speed after clamping to `[0, max_speed]`.
        speed_kn: f64,
        /// True when the raw request exceeded the hull's top speed.
        clamped: bool,
        bands: ThrustBands,
    },
    /// The order matched the existing intent within the on-target ratio and
    /// was ignored — no band recomputation.
    Duplicate { speed_kn: f64 },
}

/// Validate a speed order against the previous intent and, if genuine,
/// produce the clamped speed and its rebuilt thrust table.
///
/// Requests above the hull's top speed clamp rather than reject — the
/// order's intent (go as fast as you can toward that speed) is preserved.
/// Near-identical repeats of the current order are duplicates: re-issued
/// orders are routine and must not churn the band table.
pub fn apply_speed_order(
    profile: &mut KinematicProfile,
    previous_kn: f64,
    requested_kn: f64,
) -> SpeedOrderOutcome {
    assert!(
        requested_kn.is_finite(),
        "requested speed must be finite, got {requested_kn}"
    );

    let max_speed = profile.max_speed_kn();
    let speed_kn = requested_kn.clamp(0.0, max_speed);
    let clamped = speed_kn != requested_kn;

    let duplicate = if previous_kn > 0.0 {
        let ratio = speed_kn / previous_kn;
        (ON_TARGET_RATIO_LO..ON_TARGET_RATIO_HI).contains(&ratio)
    } else {
        speed_kn == 0.0
    };
    if duplicate {
        return SpeedOrderOutcome::Duplicate { speed_kn };
    }

    let sustain = profile.thrust_to_sustain_kn(speed_kn);
    SpeedOrderOutcome::Applied {
        speed_kn,
        clamped,
        bands: bands::compute_bands(speed_kn, sustain, profile.max_thrust_kn()),
    }
}

/// Thrust to apply this tick, in base-rate kilonewton-equivalents.
pub fn thrust_for_tick(requested_kn: f64, bands: &ThrustBands, current_kn: f64) -> f64 {
    if requested_kn <= 0.0 {
        return 0.0;
    }
    bands::thrust_for_ratio(bands, current_kn / requested_kn)
}

/// Regulation state implied by the current speed ratio. Deceleration is
/// emergent (reduced or zero thrust under drag) — there is no braking
/// actuation behind the `Decelerating` label.
pub fn regulation_state(requested_kn: f64, bands: &ThrustBands, current_kn: f64) -> RegulationState {
    if requested_kn <= 0.0 {
        return RegulationState::Idle;
    }
    match bands::classify_ratio(bands, current_kn / requested_kn) {
        Some(SpeedBand::WayBelow) => RegulationState::Accelerating,
        Some(SpeedBand::OnTarget) => RegulationState::OnTarget,
        Some(SpeedBand::SlightlyAbove) | Some(SpeedBand::WayAbove) | None => {
            RegulationState::Decelerating
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> KinematicProfile {
        // max speed = 100 / (10 * 1) = 10 knots
        KinematicProfile::new(10.0, 1.0, 100.0, 2400.0)
    }

    /// The worked scenario: mass 10, drag 1, max thrust 100 => top speed 10.
    /// Ordering 5 knots sustains at 50; ratio 1.0 -> 50, ratio 1.2 -> 0,
    /// ratio 0.4 -> full 100.
    #[test]
    fn test_concrete_scenario() {
        let mut profile = test_profile();
        let outcome = apply_speed_order(&mut profile, 0.0, 5.0);
        let bands = match outcome {
            SpeedOrderOutcome::Applied { speed_kn, clamped, bands } => {
                assert_eq!(speed_kn, 5.0);
                assert!(!clamped);
                bands
            }
            SpeedOrderOutcome::Duplicate { .. } => panic!("order should apply"),
        };
        assert!((bands.thrust_at_target_kn - 50.0).abs() < 1e-12);

        assert!((thrust_for_tick(5.0, &bands, 5.0) - 50.0).abs() < 1e-12);
        assert_eq!(thrust_for_tick(5.0, &bands, 6.0), 0.0);
        assert_eq!(thrust_for_tick(5.0, &bands, 2.0), 100.0);
    }

    /// Over-limit orders clamp to top speed; repeating the clamped value is
    /// then a duplicate with no band recomputation.
    #[test]
    fn test_clamp_then_duplicate() {
        let mut profile = test_profile();
        let outcome = apply_speed_order(&mut profile, 0.0, 25.0);
        match outcome {
            SpeedOrderOutcome::Applied { speed_kn, clamped, .. } => {
                assert_eq!(speed_kn, 10.0);
                assert!(clamped);
            }
            SpeedOrderOutcome::Duplicate { .. } => panic!("first order should apply"),
        }

        match apply_speed_order(&mut profile, 10.0, 10.0) {
            SpeedOrderOutcome::Duplicate { speed_kn } => assert_eq!(speed_kn, 10.0),
            SpeedOrderOutcome::Applied { .. } => panic!("exact repeat must be a duplicate"),
        }
    }

    /// Near-identical repeats (within the on-target ratio) are duplicates;
    /// a genuinely different order is not.
    #[test]
    fn test_near_duplicate_window() {
        let mut profile = test_profile();
        match apply_speed_order(&mut profile, 8.0, 8.05) {
            SpeedOrderOutcome::Duplicate { .. } => {}
            SpeedOrderOutcome::Applied { .. } => panic!("8.05 after 8.0 is within tolerance"),
        }
        match apply_speed_order(&mut profile, 8.0, 9.0) {
            SpeedOrderOutcome::Applied { speed_kn, .. } => assert_eq!(speed_kn, 9.0),
            SpeedOrderOutcome::Duplicate { .. } => panic!("9.0 after 8.0 is a real change"),
        }
    }

    #[test]
    fn test_stop_order_after_way_is_on() {
        let mut profile = test_profile();
        match apply_speed_order(&mut profile, 8.0, 0.0) {
            SpeedOrderOutcome::Applied { speed_kn, bands, .. } => {
                assert_eq!(speed_kn, 0.0);
                assert_eq!(bands.thrust_at_target_kn, 0.0);
            }
            SpeedOrderOutcome::Duplicate { .. } => panic!("all stop is a real change"),
        }
        // Repeating all-stop while already stopped is a duplicate.
        match apply_speed_order(&mut profile, 0.0, 0.0) {
            SpeedOrderOutcome::Duplicate { .. } => {}
            SpeedOrderOutcome::Applied { .. } => panic!("stop while stopped is a duplicate"),
        }
    }

    #[test]
    fn test_zero_request_yields_zero_thrust() {
        let bands = ThrustBands::no_thrust();
        assert_eq!(thrust_for_tick(0.0, &bands, 3.0), 0.0);
    }

    #[test]
    fn test_regulation_states() {
        let mut profile = test_profile();
        let bands = match apply_speed_order(&mut profile, 0.0, 5.0) {
            SpeedOrderOutcome::Applied { bands, .. } => bands,
            _ => unreachable!(),
        };
        assert_eq!(regulation_state(5.0, &bands, 2.0), RegulationState::Accelerating);
        assert_eq!(regulation_state(5.0, &bands, 5.0), RegulationState::OnTarget);
        assert_eq!(regulation_state(5.0, &bands, 5.3), RegulationState::Decelerating);
        assert_eq!(regulation_state(5.0, &bands, 30.0), RegulationState::Decelerating);
        assert_eq!(regulation_state(0.0, &bands, 3.0), RegulationState::Idle);
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn test_non_finite_request_is_a_bug() {
        let mut profile = test_profile();
        let _ = apply_speed_order(&mut profile, 0.0, f64::NAN);
    }
}
