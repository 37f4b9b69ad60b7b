//! Bounded heading rotation.
//!
//! Rotates a hull's facing toward a requested heading along the shortest
//! arc, capped by the hull's turn rate and the elapsed sim-hours. Never
//! overshoots: once the remaining arc fits inside the allowed step the
//! result snaps exactly onto the requested heading.

use flotilla_core::constants::HEADING_TOLERANCE_RAD;
use flotilla_core::types::Heading;
use glam::DQuat;

/// Result of one rotation step.
#[derive(Debug, Clone, Copy)]
pub struct HeadingStep {
    pub heading: Heading,
    /// True once the result equals the requested heading; callers use this
    /// to skip rotation work until a new heading is ordered.
    pub reached: bool,
}

/// Advance `current` toward `requested` by at most
/// `max_turn_rate_deg_per_hour * elapsed_hours` degrees.
///
/// Idempotent once the heading is reached: further calls return the
/// requested heading unchanged. Both arguments are unit vectors by
/// construction of [`Heading`]; a non-positive turn rate is a caller bug.
pub fn advance_heading(
    current: Heading,
    requested: Heading,
    max_turn_rate_deg_per_hour: f64,
    elapsed_hours: f64,
) -> HeadingStep {
    debug_assert!(
        max_turn_rate_deg_per_hour > 0.0,
        "turn rate must be positive, got {max_turn_rate_deg_per_hour}"
    );
    debug_assert!(elapsed_hours >= 0.0, "elapsed time cannot be negative");

    let remaining = current.angle_to(&requested);
    if remaining <= HEADING_TOLERANCE_RAD {
        return HeadingStep {
            heading: requested,
            reached: true,
        };
    }

    let max_step = max_turn_rate_deg_per_hour.to_radians() * elapsed_hours;
    if max_step >= remaining {
        // The whole arc fits in this step; land exactly on the target.
        return HeadingStep {
            heading: requested,
            reached: true,
        };
    }

    let cur = current.vec();
    let axis = cur.cross(requested.vec());
    // Antiparallel headings give a degenerate cross product; any axis
    // perpendicular to the current facing works for a 180-degree arc.
    let axis = if axis.length_squared() > f64::EPSILON {
        axis.normalize()
    } else {
        cur.any_orthonormal_vector()
    };

    let rotated = DQuat::from_axis_angle(axis, max_step) * cur;
    HeadingStep {
        heading: Heading::new(rotated.normalize()),
        reached: false,
    }
}
