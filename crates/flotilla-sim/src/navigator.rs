//! The navigator — per-hull facade over the helm control laws.
//!
//! Borrows one ship's components and mediates all access to its physical
//! state: orders update intent, the per-frame call rotates the facing, the
//! per-tick call selects and applies thrust, and the two clock reactions
//! keep reported speed correct across pause and rate changes.

use flotilla_core::components::{Attitude, Helm, KinematicProfile, ShipId};
use flotilla_core::constants::HOURS_PER_TICK;
use flotilla_core::enums::RegulationState;
use flotilla_core::events::HelmEvent;
use flotilla_core::types::{Heading, Velocity};
use flotilla_helm::heading;
use flotilla_helm::regulator::{self, SpeedOrderOutcome};
use glam::DVec3;
use tracing::{debug, warn};

/// Borrowed view of one hull's navigation state.
pub struct Navigator<'a> {
    pub ship: ShipId,
    pub profile: &'a mut KinematicProfile,
    pub helm: &'a mut Helm,
    pub attitude: &'a mut Attitude,
    pub velocity: &'a mut Velocity,
}

impl Navigator<'_> {
    /// Order a new heading. A repeat of the current intent is a warning and
    /// a no-op — re-issued orders must not restart the turn.
    pub fn change_heading(&mut self, requested: Heading) {
        if self.helm.intent.heading.approx_eq(&requested) {
            warn!(ship = self.ship.0, "duplicate course order ignored");
            return;
        }
        debug!(
            ship = self.ship.0,
            bearing = requested.bearing_deg(),
            "course ordered"
        );
        self.helm.intent.heading = requested;
        self.helm.turn_underway = true;
    }

    /// Order a new speed. Over-limit requests clamp to the hull's top
    /// speed (warned, and reported as an event); duplicates are ignored.
    pub fn change_speed(&mut self, requested_kn: f64) -> Option<HelmEvent> {
        match regulator::apply_speed_order(self.profile, self.helm.intent.speed_kn, requested_kn) {
            SpeedOrderOutcome::Duplicate { speed_kn } => {
                warn!(
                    ship = self.ship.0,
                    speed_kn, "duplicate speed order ignored"
                );
                None
            }
            SpeedOrderOutcome::Applied {
                speed_kn,
                clamped,
                bands,
            } => {
                debug!(ship = self.ship.0, speed_kn, "speed ordered");
                self.helm.intent.speed_kn = speed_kn;
                self.helm.bands = bands;
                if speed_kn == 0.0 {
                    self.helm.regulation = RegulationState::Idle;
                }
                if clamped {
                    warn!(
                        ship = self.ship.0,
                        requested_kn, clamped_kn = speed_kn, "speed order clamped to top speed"
                    );
                    Some(HelmEvent::OrderClamped {
                        ship: self.ship.0,
                        requested_kn,
                        clamped_kn: speed_kn,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Shorthand for ordering zero speed.
    pub fn all_stop(&mut self) -> Option<HelmEvent> {
        self.change_speed(0.0)
    }

    /// Advance the facing toward the ordered heading. Called once per
    /// rendered frame with the number of ticks that frame spanned.
    ///
    /// Returns whether a turn is still underway, plus a `CourseReached`
    /// event on the frame the turn completes. Cheap no-op once the heading
    /// has been reached.
    pub fn try_process_heading_change(
        &mut self,
        ticks_elapsed: u64,
        multiplier: f64,
    ) -> (bool, Option<HelmEvent>) {
        if !self.helm.turn_underway {
            return (false, None);
        }

        let elapsed_hours = ticks_elapsed as f64 * HOURS_PER_TICK * multiplier;
        let step = heading::advance_heading(
            self.attitude.facing,
            self.helm.intent.heading,
            self.profile.turn_rate_deg_per_hour(),
            elapsed_hours,
        );
        self.attitude.facing = step.heading;

        if step.reached {
            self.helm.turn_underway = false;
            let bearing_deg = step.heading.bearing_deg();
            debug!(ship = self.ship.0, bearing = bearing_deg, "course reached");
            (
                false,
                Some(HelmEvent::CourseReached {
                    ship: self.ship.0,
                    bearing_deg,
                }),
            )
        } else {
            (true, None)
        }
    }

    /// Select and apply thrust for one fixed physics step.
    ///
    /// The regulator measures base-rate speed (scaled-space speed divided
    /// by the clock multiplier) and returns a base-rate thrust; the force
    /// actually applied along the forward axis is that thrust scaled back
    /// up by the multiplier. Velocity integrates against linear drag, so
    /// the steady state lands exactly on `thrust / (mass * drag)`.
    ///
    /// Returns a `SpeedSettled` event on the tick the hull first enters the
    /// on-target band.
    pub fn apply_thrust_for_tick(&mut self, multiplier: f64) -> Option<HelmEvent> {
        // Frozen hulls experience no integration at all.
        if self.helm.pause_snapshot.is_some() {
            return None;
        }

        let measured_kn = self.velocity.speed() / multiplier;
        let requested_kn = self.helm.intent.speed_kn;
        let thrust_kn = regulator::thrust_for_tick(requested_kn, &self.helm.bands, measured_kn);

        let was = self.helm.regulation;
        let now = regulator::regulation_state(requested_kn, &self.helm.bands, measured_kn);
        self.helm.regulation = now;

        let accel = self.attitude.facing.vec() * (thrust_kn * multiplier / self.profile.mass_kt());
        let drag = self.velocity.0 * self.profile.drag_per_hour();
        self.velocity.0 += (accel - drag) * HOURS_PER_TICK;

        if now == RegulationState::OnTarget && was != RegulationState::OnTarget {
            Some(HelmEvent::SpeedSettled {
                ship: self.ship.0,
                speed_kn: requested_kn,
            })
        } else {
            None
        }
    }

    /// Pause-state reaction: freeze on pause (capture the velocity
    /// snapshot, zero the live velocity so nothing drifts), restore on
    /// resume.
    pub fn on_pause_changed(&mut self, paused: bool) {
        if paused {
            if self.helm.pause_snapshot.is_some() {
                warn!(ship = self.ship.0, "pause onset while already frozen");
                return;
            }
            self.helm.pause_snapshot = Some(*self.velocity);
            self.velocity.0 = DVec3::ZERO;
        } else {
            match self.helm.pause_snapshot.take() {
                Some(snapshot) => *self.velocity = snapshot,
                None => warn!(ship = self.ship.0, "resume without a pause snapshot"),
            }
        }
    }

    /// Rate-change reaction: rescale velocity immediately so reported speed
    /// tracks the new rate without waiting for the regulator to catch up.
    /// While frozen the stored snapshot is rescaled instead, so a later
    /// resume reflects the rate in force at that time.
    pub fn on_rate_changed(&mut self, old: f64, new: f64) {
        assert!(
            old > 0.0 && new > 0.0,
            "clock multipliers must be positive, got {old} -> {new}"
        );
        let ratio = new / old;
        match self.helm.pause_snapshot.as_mut() {
            Some(snapshot) => snapshot.0 *= ratio,
            None => self.velocity.0 *= ratio,
        }
    }
}
