//! The simulation clock — time-scale multiplier and pause flag.
//!
//! The engine is the single authority over this state; every transition
//! produces an explicit [`ClockEvent`] that the engine dispatches to each
//! hull's clock adaptation before the next tick's thrust computation. The
//! rest of the core only ever reads it.

use flotilla_core::constants::{DEFAULT_TIME_SCALE, TIME_SCALE_MAX, TIME_SCALE_MIN};
use tracing::{debug, warn};

/// Process-wide clock state observed by every hull.
#[derive(Debug, Clone)]
pub struct SimClock {
    multiplier: f64,
    paused: bool,
}

/// A clock transition to fan out to every hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockEvent {
    /// The time-scale multiplier changed. Both values are positive.
    RateChanged { old: f64, new: f64 },
    Paused,
    Resumed,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_TIME_SCALE,
            paused: false,
        }
    }
}

impl SimClock {
    /// Clamps into the allowed range; the multiplier is never zero or
    /// negative, so rate-change ratios are always well-defined.
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: multiplier.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX),
            paused: false,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Request a new multiplier. Returns the transition to dispatch, or
    /// `None` when the clamped value matches the current one (a duplicate —
    /// logged, not an error).
    pub fn set_multiplier(&mut self, requested: f64) -> Option<ClockEvent> {
        let new = requested.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX);
        if new != requested {
            debug!(requested, clamped = new, "time scale clamped");
        }
        if new == self.multiplier {
            warn!(multiplier = new, "duplicate time-scale request ignored");
            return None;
        }
        let old = self.multiplier;
        self.multiplier = new;
        Some(ClockEvent::RateChanged { old, new })
    }

    /// Request a pause-state change. `None` when already in that state.
    pub fn set_paused(&mut self, paused: bool) -> Option<ClockEvent> {
        if paused == self.paused {
            warn!(paused, "duplicate pause request ignored");
            return None;
        }
        self.paused = paused;
        Some(if paused {
            ClockEvent::Paused
        } else {
            ClockEvent::Resumed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_change_event_carries_old_and_new() {
        let mut clock = SimClock::default();
        match clock.set_multiplier(2.0) {
            Some(ClockEvent::RateChanged { old, new }) => {
                assert_eq!(old, 1.0);
                assert_eq!(new, 2.0);
            }
            other => panic!("expected RateChanged, got {other:?}"),
        }
        assert_eq!(clock.multiplier(), 2.0);
    }

    #[test]
    fn test_duplicate_rate_is_ignored() {
        let mut clock = SimClock::default();
        assert!(clock.set_multiplier(1.0).is_none());
    }

    #[test]
    fn test_multiplier_clamped_positive() {
        let mut clock = SimClock::default();
        match clock.set_multiplier(0.0) {
            Some(ClockEvent::RateChanged { new, .. }) => {
                assert_eq!(new, TIME_SCALE_MIN);
            }
            other => panic!("expected clamped RateChanged, got {other:?}"),
        }
        assert!(clock.multiplier() > 0.0);

        clock.set_multiplier(100.0);
        assert_eq!(clock.multiplier(), TIME_SCALE_MAX);
    }

    #[test]
    fn test_pause_transitions() {
        let mut clock = SimClock::default();
        assert_eq!(clock.set_paused(true), Some(ClockEvent::Paused));
        assert!(clock.is_paused());
        assert!(clock.set_paused(true).is_none());
        assert_eq!(clock.set_paused(false), Some(ClockEvent::Resumed));
        assert!(!clock.is_paused());
    }
}
