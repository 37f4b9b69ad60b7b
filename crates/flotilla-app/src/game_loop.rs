//! Simulation drive loop.
//!
//! Free-running by default (as fast as the engine ticks); in realtime mode
//! the loop sleeps to hold the fixed tick rate. The time-scale multiplier
//! does not change the loop cadence — fast-forward happens inside the
//! physics, so frames stay at the same real rate.

use std::time::{Duration, Instant};

use tracing::info;

use flotilla_core::constants::TICK_RATE;
use flotilla_sim::SimulationEngine;

/// Real duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks between fleet status log lines (10 seconds of real time).
const STATUS_INTERVAL: u64 = 300;

/// Run the engine for `ticks` ticks, logging helm events and periodic
/// status.
pub fn run(mut engine: SimulationEngine, ticks: u64, realtime: bool) {
    let mut next_tick_time = Instant::now();

    for i in 0..ticks {
        let snapshot = engine.tick();

        for event in &snapshot.events {
            info!(?event, "helm");
        }

        if i % STATUS_INTERVAL == 0 {
            for ship in &snapshot.ships {
                info!(
                    ship = ship.ship,
                    class = ?ship.class,
                    bearing = ship.bearing_deg,
                    speed = ship.speed_kn,
                    ordered = ship.requested_speed_kn,
                    state = ?ship.regulation,
                    "status"
                );
            }
        }

        if realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind — reset to avoid a catch-up spiral.
                next_tick_time = now;
            }
        }
    }

    info!(ticks, elapsed_hours = engine.time().elapsed_hours, "run complete");
}
