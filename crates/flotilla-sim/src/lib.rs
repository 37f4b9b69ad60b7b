//! Simulation engine for FLOTILLA.
//!
//! Owns the hecs ECS world and the simulation clock, runs the helm and
//! propulsion systems at a fixed tick rate, and produces FleetSnapshots
//! for the presentation layer.

pub mod clock;
pub mod engine;
pub mod navigator;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use flotilla_core as core;

#[cfg(test)]
mod tests;
