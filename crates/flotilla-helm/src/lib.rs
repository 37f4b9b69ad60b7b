//! Helm control laws for FLOTILLA.
//!
//! Pure functions that compute thrust-band tables, bounded heading
//! rotation, and speed regulation. No ECS dependency — operates on plain
//! data; the sim crate's navigator wires these to hull components.

pub mod bands;
pub mod heading;
pub mod regulator;

pub use flotilla_core as core;
