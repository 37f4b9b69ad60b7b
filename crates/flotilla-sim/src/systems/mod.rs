//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` for the
//! read-only snapshot builder). They own no state — all state lives in
//! components, the clock, and the engine.

pub mod clock_adaptation;
pub mod helm;
pub mod movement;
pub mod propulsion;
pub mod snapshot;
