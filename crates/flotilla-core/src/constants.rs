//! Simulation constants and tuning parameters.

/// Simulation tick rate at 1x speed (ticks per real second).
pub const TICK_RATE: u32 = 30;

/// Simulation hours per tick — one tick is 30 sim-seconds at 1x.
pub const HOURS_PER_TICK: f64 = 1.0 / 120.0;

// --- Speed-ratio bands ---
//
// The thrust regulator partitions current/requested speed into fixed bands
// rather than computing a proportional response (which oscillates at this
// tick rate). Edges are shared configuration constants, not derived.

/// Lower edge of the on-target band.
pub const ON_TARGET_RATIO_LO: f64 = 0.99;

/// Upper edge of the on-target band; lower edge of slightly-above.
pub const ON_TARGET_RATIO_HI: f64 = 1.01;

/// Upper edge of the slightly-above band; lower edge of way-above.
/// Also the divisor producing the reduced thrust used while slightly above
/// the ordered speed.
pub const ABOVE_TARGET_RATIO_HI: f64 = 1.10;

/// Upper edge of the way-above (coast under drag) band. Ratios beyond this
/// fall through to the defensive zero-thrust fallback.
pub const WAY_ABOVE_RATIO_CEILING: f64 = 10.0;

// --- Headings ---

/// Angular tolerance below which two headings are considered equal
/// (duplicate-order detection and turn completion).
pub const HEADING_TOLERANCE_RAD: f64 = 1e-6;

/// Tolerance on |v| for the unit-length contract of a heading vector.
pub const UNIT_LENGTH_TOLERANCE: f64 = 1e-6;

// --- Clock ---

/// Slowest allowed time-scale multiplier. The multiplier is never zero or
/// negative — rate-change arithmetic divides by the previous value.
pub const TIME_SCALE_MIN: f64 = 0.25;

/// Fastest allowed time-scale multiplier.
pub const TIME_SCALE_MAX: f64 = 8.0;

/// Multiplier at engine start.
pub const DEFAULT_TIME_SCALE: f64 = 1.0;
