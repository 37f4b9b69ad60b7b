//! Events emitted by the helm for UI and order-source feedback.

use serde::{Deserialize, Serialize};

/// Helm events drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HelmEvent {
    /// A hull finished rotating onto its ordered heading.
    CourseReached { ship: u32, bearing_deg: f64 },
    /// A hull entered the on-target speed band.
    SpeedSettled { ship: u32, speed_kn: f64 },
    /// A speed order exceeded the hull's top speed and was clamped.
    OrderClamped {
        ship: u32,
        requested_kn: f64,
        clamped_kn: f64,
    },
}
