//! The entity motion vector: heading and ground speed.

use sw_core::wrap_heading_deg;

/// Heading and speed of a moving entity.
///
/// Heading is normalized to [0, 360) on construction; speed is metres per
/// second and never negative.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Motion {
    pub heading_deg: f64,
    pub speed_ms:    f64,
}

impl Motion {
    pub fn new(heading_deg: f64, speed_ms: f64) -> Self {
        Self {
            heading_deg: wrap_heading_deg(heading_deg),
            speed_ms:    speed_ms.max(0.0),
        }
    }

    /// `true` when the entity covers ground this tick.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed_ms > 0.0
    }
}
