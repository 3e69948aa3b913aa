//! The tracked-entity record.

use sw_core::{EntityId, Position};
use sw_motion::{Motion, MovementPattern};

use crate::{EntityKind, EntityMeta};

/// A simulated craft: identity, kinematic state, movement behavior, and the
/// rolling detection state maintained by the simulation loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id:       EntityId,
    pub kind:     EntityKind,
    pub position: Position,
    pub motion:   Motion,
    pub pattern:  MovementPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta:     EntityMeta,

    /// Unix timestamp of the most recent detection by any sensor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_detected: Option<f64>,

    /// Best detection confidence seen so far, in [0, 1].
    ///
    /// Monotone: only ever raised (to the max of the old value and a new
    /// detection's confidence).  Decay, if wanted, belongs to the
    /// surrounding system.
    #[cfg_attr(feature = "serde", serde(default))]
    pub confidence: f64,
}

impl Entity {
    pub fn new(
        id:       EntityId,
        kind:     EntityKind,
        position: Position,
        motion:   Motion,
        pattern:  MovementPattern,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            motion,
            pattern,
            meta: EntityMeta::default(),
            last_detected: None,
            confidence: 0.0,
        }
    }

    /// Attach metadata during construction.
    pub fn with_meta(mut self, meta: EntityMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Fold one successful detection into the rolling state.
    pub fn record_detection(&mut self, unix_time_secs: f64, confidence: f64) {
        self.last_detected = Some(unix_time_secs);
        self.confidence = self.confidence.max(confidence.clamp(0.0, 1.0));
    }
}
