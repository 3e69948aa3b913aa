//! Detection records: what a sensor reports when it sees something.

use sw_core::{EntityId, Position, SensorId};

use crate::SensorKind;

/// Per-detection diagnostic fields.
///
/// Typed rather than a free-form map: every diagnostic a sensor model can
/// emit is enumerated here, and each model fills only the fields it owns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionMeta {
    pub sensor_kind: SensorKind,

    /// True sensor-to-entity ground distance at evaluation time.
    /// `None` for false alarms, which have no real target.
    pub range_m: Option<f64>,

    /// Radar: estimated cross-section used for the detection roll.
    pub rcs_m2: Option<f64>,

    /// Acoustic: estimated source level at the emitter, 0–1.
    pub sound_level: Option<f64>,

    /// Acoustic: signal-to-noise ratio at the sensor.
    pub snr: Option<f64>,

    /// ADS-B: broadcast identity (callsign when the entity has one).
    pub transponder_id: Option<String>,

    /// Set on radar clutter returns generated without any real target.
    pub false_alarm: bool,
}

impl DetectionMeta {
    pub fn new(sensor_kind: SensorKind) -> Self {
        Self {
            sensor_kind,
            range_m:        None,
            rcs_m2:         None,
            sound_level:    None,
            snr:            None,
            transponder_id: None,
            false_alarm:    false,
        }
    }
}

/// The sensor-model half of a detection: everything except who/when, which
/// the simulation loop fills in when it turns outcomes into [`Detection`]s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionOutcome {
    /// Detection confidence in [0, 1].
    pub confidence: f64,
    /// Entity position as measured, including sensor error.
    pub reported_position: Position,
    pub meta: DetectionMeta,
}

/// One detection event.  Append-only: created once per successful
/// evaluation, never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// The detected entity, or [`EntityId::INVALID`] for a false alarm.
    pub entity_id: EntityId,
    pub sensor_id: SensorId,
    pub unix_time_secs: f64,
    pub reported_position: Position,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub meta: DetectionMeta,
}

impl Detection {
    /// Stamp a sensor outcome with its attribution and time.
    pub fn from_outcome(
        entity_id: EntityId,
        sensor_id: SensorId,
        unix_time_secs: f64,
        outcome: DetectionOutcome,
    ) -> Self {
        Self {
            entity_id,
            sensor_id,
            unix_time_secs,
            reported_position: outcome.reported_position,
            confidence: outcome.confidence,
            meta: outcome.meta,
        }
    }

    /// `true` for clutter returns with no corresponding real entity.
    #[inline]
    pub fn is_false_alarm(&self) -> bool {
        self.meta.false_alarm
    }
}
