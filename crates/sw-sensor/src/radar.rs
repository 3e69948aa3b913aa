//! Radar detection model.
//!
//! A deliberately simplified radar equation: detection probability falls
//! linearly with range and rises with the target's radar cross-section,
//! capped at twice the minimum detectable RCS.  No claim of physical
//! fidelity beyond that — the aim is plausible relative behavior between
//! entity classes and ranges.

use sw_core::{Position, StreamRng};
use sw_entity::{Entity, EntityKind};

use crate::detection::{DetectionMeta, DetectionOutcome};
use crate::noise::report_position;
use crate::sensor::Sensor;
use crate::{SensorKind, SensorResult};

/// Altitude measurement noise, metres (1σ).
const ALT_SIGMA_M: f64 = 10.0;

/// Range beyond which atmospheric effects shave the effective RCS.
const ATTENUATION_RANGE_M: f64 = 10_000.0;

/// Radar-specific detection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadarParams {
    /// Smallest cross-section the receiver can distinguish from noise, m².
    pub min_detectable_rcs_m2: f64,
    /// Range measurement accuracy, metres (1σ).
    pub range_accuracy_m: f64,
    /// Angular accuracy, degrees (1σ).
    pub angle_accuracy_deg: f64,
    /// Probability of one clutter return per scan.
    pub false_alarm_rate: f64,
}

impl Default for RadarParams {
    fn default() -> Self {
        Self {
            min_detectable_rcs_m2: 0.1,
            range_accuracy_m:      50.0,
            angle_accuracy_deg:    0.5,
            false_alarm_rate:      0.01,
        }
    }
}

/// Effective radar cross-section for an entity, m².
///
/// Scenario metadata may override the per-kind default; beyond
/// [`ATTENUATION_RANGE_M`] the return is reduced by 20 %.
pub fn cross_section_m2(entity: &Entity, range_m: f64) -> f64 {
    let base = entity.meta.rcs_m2.unwrap_or(match entity.kind {
        EntityKind::Aircraft => 10.0,
        EntityKind::Vehicle  => 5.0,
        EntityKind::Vessel   => 100.0,
        EntityKind::Unknown  => 1.0,
    });
    if range_m > ATTENUATION_RANGE_M { base * 0.8 } else { base }
}

pub(crate) fn evaluate(
    sensor:  &Sensor,
    params:  &RadarParams,
    entity:  &Entity,
    range_m: f64,
    rng:     &mut StreamRng,
) -> SensorResult<Option<DetectionOutcome>> {
    let rcs = cross_section_m2(entity, range_m);
    if rcs < params.min_detectable_rcs_m2 {
        return Ok(None);
    }

    let range_factor = 1.0 - range_m / sensor.max_range_m;
    let rcs_factor = (rcs / params.min_detectable_rcs_m2).min(2.0) / 2.0;
    let p = (range_factor * rcs_factor * rng.gen_range(0.9..=1.0)).clamp(0.0, 1.0);

    if !rng.gen_bool(p) {
        return Ok(None);
    }

    let reported = report_position(
        &sensor.position,
        &entity.position,
        sensor.max_range_m,
        params.range_accuracy_m,
        ALT_SIGMA_M,
        rng,
    )?;

    let mut meta = DetectionMeta::new(SensorKind::Radar);
    meta.range_m = Some(range_m);
    meta.rcs_m2 = Some(rcs);

    Ok(Some(DetectionOutcome {
        confidence: (p * range_factor).clamp(0.0, 1.0),
        reported_position: reported,
        meta,
    }))
}

/// The clutter path: with probability `false_alarm_rate`, one spurious
/// return at a random position near the sensor, at low confidence.  Callers
/// attribute these to [`sw_core::EntityId::INVALID`].
pub(crate) fn false_alarms(
    sensor: &Sensor,
    params: &RadarParams,
    rng:    &mut StreamRng,
) -> SensorResult<Vec<DetectionOutcome>> {
    if !rng.gen_bool(params.false_alarm_rate.clamp(0.0, 1.0)) {
        return Ok(Vec::new());
    }

    let position = Position {
        lat_deg: (sensor.position.lat_deg + rng.gen_range(-0.01..=0.01)).clamp(-90.0, 90.0),
        lon_deg: (sensor.position.lon_deg + rng.gen_range(-0.01..=0.01) + 540.0)
            .rem_euclid(360.0)
            - 180.0,
        alt_m:   rng.gen_range(0.0..=10_000.0),
    };

    let mut meta = DetectionMeta::new(SensorKind::Radar);
    meta.false_alarm = true;

    Ok(vec![DetectionOutcome {
        confidence: rng.gen_range(0.1..=0.3),
        reported_position: position,
        meta,
    }])
}
