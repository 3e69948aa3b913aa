//! ADS-B reception model.
//!
//! Cooperative surveillance: the sensor hears position broadcasts rather
//! than probing for returns, so detection is a coverage probability, not an
//! attenuation curve.  Only aircraft carry transponders, and confidence sits
//! in a high 0.85–1.0 band with small position error.

use sw_core::StreamRng;
use sw_entity::{Entity, EntityKind};

use crate::detection::{DetectionMeta, DetectionOutcome};
use crate::noise::report_position;
use crate::sensor::Sensor;
use crate::{SensorKind, SensorResult};

/// Altitude measurement noise, metres (1σ).
const ALT_SIGMA_M: f64 = 5.0;

/// ADS-B-specific reception parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdsbParams {
    /// Position accuracy of the decoded broadcast, metres (1σ).
    pub reception_accuracy_m: f64,
    /// Probability that a given broadcast is received this scan.
    pub transponder_coverage: f64,
}

impl Default for AdsbParams {
    fn default() -> Self {
        Self {
            reception_accuracy_m: 10.0,
            transponder_coverage: 0.95,
        }
    }
}

pub(crate) fn evaluate(
    sensor:  &Sensor,
    params:  &AdsbParams,
    entity:  &Entity,
    range_m: f64,
    rng:     &mut StreamRng,
) -> SensorResult<Option<DetectionOutcome>> {
    // Only aircraft broadcast, and only with a working transponder.
    if entity.kind != EntityKind::Aircraft || entity.meta.transponder == Some(false) {
        return Ok(None);
    }
    if !rng.gen_bool(params.transponder_coverage) {
        return Ok(None);
    }

    let reported = report_position(
        &sensor.position,
        &entity.position,
        sensor.max_range_m,
        params.reception_accuracy_m,
        ALT_SIGMA_M,
        rng,
    )?;

    // Self-reported data: confidence is high and only dips slightly with range.
    let confidence = (1.0 - (range_m / sensor.max_range_m) * 0.1).clamp(0.85, 1.0);

    let mut meta = DetectionMeta::new(SensorKind::Adsb);
    meta.range_m = Some(range_m);
    meta.transponder_id = Some(match &entity.meta.callsign {
        Some(callsign) => callsign.clone(),
        None => format!("ADSB-{}", entity.id.0),
    });

    Ok(Some(DetectionOutcome {
        confidence,
        reported_position: reported,
        meta,
    }))
}
