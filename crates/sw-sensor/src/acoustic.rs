//! Acoustic detection model.
//!
//! Short-range, low-accuracy sensing driven by sound: the estimated source
//! level (entity kind × speed) attenuates with the square of range and is
//! compared against ambient noise as a signal-to-noise ratio.  Signals below
//! the SNR floor are indistinguishable from the background and never
//! detected; above it, detection is probabilistic and wind degrades it.

use sw_core::StreamRng;
use sw_entity::{Entity, EntityKind};

use crate::detection::{DetectionMeta, DetectionOutcome};
use crate::noise::report_position;
use crate::sensor::Sensor;
use crate::{Environment, SensorKind, SensorResult};

/// Altitude measurement noise, metres (1σ).
const ALT_SIGMA_M: f64 = 50.0;

/// Speed at which an entity reaches its full source level, m/s.
const REFERENCE_SPEED_MS: f64 = 100.0;

/// Acoustic-specific detection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcousticParams {
    /// Position accuracy of a bearing/intensity fix, metres (1σ).
    pub detection_accuracy_m: f64,
    /// Background noise level at the array, 0–1.
    pub ambient_noise: f64,
    /// SNR floor below which a source is never detected.
    pub min_snr: f64,
}

impl Default for AcousticParams {
    fn default() -> Self {
        Self {
            detection_accuracy_m: 100.0,
            ambient_noise:        0.5,
            min_snr:              0.2,
        }
    }
}

/// Estimated source level at the emitter, 0–1.
///
/// Kind sets the base signature; speed scales it (a parked vehicle is
/// silent, anything at reference speed emits its full signature, up to 1.5×
/// beyond that), capped at 1.
pub fn source_level(kind: EntityKind, speed_ms: f64) -> f64 {
    let base = match kind {
        EntityKind::Aircraft => 0.8,
        EntityKind::Vehicle  => 0.6,
        EntityKind::Vessel   => 0.5,
        EntityKind::Unknown  => 0.4,
    };
    (base * (speed_ms / REFERENCE_SPEED_MS).min(1.5)).min(1.0)
}

pub(crate) fn evaluate(
    sensor:  &Sensor,
    params:  &AcousticParams,
    entity:  &Entity,
    range_m: f64,
    env:     &Environment,
    rng:     &mut StreamRng,
) -> SensorResult<Option<DetectionOutcome>> {
    let level = source_level(entity.kind, entity.motion.speed_ms);
    let snr = level / params.ambient_noise.max(0.1);
    if snr < params.min_snr {
        return Ok(None);
    }

    // Inverse-square attenuation normalized to the sensor's rated range.
    let range_factor = 1.0 / (1.0 + (range_m / sensor.max_range_m).powi(2));
    let snr_factor = (snr / 2.0).min(1.0);
    let p = (range_factor * snr_factor / env.wind_factor.max(1.0)).clamp(0.0, 1.0);

    if !rng.gen_bool(p) {
        return Ok(None);
    }

    let reported = report_position(
        &sensor.position,
        &entity.position,
        sensor.max_range_m,
        params.detection_accuracy_m,
        ALT_SIGMA_M,
        rng,
    )?;

    let mut meta = DetectionMeta::new(SensorKind::Acoustic);
    meta.range_m = Some(range_m);
    meta.sound_level = Some(level);
    meta.snr = Some(snr);

    Ok(Some(DetectionOutcome {
        confidence: (p * snr_factor).clamp(0.0, 1.0),
        reported_position: reported,
        meta,
    }))
}
