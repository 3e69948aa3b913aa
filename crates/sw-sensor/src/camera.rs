//! EO/IR camera detection model.
//!
//! The only directional sensor: a target must fall inside the angular cone
//! `boresight ± fov/2` as well as inside range.  Detection probability then
//! combines range, the target's visual signature, weather visibility, and
//! lighting.

use sw_core::{StreamRng, bearing_deg};
use sw_entity::{Entity, EntityKind};

use crate::detection::{DetectionMeta, DetectionOutcome};
use crate::noise::report_position;
use crate::sensor::Sensor;
use crate::{Environment, SensorKind, SensorResult};

/// Altitude measurement noise, metres (1σ).
const ALT_SIGMA_M: f64 = 15.0;

/// Night-time detection multiplier for unlit targets.
const NIGHT_FACTOR: f64 = 0.8;

/// Lighting mode: fixed day, fixed night, or follow the environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayNight {
    Day,
    Night,
    #[default]
    Auto,
}

/// Camera-specific detection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraParams {
    /// Total field-of-view width, degrees.  ≥ 360 means omnidirectional.
    pub fov_deg: f64,
    /// Bearing the FOV is centred on, degrees from north.
    pub boresight_deg: f64,
    /// Position accuracy of a visual fix, metres (1σ).
    pub detection_accuracy_m: f64,
    pub mode: DayNight,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_deg:              60.0,
            boresight_deg:        0.0,
            detection_accuracy_m: 20.0,
            mode:                 DayNight::Auto,
        }
    }
}

/// Visual signature by entity kind.
fn visibility_factor(kind: EntityKind) -> f64 {
    match kind {
        EntityKind::Aircraft => 0.9,
        EntityKind::Vehicle  => 0.7,
        EntityKind::Vessel   => 0.8,
        EntityKind::Unknown  => 0.5,
    }
}

pub(crate) fn evaluate(
    sensor:  &Sensor,
    params:  &CameraParams,
    entity:  &Entity,
    range_m: f64,
    env:     &Environment,
    rng:     &mut StreamRng,
) -> SensorResult<Option<DetectionOutcome>> {
    // FOV cone test — unconditional: a target 1° outside the cone is never
    // seen, regardless of how close it is.
    if params.fov_deg < 360.0 {
        let target_bearing = bearing_deg(&sensor.position, &entity.position)?;
        let off_axis =
            (target_bearing - params.boresight_deg + 180.0).rem_euclid(360.0) - 180.0;
        if off_axis.abs() > params.fov_deg * 0.5 {
            return Ok(None);
        }
    }

    let night = match params.mode {
        DayNight::Day   => false,
        DayNight::Night => true,
        DayNight::Auto  => env.night,
    };
    let lit = entity.meta.emits_light == Some(true);
    let night_factor = if night && !lit { NIGHT_FACTOR } else { 1.0 };

    let range_factor = 1.0 - range_m / sensor.max_range_m;
    let p = (range_factor
        * visibility_factor(entity.kind)
        * env.visibility.clamp(0.0, 1.0)
        * night_factor)
        .clamp(0.0, 1.0);

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

    let mut meta = DetectionMeta::new(SensorKind::Camera);
    meta.range_m = Some(range_m);

    Ok(Some(DetectionOutcome {
        confidence: (p * (1.0 - (range_m / sensor.max_range_m) * 0.3)).clamp(0.0, 1.0),
        reported_position: reported,
        meta,
    }))
}
