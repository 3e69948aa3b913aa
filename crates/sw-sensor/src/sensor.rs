//! The `Sensor` record and the per-type evaluation dispatch.

use sw_core::{Position, SensorId, StreamRng, distance_m};
use sw_entity::Entity;

use crate::{
    AcousticParams, AdsbParams, CameraParams, DetectionOutcome, Environment, RadarParams,
    SensorKind, SensorResult, acoustic, adsb, camera, radar,
};

/// Type-specific detection parameters.  The variant determines the sensor
/// kind; scenario files name it with the lowercase kind string.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorParams {
    Radar(RadarParams),
    Adsb(AdsbParams),
    Camera(CameraParams),
    Acoustic(AcousticParams),
}

impl SensorParams {
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorParams::Radar(_)    => SensorKind::Radar,
            SensorParams::Adsb(_)     => SensorKind::Adsb,
            SensorParams::Camera(_)   => SensorKind::Camera,
            SensorParams::Acoustic(_) => SensorKind::Acoustic,
        }
    }
}

/// A fixed sensor site.
///
/// Sensors do not move and are never mutated by the detection pass; the
/// surrounding system toggles `active` (and the simulation loop consults it
/// before evaluating — `evaluate` itself does not re-check).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensor {
    pub id:             SensorId,
    pub position:       Position,
    pub max_range_m:    f64,
    pub update_rate_hz: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub active:         bool,
    pub params:         SensorParams,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl Sensor {
    /// A radar site with default parameters: 50 km range, 1 Hz.
    pub fn radar(id: SensorId, position: Position) -> Self {
        Self {
            id,
            position,
            max_range_m:    50_000.0,
            update_rate_hz: 1.0,
            active:         true,
            params:         SensorParams::Radar(RadarParams::default()),
        }
    }

    /// An ADS-B receiver with default parameters: 200 km range, 1 Hz.
    pub fn adsb(id: SensorId, position: Position) -> Self {
        Self {
            id,
            position,
            max_range_m:    200_000.0,
            update_rate_hz: 1.0,
            active:         true,
            params:         SensorParams::Adsb(AdsbParams::default()),
        }
    }

    /// An EO/IR camera with default parameters: 15 km range, 5 Hz, 60° FOV
    /// centred on `boresight_deg`.
    pub fn camera(id: SensorId, position: Position, boresight_deg: f64) -> Self {
        Self {
            id,
            position,
            max_range_m:    15_000.0,
            update_rate_hz: 5.0,
            active:         true,
            params:         SensorParams::Camera(CameraParams {
                boresight_deg,
                ..CameraParams::default()
            }),
        }
    }

    /// An acoustic array with default parameters: 5 km range, 10 Hz.
    pub fn acoustic(id: SensorId, position: Position) -> Self {
        Self {
            id,
            position,
            max_range_m:    5_000.0,
            update_rate_hz: 10.0,
            active:         true,
            params:         SensorParams::Acoustic(AcousticParams::default()),
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.params.kind()
    }

    /// Evaluate one (sensor, entity) pair for this tick.
    ///
    /// Returns `Ok(None)` when the entity is out of range or the detection
    /// roll fails — the normal miss outcome.  Errors only surface for
    /// malformed positions, which the caller downgrades to a skipped pair.
    /// The roll is independently re-drawn on every call.
    pub fn evaluate(
        &self,
        entity: &Entity,
        env:    &Environment,
        rng:    &mut StreamRng,
    ) -> SensorResult<Option<DetectionOutcome>> {
        let range_m = distance_m(&self.position, &entity.position)?;
        if range_m > self.max_range_m {
            return Ok(None);
        }
        match &self.params {
            SensorParams::Radar(p)    => radar::evaluate(self, p, entity, range_m, rng),
            SensorParams::Adsb(p)     => adsb::evaluate(self, p, entity, range_m, rng),
            SensorParams::Camera(p)   => camera::evaluate(self, p, entity, range_m, env, rng),
            SensorParams::Acoustic(p) => acoustic::evaluate(self, p, entity, range_m, env, rng),
        }
    }

    /// Clutter returns generated without any real target.  Non-empty only
    /// for radar; run once per active radar per tick, independently of the
    /// per-entity evaluations.
    pub fn false_alarms(&self, rng: &mut StreamRng) -> SensorResult<Vec<DetectionOutcome>> {
        match &self.params {
            SensorParams::Radar(p) => radar::false_alarms(self, p, rng),
            _ => Ok(Vec::new()),
        }
    }
}
