//! Serde-able scenario description (feature `serde`).
//!
//! A scenario is the full initial condition of a run: clock configuration,
//! weather, entities, and sensor sites.  This crate only defines the shape
//! and its validation — reading scenario files (and choosing a format) is
//! the surrounding application's job.
//!
//! Unknown sensor types and movement patterns are closed enums underneath,
//! so a typo like `"sonar"` or `"orbital"` fails at deserialization with a
//! field-level serde error instead of silently degrading a run.

use serde::{Deserialize, Serialize};

use sw_core::SimConfig;
use sw_entity::Entity;
use sw_sensor::{Environment, Sensor};

use crate::{Sim, SimBuilder, SimResult};

/// Everything needed to start a run.
///
/// All sections are optional in serialized form; omitted ones fall back to
/// their defaults (empty world, clear-day environment, 10 Hz clock).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim: SimConfig,
    pub environment: Environment,
    pub entities: Vec<Entity>,
    pub sensors: Vec<Sensor>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sim:         SimConfig::default(),
            environment: Environment::default(),
            entities:    Vec::new(),
            sensors:     Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Validate the scenario and assemble a ready-to-run [`Sim`].
    ///
    /// Validation is the same startup pass [`SimBuilder`] applies; a bad
    /// position, rate, or duplicate id fails here, before the first tick.
    pub fn into_sim(self) -> SimResult<Sim> {
        SimBuilder::new(self.sim)
            .environment(self.environment)
            .entities(self.entities)
            .sensors(self.sensors)
            .build()
    }
}
