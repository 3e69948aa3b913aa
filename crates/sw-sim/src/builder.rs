//! Fluent builder for constructing a [`Sim`].

use std::collections::HashMap;

use sw_core::SimConfig;
use sw_entity::{Entity, EntityRngs, World};
use sw_sensor::{Environment, Sensor, SensorParams};

use crate::rngs::SensorRngs;
use crate::{RunState, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// Validates the whole scenario up front and fails fast with
/// [`SimError::Config`]: a bad position, rate, or range should be caught at
/// startup, not surface as a skipped evaluation on every tick.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .sensor(Sensor::radar(SensorId(0), site))
///     .entities(entities)
///     .environment(Environment::default())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:      SimConfig,
    entities:    Vec<Entity>,
    sensors:     Vec<Sensor>,
    environment: Environment,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            entities:    Vec::new(),
            sensors:     Vec::new(),
            environment: Environment::default(),
        }
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    pub fn sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn sensors(mut self, sensors: impl IntoIterator<Item = Sensor>) -> Self {
        self.sensors.extend(sensors);
        self
    }

    /// Initial weather/lighting.  Defaults to clear day, no wind.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Validate every input and return a ready-to-run [`Sim`] (stopped).
    pub fn build(self) -> SimResult<Sim> {
        validate_config(&self.config)?;
        validate_environment(&self.environment)?;

        let mut world = World::new();
        for entity in self.entities {
            validate_entity(&entity)?;
            world.insert(entity)?;
        }

        let mut slots = HashMap::new();
        for (slot, sensor) in self.sensors.iter().enumerate() {
            validate_sensor(sensor)?;
            if slots.insert(sensor.id, slot).is_some() {
                return Err(SimError::DuplicateSensor(sensor.id));
            }
        }

        let entity_rngs = EntityRngs::new(self.config.seed);
        let sensor_rngs = SensorRngs::new(self.config.seed, self.sensors.iter().map(|s| s.id));
        let next_scan_secs = vec![0.0; self.sensors.len()];

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            world,
            environment: self.environment,
            run_state: RunState::new(),
            entity_rngs,
            sensors: self.sensors,
            slots,
            sensor_rngs,
            next_scan_secs,
        })
    }
}

fn validate_config(config: &SimConfig) -> SimResult<()> {
    if !(config.tick_duration_secs.is_finite() && config.tick_duration_secs > 0.0) {
        return Err(SimError::Config(format!(
            "tick duration must be a positive number of seconds, got {}",
            config.tick_duration_secs
        )));
    }
    if !config.start_unix_secs.is_finite() {
        return Err(SimError::Config("start time must be finite".into()));
    }
    Ok(())
}

fn validate_environment(env: &Environment) -> SimResult<()> {
    if !(env.visibility.is_finite() && (0.0..=1.0).contains(&env.visibility)) {
        return Err(SimError::Config(format!(
            "visibility must be in [0, 1], got {}",
            env.visibility
        )));
    }
    if !(env.wind_factor.is_finite() && env.wind_factor >= 1.0) {
        return Err(SimError::Config(format!(
            "wind factor must be ≥ 1, got {}",
            env.wind_factor
        )));
    }
    Ok(())
}

fn validate_entity(entity: &Entity) -> SimResult<()> {
    entity
        .position
        .validate()
        .map_err(|e| SimError::Config(format!("entity {}: {e}", entity.id)))?;
    if !(entity.motion.speed_ms.is_finite() && entity.motion.speed_ms >= 0.0) {
        return Err(SimError::Config(format!(
            "entity {}: speed must be finite and non-negative, got {}",
            entity.id, entity.motion.speed_ms
        )));
    }
    Ok(())
}

fn validate_sensor(sensor: &Sensor) -> SimResult<()> {
    sensor
        .position
        .validate()
        .map_err(|e| SimError::Config(format!("sensor {}: {e}", sensor.id)))?;
    if !(sensor.max_range_m.is_finite() && sensor.max_range_m > 0.0) {
        return Err(SimError::Config(format!(
            "sensor {}: max range must be positive, got {}",
            sensor.id, sensor.max_range_m
        )));
    }
    if !(sensor.update_rate_hz.is_finite() && sensor.update_rate_hz > 0.0) {
        return Err(SimError::Config(format!(
            "sensor {}: update rate must be positive, got {}",
            sensor.id, sensor.update_rate_hz
        )));
    }
    match &sensor.params {
        SensorParams::Radar(p) => {
            if !(0.0..=1.0).contains(&p.false_alarm_rate) {
                return Err(SimError::Config(format!(
                    "sensor {}: false alarm rate must be in [0, 1], got {}",
                    sensor.id, p.false_alarm_rate
                )));
            }
        }
        SensorParams::Adsb(p) => {
            if !(0.0..=1.0).contains(&p.transponder_coverage) {
                return Err(SimError::Config(format!(
                    "sensor {}: transponder coverage must be in [0, 1], got {}",
                    sensor.id, p.transponder_coverage
                )));
            }
        }
        SensorParams::Camera(p) => {
            if !(p.fov_deg.is_finite() && p.fov_deg > 0.0) {
                return Err(SimError::Config(format!(
                    "sensor {}: camera FOV must be positive, got {}",
                    sensor.id, p.fov_deg
                )));
            }
        }
        SensorParams::Acoustic(p) => {
            if !(p.ambient_noise.is_finite() && p.ambient_noise >= 0.0) {
                return Err(SimError::Config(format!(
                    "sensor {}: ambient noise must be non-negative, got {}",
                    sensor.id, p.ambient_noise
                )));
            }
        }
    }
    Ok(())
}
