//! The `Sim` struct and its tick loop.

use std::collections::HashMap;

use sw_core::{EntityId, SensorId, SimClock, SimConfig, StreamRng};
use sw_entity::{Entity, EntityRngs, World};
use sw_sensor::{Detection, Environment, Sensor};

use crate::report::{SkippedEvaluation, TickReport};
use crate::rngs::SensorRngs;
use crate::{RunState, SimError, SimObserver, SimResult};

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as MergeMap;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as MergeMap;

/// The simulation runner.
///
/// `Sim` owns the world, the sensor sites, and all RNG streams, and drives
/// the three-phase tick loop:
///
/// 1. **Motion phase** (sequential): advance every entity along its movement
///    pattern.  A malformed entity is held in place, logged, and reported in
///    [`TickReport::skipped`].
/// 2. **Detection phase** (parallel per sensor with the `parallel` feature):
///    every due, active sensor evaluates every entity against the tick's
///    [`Environment`], then rolls its false-alarm path.  Sensors fire on
///    their own `update_rate_hz` cadence, tracked in simulated time.
/// 3. **Merge phase** (sequential, ascending [`EntityId`] for determinism):
///    per detected entity, `last_detected = now` and
///    `confidence = max(old, best this tick)`.
///
/// Motion strictly precedes detection, so every detection reflects the
/// entity's post-motion position.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// All live entities.
    pub world: World,

    /// Weather and lighting applied to every evaluation this tick.  The
    /// driver may rewrite this between steps.
    pub environment: Environment,

    /// Lifecycle (stopped ⇄ running) and the speed multiplier.  [`step`]
    /// refuses to run while stopped; [`run`] and [`run_ticks`] flip the
    /// state themselves.
    ///
    /// [`step`]: Sim::step
    /// [`run`]: Sim::run
    /// [`run_ticks`]: Sim::run_ticks
    pub run_state: RunState,

    /// Per-entity motion RNG streams, separated for the split-borrow pattern.
    pub(crate) entity_rngs: EntityRngs,

    /// Sensor sites in insertion order.
    pub(crate) sensors: Vec<Sensor>,

    /// Sensor id → slot in `sensors` (and the two aligned vectors below).
    pub(crate) slots: HashMap<SensorId, usize>,

    /// Per-sensor detection RNG streams, aligned with `sensors`.
    pub(crate) sensor_rngs: SensorRngs,

    /// Simulated second at which each sensor next scans, aligned with
    /// `sensors`.  Zero at start, so every sensor scans on the first tick.
    pub(crate) next_scan_secs: Vec<f64>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Enters the running state, calls observer hooks at every tick
    /// boundary, and stops when the end tick is reached.  Each tick advances
    /// `config.tick_duration_secs × run_state.speed` simulated seconds.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.run_state.start();
        while self.clock.current_tick < self.config.end_tick() {
            let dt = self.config.tick_duration_secs * self.run_state.speed;
            observer.on_tick_start(self.clock.current_tick);
            let report = self.step(dt)?;
            observer.on_tick_end(&report);
        }
        self.run_state.stop();
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Leaves the simulation
    /// stopped, ready to be resumed.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.run_state.start();
        for _ in 0..n {
            let dt = self.config.tick_duration_secs * self.run_state.speed;
            observer.on_tick_start(self.clock.current_tick);
            let report = self.step(dt)?;
            observer.on_tick_end(&report);
        }
        self.run_state.stop();
        Ok(())
    }

    /// Advance the simulation by one tick of `dt_secs` simulated seconds.
    ///
    /// Fails with [`SimError::NotRunning`] while stopped.  Per-pair
    /// evaluation failures never abort the tick — they are logged and
    /// surfaced in the report's `skipped` list.
    pub fn step(&mut self, dt_secs: f64) -> SimResult<TickReport> {
        if !self.run_state.running {
            return Err(SimError::NotRunning);
        }

        let tick = self.clock.current_tick;
        // The scan schedule is sampled at the tick's start; detections are
        // stamped with the tick's end time, after motion has played out.
        let schedule_secs = self.clock.elapsed_secs;
        self.clock.advance(dt_secs);
        let now = self.clock.unix_secs();

        let mut skipped = Vec::new();

        // ── Phase 1: motion ───────────────────────────────────────────────
        {
            let world = &mut self.world;
            let rngs = &mut self.entity_rngs;
            for entity in world.iter_mut() {
                let rng = rngs.get_mut(entity.id);
                match entity
                    .pattern
                    .advance(&entity.position, &mut entity.motion, dt_secs, rng)
                {
                    Ok(new_pos) => entity.position = new_pos,
                    Err(e) => {
                        tracing::warn!(entity = %entity.id, error = %e, "motion step skipped");
                        skipped.push(SkippedEvaluation {
                            sensor_id: None,
                            entity_id: Some(entity.id),
                            reason:    e.to_string(),
                        });
                    }
                }
            }
        }

        // ── Phase 2: detection ────────────────────────────────────────────
        let due = self.due_sensors(schedule_secs);
        let mut detections = Vec::new();
        {
            let sensors = self.sensors.as_slice();
            let world = &self.world;
            let env = &self.environment;
            let rngs = &mut self.sensor_rngs;

            #[cfg(not(feature = "parallel"))]
            let results: Vec<(Vec<Detection>, Vec<SkippedEvaluation>)> = {
                let mut out = Vec::with_capacity(due.len());
                for &slot in &due {
                    let rng = rngs.get_mut(slot);
                    out.push(scan(&sensors[slot], world, env, now, rng));
                }
                out
            };

            #[cfg(feature = "parallel")]
            let results: Vec<(Vec<Detection>, Vec<SkippedEvaluation>)> = {
                use rayon::prelude::*;

                // Disjoint &mut streams for the due slots (unique by
                // construction: one ordered scan of the sensor vector).
                let rng_refs = rngs.get_many_mut(&due);
                due.par_iter()
                    .zip(rng_refs.into_par_iter())
                    .map(|(&slot, rng)| scan(&sensors[slot], world, env, now, rng))
                    .collect()
            };

            // Collected in due-slot order either way, so the batch layout is
            // independent of thread scheduling.
            for (found, skips) in results {
                detections.extend(found);
                skipped.extend(skips);
            }
        }

        // ── Phase 3: merge ────────────────────────────────────────────────
        let mut best: MergeMap<EntityId, f64> = MergeMap::default();
        for detection in &detections {
            if detection.entity_id == EntityId::INVALID {
                continue;
            }
            let entry = best.entry(detection.entity_id).or_insert(0.0);
            if detection.confidence > *entry {
                *entry = detection.confidence;
            }
        }
        let mut updated: Vec<EntityId> = best.keys().copied().collect();
        updated.sort_unstable();
        for &id in &updated {
            if let Some(entity) = self.world.get_mut(id) {
                entity.record_detection(now, best[&id]);
            }
        }

        Ok(TickReport { tick, unix_time_secs: now, detections, updated, skipped })
    }

    // ── Mid-run mutation ──────────────────────────────────────────────────

    /// Insert an entity mid-run.  Duplicate ids are rejected; a malformed
    /// position is accepted here and degrades to per-tick skips instead.
    pub fn add_entity(&mut self, entity: Entity) -> SimResult<()> {
        self.world.insert(entity)?;
        Ok(())
    }

    /// Remove an entity and drop its RNG stream.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.world.remove(id)?;
        self.entity_rngs.remove(id);
        Some(entity)
    }

    /// Add a sensor site mid-run.  It becomes due on the next tick.
    pub fn add_sensor(&mut self, sensor: Sensor) -> SimResult<()> {
        if self.slots.contains_key(&sensor.id) {
            return Err(SimError::DuplicateSensor(sensor.id));
        }
        self.slots.insert(sensor.id, self.sensors.len());
        self.sensor_rngs.push(self.config.seed, sensor.id);
        self.next_scan_secs.push(self.clock.elapsed_secs);
        self.sensors.push(sensor);
        Ok(())
    }

    /// Remove and return a sensor site.
    pub fn remove_sensor(&mut self, id: SensorId) -> Option<Sensor> {
        let slot = self.slots.remove(&id)?;
        let sensor = self.sensors.remove(slot);
        self.sensor_rngs.remove(slot);
        self.next_scan_secs.remove(slot);
        for s in self.slots.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Some(sensor)
    }

    /// All sensor sites, in insertion order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.slots.get(&id).map(|&slot| &self.sensors[slot])
    }

    /// Mutable sensor access, e.g. for `active` toggles between steps.
    pub fn sensor_mut(&mut self, id: SensorId) -> Option<&mut Sensor> {
        let slot = *self.slots.get(&id)?;
        Some(&mut self.sensors[slot])
    }

    // ── Scan scheduling ───────────────────────────────────────────────────

    /// Collect the sensors scanning this tick and push their schedules
    /// forward by one scan interval.
    fn due_sensors(&mut self, schedule_secs: f64) -> Vec<usize> {
        let mut due = Vec::new();
        for (slot, sensor) in self.sensors.iter().enumerate() {
            if !sensor.active || schedule_secs < self.next_scan_secs[slot] {
                continue;
            }
            let interval = 1.0 / sensor.update_rate_hz;
            let next = &mut self.next_scan_secs[slot];
            *next += interval;
            // A sensor re-enabled after a long gap resumes its cadence from
            // the current time instead of replaying every missed scan.
            if *next <= schedule_secs {
                *next = schedule_secs + interval;
            }
            due.push(slot);
        }
        due
    }
}

/// One sensor's full pass over the world, plus its false-alarm roll.
///
/// Free function so the parallel pass can call it with nothing but shared
/// references and the sensor's own RNG stream.
fn scan(
    sensor: &Sensor,
    world:  &World,
    env:    &Environment,
    now:    f64,
    rng:    &mut StreamRng,
) -> (Vec<Detection>, Vec<SkippedEvaluation>) {
    let mut detections = Vec::new();
    let mut skipped = Vec::new();

    for entity in world.iter() {
        match sensor.evaluate(entity, env, rng) {
            Ok(Some(outcome)) => {
                detections.push(Detection::from_outcome(entity.id, sensor.id, now, outcome));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    sensor = %sensor.id,
                    entity = %entity.id,
                    error = %e,
                    "evaluation skipped"
                );
                skipped.push(SkippedEvaluation {
                    sensor_id: Some(sensor.id),
                    entity_id: Some(entity.id),
                    reason:    e.to_string(),
                });
            }
        }
    }

    match sensor.false_alarms(rng) {
        Ok(alarms) => detections.extend(
            alarms
                .into_iter()
                .map(|outcome| Detection::from_outcome(EntityId::INVALID, sensor.id, now, outcome)),
        ),
        Err(e) => {
            tracing::warn!(sensor = %sensor.id, error = %e, "false-alarm roll skipped");
            skipped.push(SkippedEvaluation {
                sensor_id: Some(sensor.id),
                entity_id: None,
                reason:    e.to_string(),
            });
        }
    }

    (detections, skipped)
}
