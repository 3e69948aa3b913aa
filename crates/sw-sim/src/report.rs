//! Per-tick results handed to the driver and its sinks.

use sw_core::{EntityId, SensorId, Tick};
use sw_sensor::Detection;

/// One (sensor, entity) pair whose evaluation was abandoned this tick.
///
/// Soft and per-pair: the tick always continues.  Motion-phase failures
/// carry no sensor id; false-alarm-path failures carry no entity id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedEvaluation {
    pub sensor_id: Option<SensorId>,
    pub entity_id: Option<EntityId>,
    pub reason:    String,
}

/// Everything one call to [`Sim::step`][crate::Sim::step] produced.
///
/// `detections` is the tick's append-only detection batch, in sensor order;
/// `updated` lists the entities whose confidence/last-detected state changed,
/// ascending.  The orchestrator neither persists nor publishes any of it —
/// that is the sink collaborator's job.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    pub unix_time_secs: f64,
    pub detections: Vec<Detection>,
    pub updated: Vec<EntityId>,
    pub skipped: Vec<SkippedEvaluation>,
}
