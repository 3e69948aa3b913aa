//! `sw-sim` — tick loop orchestrator for the skywatch simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for each step(dt):
//!   ① Motion     — advance every entity along its movement pattern.
//!                  A malformed entity is held in place and logged, never
//!                  aborting the tick.
//!   ② Detection  — every due, active sensor evaluates every entity
//!                  (parallel per sensor with the `parallel` feature);
//!                  radar sensors additionally roll for false alarms.
//!   ③ Merge      — per detected entity, in ascending id order:
//!                  last_detected = now, confidence = max(old, best new).
//! ```
//!
//! Motion strictly precedes detection within a tick, so every detection
//! reflects the entity's post-motion position.  Pair evaluations are
//! independent; only the merge phase writes entity state, sequentially.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs the detection pass on Rayon's thread pool.         |
//! | `fx-hash`  | FxHash for the per-tick confidence merge index.         |
//! | `serde`    | Scenario config module + serde derives on reports.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_core::{SimConfig, SensorId, Position};
//! use sw_sensor::Sensor;
//! use sw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .sensor(Sensor::radar(SensorId(0), site))
//!     .entities(entities)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod rngs;
#[cfg(feature = "serde")]
pub mod scenario;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{SkippedEvaluation, TickReport};
#[cfg(feature = "serde")]
pub use scenario::ScenarioConfig;
pub use sim::Sim;
pub use state::RunState;
