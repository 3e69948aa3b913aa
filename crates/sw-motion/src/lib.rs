//! `sw-motion` — entity motion model for the skywatch simulator.
//!
//! One entity, one tick: [`MovementPattern::advance`] takes the current
//! position and motion vector, mutates the heading (and, for evasive
//! movement, the speed) plus any internal pattern state, and returns the new
//! position via a forward great-circle projection.
//!
//! | Pattern    | Behavior                                                  |
//! |------------|-----------------------------------------------------------|
//! | `Waypoint` | Fly the route in order; wrap to the start or hold at the end |
//! | `Patrol`   | Fly the route back and forth, reversing at both ends      |
//! | `Random`   | Bounded random heading walk at constant speed             |
//! | `Evasive`  | Larger heading swings plus speed jitter within a band     |
//!
//! The model is deliberately memoryless across entities: each call touches
//! exactly one entity's state and one RNG stream, so the simulation loop may
//! advance entities in any order (or in parallel) without changing results.

pub mod error;
pub mod motion;
pub mod pattern;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MotionError, MotionResult};
pub use motion::Motion;
pub use pattern::{MovementPattern, RouteEnd};
