//! `sw-core` — foundational types for the `skywatch` surveillance simulator.
//!
//! This crate is a dependency of every other `sw-*` crate.  It intentionally
//! has no `sw-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `SensorId`                                |
//! | [`geo`]         | `Position`, haversine distance, bearing, destination  |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `StreamRng` (per-entity / per-sensor streams)         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                               |
//! |---------|----------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (scenario configs).    |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Position, bearing_deg, destination, distance_m, wrap_heading_deg};
pub use ids::{EntityId, SensorId};
pub use rng::StreamRng;
pub use time::{SimClock, SimConfig, Tick};
