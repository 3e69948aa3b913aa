//! `sw-output` — detection sinks for the skywatch simulator.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature  | Backend | Files created                        |
//! |----------|---------|--------------------------------------|
//! | *(none)* | CSV     | `detections.csv`, `tick_summaries.csv` |
//! | `sqlite` | SQLite  | `detections.db`                      |
//!
//! Both implement [`DetectionSink`] and are driven by [`SinkObserver`],
//! which implements `sw_sim::SimObserver`.  The simulation core never knows
//! which backend is wired in — or whether one is at all; a custom
//! `DetectionSink` impl is all it takes to forward batches elsewhere.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::{CsvSink, SinkObserver};
//!
//! let sink = CsvSink::new(Path::new("./output"))?;
//! let mut obs = SinkObserver::new(sink);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod sink;

#[cfg(feature = "sqlite")]
pub mod sqlite;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use observer::SinkObserver;
pub use row::{DetectionRow, TickSummaryRow};
pub use sink::DetectionSink;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;
