//! The `DetectionSink` trait implemented by all backend sinks.

use crate::{DetectionRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite sinks.
///
/// This is the capability boundary between the simulation core and whatever
/// stores or forwards its detections: the core emits every tick's batch to
/// the sink it was wired with and never asks which backend (if any) is
/// actually behind it.  Swapping a real store for a discard-everything test
/// double is a one-line change at the call site.
pub trait DetectionSink {
    /// Append a batch of detection rows.
    fn write_detections(&mut self, rows: &[DetectionRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
