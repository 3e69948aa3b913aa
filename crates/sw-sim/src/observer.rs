//! Simulation observer trait for progress reporting and data collection.

use sw_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — detection counter
///
/// ```rust,ignore
/// struct DetectionCounter { total: usize }
///
/// impl SimObserver for DetectionCounter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.total += report.detections.len();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with everything the tick produced.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
