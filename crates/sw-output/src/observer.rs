//! `SinkObserver<S>` — bridges `SimObserver` to a `DetectionSink`.

use sw_core::Tick;
use sw_sim::{SimObserver, TickReport};

use crate::row::{DetectionRow, TickSummaryRow};
use crate::sink::DetectionSink;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that flattens every tick report into rows for any
/// [`DetectionSink`] backend (CSV, SQLite, …).
///
/// Errors from the sink are stored internally because `SimObserver` methods
/// have no return value.  Only the first error is kept (and logged); once a
/// sink has failed, later batches are almost certainly lost too and their
/// errors add nothing.  After `sim.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct SinkObserver<S: DetectionSink> {
    sink:        S,
    first_error: Option<OutputError>,
}

impl<S: DetectionSink> SinkObserver<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, first_error: None }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect files after the run).
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.first_error.is_none() {
                tracing::error!(error = %e, "detection sink failed; suppressing further errors");
                self.first_error = Some(e);
            }
        }
    }
}

impl<S: DetectionSink> SimObserver for SinkObserver<S> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let rows: Vec<DetectionRow> = report
            .detections
            .iter()
            .map(|detection| DetectionRow::new(report.tick.0, detection))
            .collect();
        if !rows.is_empty() {
            let result = self.sink.write_detections(&rows);
            self.store_err(result);
        }

        let summary = TickSummaryRow::summarize(report);
        let result = self.sink.write_tick_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.sink.finish();
        self.store_err(result);
    }
}
