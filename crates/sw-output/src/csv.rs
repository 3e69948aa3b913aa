//! CSV sink.
//!
//! Creates two files in the configured output directory:
//! - `detections.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::sink::DetectionSink;
use crate::{DetectionRow, OutputResult, TickSummaryRow};

/// Writes detection batches and tick summaries to two CSV files.
pub struct CsvSink {
    detections: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvSink {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut detections = Writer::from_path(dir.join("detections.csv"))?;
        detections.write_record([
            "entity_id",
            "sensor_id",
            "tick",
            "unix_time_secs",
            "sensor_kind",
            "lat_deg",
            "lon_deg",
            "alt_m",
            "confidence",
            "range_m",
            "false_alarm",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "unix_time_secs",
            "detections",
            "false_alarms",
            "updated_entities",
            "skipped_evaluations",
        ])?;

        Ok(Self { detections, summaries, finished: false })
    }
}

impl DetectionSink for CsvSink {
    fn write_detections(&mut self, rows: &[DetectionRow]) -> OutputResult<()> {
        for row in rows {
            self.detections.write_record(&[
                row.entity_id.to_string(),
                row.sensor_id.to_string(),
                row.tick.to_string(),
                row.unix_time_secs.to_string(),
                row.sensor_kind.to_string(),
                row.lat_deg.to_string(),
                row.lon_deg.to_string(),
                row.alt_m.to_string(),
                row.confidence.to_string(),
                // Empty field for a false alarm's missing range.
                row.range_m.map(|r| r.to_string()).unwrap_or_default(),
                (row.false_alarm as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.detections.to_string(),
            row.false_alarms.to_string(),
            row.updated_entities.to_string(),
            row.skipped_evaluations.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.detections.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
