//! Plain data row types written by the sinks.

use sw_sensor::Detection;
use sw_sim::TickReport;

/// One detection event, flattened for tabular storage.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRow {
    /// Detected entity id; `u32::MAX` marks a false alarm.
    pub entity_id: u32,
    pub sensor_id: u32,
    pub tick: u64,
    pub unix_time_secs: f64,
    pub sensor_kind: &'static str,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
    pub confidence: f64,
    /// True sensor-to-entity range at evaluation time; absent for false
    /// alarms, which have no real target.
    pub range_m: Option<f64>,
    pub false_alarm: bool,
}

impl DetectionRow {
    /// Flatten one detection from the tick it was produced in.
    pub fn new(tick: u64, detection: &Detection) -> Self {
        Self {
            entity_id:      detection.entity_id.0,
            sensor_id:      detection.sensor_id.0,
            tick,
            unix_time_secs: detection.unix_time_secs,
            sensor_kind:    detection.meta.sensor_kind.as_str(),
            lat_deg:        detection.reported_position.lat_deg,
            lon_deg:        detection.reported_position.lon_deg,
            alt_m:          detection.reported_position.alt_m,
            confidence:     detection.confidence,
            range_m:        detection.meta.range_m,
            false_alarm:    detection.meta.false_alarm,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick: u64,
    pub unix_time_secs: f64,
    pub detections: u64,
    pub false_alarms: u64,
    pub updated_entities: u64,
    pub skipped_evaluations: u64,
}

impl TickSummaryRow {
    /// Condense one tick report into a summary row.
    pub fn summarize(report: &TickReport) -> Self {
        let false_alarms = report.detections.iter().filter(|d| d.is_false_alarm()).count();
        Self {
            tick:                report.tick.0,
            unix_time_secs:      report.unix_time_secs,
            detections:          report.detections.len() as u64,
            false_alarms:        false_alarms as u64,
            updated_entities:    report.updated.len() as u64,
            skipped_evaluations: report.skipped.len() as u64,
        }
    }
}
