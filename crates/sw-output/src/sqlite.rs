//! SQLite sink (feature `sqlite`).
//!
//! Creates a single `detections.db` file in the configured output directory
//! with two tables: `detections` (append-only, keyed by entity, sensor, and
//! timestamp) and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::sink::DetectionSink;
use crate::{DetectionRow, OutputResult, TickSummaryRow};

/// Writes detection batches and tick summaries to an SQLite database.
pub struct SqliteSink {
    conn:     Connection,
    finished: bool,
}

impl SqliteSink {
    /// Open (or create) `detections.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("detections.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS detections (
                 entity_id      INTEGER NOT NULL,
                 sensor_id      INTEGER NOT NULL,
                 tick           INTEGER NOT NULL,
                 unix_time_secs REAL    NOT NULL,
                 sensor_kind    TEXT    NOT NULL,
                 lat_deg        REAL    NOT NULL,
                 lon_deg        REAL    NOT NULL,
                 alt_m          REAL    NOT NULL,
                 confidence     REAL    NOT NULL,
                 range_m        REAL,
                 false_alarm    INTEGER NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_detections_key
                 ON detections (entity_id, sensor_id, unix_time_secs);
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick                INTEGER PRIMARY KEY,
                 unix_time_secs      REAL    NOT NULL,
                 detections          INTEGER NOT NULL,
                 false_alarms        INTEGER NOT NULL,
                 updated_entities    INTEGER NOT NULL,
                 skipped_evaluations INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl DetectionSink for SqliteSink {
    fn write_detections(&mut self, rows: &[DetectionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO detections \
                 (entity_id, sensor_id, tick, unix_time_secs, sensor_kind, \
                  lat_deg, lon_deg, alt_m, confidence, range_m, false_alarm) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.entity_id,
                    row.sensor_id,
                    row.tick,
                    row.unix_time_secs,
                    row.sensor_kind,
                    row.lat_deg,
                    row.lon_deg,
                    row.alt_m,
                    row.confidence,
                    row.range_m,
                    row.false_alarm as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, unix_time_secs, detections, false_alarms, updated_entities, \
              skipped_evaluations) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick,
                row.unix_time_secs,
                row.detections,
                row.false_alarms,
                row.updated_entities,
                row.skipped_evaluations,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
