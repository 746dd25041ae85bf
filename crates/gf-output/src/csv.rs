//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const SNAPSHOT_HEADERS: [&str; 14] = [
    "agent_id", "kind", "tick", "sim_time", "phase", "path_index",
    "x", "y", "z", "qx", "qy", "qz", "qw", "collected",
];

pub const SUMMARY_HEADERS: [&str; 10] = [
    "tick", "sim_time", "moving", "waiting", "completed",
    "claims", "alternatives", "exhausted", "reservations", "pruned",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.kind.to_string(),
                row.tick.to_string(),
                row.sim_time.to_string(),
                row.phase.to_string(),
                row.path_index.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.qx.to_string(),
                row.qy.to_string(),
                row.qz.to_string(),
                row.qw.to_string(),
                row.collected.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.sim_time.to_string(),
            row.moving.to_string(),
            row.waiting.to_string(),
            row.completed.to_string(),
            row.claims.to_string(),
            row.alternatives.to_string(),
            row.exhausted.to_string(),
            row.reservations.to_string(),
            row.pruned.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
