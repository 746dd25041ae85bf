//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use gf_core::{SimTime, Tick};
use gf_motion::MotionStore;
use gf_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    summaries:      u64,
    snapshot_rows:  u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            summaries:     0,
            snapshot_rows: 0,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// `(tick summaries, snapshot rows)` handed to the writer so far.
    pub fn rows_written(&self) -> (u64, u64) {
        (self.summaries, self.snapshot_rows)
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow::from(summary);
        let result = self.writer.write_tick_summary(&row);
        if result.is_ok() {
            self.summaries += 1;
        }
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, now: SimTime, agents: &MotionStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|exec| AgentSnapshotRow::from_executor(tick, now, exec))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            if result.is_ok() {
                self.snapshot_rows += rows.len() as u64;
            }
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
