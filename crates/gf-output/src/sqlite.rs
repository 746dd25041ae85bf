//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id   INTEGER NOT NULL,
                 kind       TEXT    NOT NULL,
                 tick       INTEGER NOT NULL,
                 sim_time   REAL    NOT NULL,
                 phase      TEXT    NOT NULL,
                 path_index INTEGER NOT NULL,
                 x REAL NOT NULL, y REAL NOT NULL, z REAL NOT NULL,
                 qx REAL NOT NULL, qy REAL NOT NULL, qz REAL NOT NULL, qw REAL NOT NULL,
                 collected  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick         INTEGER PRIMARY KEY,
                 sim_time     REAL    NOT NULL,
                 moving       INTEGER NOT NULL,
                 waiting      INTEGER NOT NULL,
                 completed    INTEGER NOT NULL,
                 claims       INTEGER NOT NULL,
                 alternatives INTEGER NOT NULL,
                 exhausted    INTEGER NOT NULL,
                 reservations INTEGER NOT NULL,
                 pruned       INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, kind, tick, sim_time, phase, path_index, \
                  x, y, z, qx, qy, qz, qw, collected) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.kind.as_str(),
                    row.tick as i64,
                    row.sim_time,
                    row.phase.as_str(),
                    row.path_index,
                    row.x as f64,
                    row.y as f64,
                    row.z as f64,
                    row.qx as f64,
                    row.qy as f64,
                    row.qz as f64,
                    row.qw as f64,
                    row.collected,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, sim_time, moving, waiting, completed, claims, alternatives, \
              exhausted, reservations, pruned) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                row.tick as i64,
                row.sim_time,
                row.moving,
                row.waiting,
                row.completed,
                row.claims,
                row.alternatives,
                row.exhausted,
                row.reservations as i64,
                row.pruned as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
