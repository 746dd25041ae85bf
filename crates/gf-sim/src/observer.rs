//! Simulation observer trait for progress reporting and data collection.

use gf_core::{SimTime, Tick};
use gf_motion::{MotionStore, PhaseCounts, TickStats};

/// What happened during one tick, summed over the fleet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickSummary {
    pub tick: Tick,
    /// Simulated time the agents saw this tick.
    pub now: SimTime,
    pub stats: TickStats,
    /// Agent phases after the tick.
    pub phases: PhaseCounts,
    /// Live reservation entries after cleanup.
    pub reservations: usize,
    /// Entries removed by cleanup this tick (0 on ticks without cleanup).
    pub pruned: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} moving", summary.tick, summary.phases.moving);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the clock advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been updated and cleanup has run.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with read-only access
    /// to every agent, so writers can record transforms without the sim
    /// knowing any output format.
    fn on_snapshot(&mut self, _tick: Tick, _now: SimTime, _agents: &MotionStore) {}

    /// Called once when a run stops, whether at the tick limit or because
    /// every agent finished.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
