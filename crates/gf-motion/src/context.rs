//! Per-tick state lent to every executor.

use gf_core::SimTime;
use gf_reserve::ReservationTable;

/// Counters accumulated across all agents during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Cells reserved (planned cells plus claimed alternatives).
    pub claims: u32,
    /// Leg targets replaced by a free neighbor.
    pub alternatives: u32,
    /// Leg targets kept on a blocked cell because no neighbor qualified.
    pub exhausted: u32,
    /// Moving legs that reached their target.
    pub arrivals: u32,
    /// Agents that reached the end of their path.
    pub completions: u32,
}

/// The shared state one tick lends to every [`PathExecutor`][crate::PathExecutor].
///
/// Built once per tick by the simulation loop and passed to each agent in
/// turn.  The mutable table borrow makes the sequential visiting order
/// explicit: an agent's claims are visible to every agent updated after it
/// in the same tick.
pub struct MotionContext<'a> {
    /// Simulated time after this tick's clock advance.
    pub now: SimTime,

    /// Scaled seconds covered by this tick.
    pub dt: f64,

    /// The fleet-wide reservation table.
    pub table: &'a mut ReservationTable,

    /// Counters for this tick, summed over agents.
    pub stats: TickStats,
}

impl<'a> MotionContext<'a> {
    #[inline]
    pub fn new(now: SimTime, dt: f64, table: &'a mut ReservationTable) -> Self {
        Self { now, dt, table, stats: TickStats::default() }
    }
}
