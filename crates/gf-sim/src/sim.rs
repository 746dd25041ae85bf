//! The `Sim` struct and its tick loop.

use std::collections::BTreeSet;

use gf_core::{AgentId, Cell, FleetPlan, GridMapping, SimClock, SimConfig, Tick};
use gf_motion::{AgentTransform, MotionContext, MotionStore};
use gf_reserve::ReservationTable;

use crate::{SimError, SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Sim` owns every piece of shared state (the clock and the reservation
/// table) together with the fleet, and drives the tick loop:
///
/// 1. **Clock**: advance by one tick; `now` and `dt` are derived from it.
/// 2. **Agents**: every executor runs in ascending `AgentId` order against a
///    [`MotionContext`] borrowing the table, so earlier agents win
///    contested cells.
/// 3. **Cleanup**: every `cleanup_interval_ticks` ticks, prune reservations
///    older than twice the window.
/// 4. **Observers**: tick summary, then a snapshot on output ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Validated configuration for this run.
    pub config: SimConfig,

    /// Simulation clock.  Only [`Sim::reset`] moves it backwards.
    pub clock: SimClock,

    /// Fleet-wide reservation table.
    pub table: ReservationTable,

    /// One path executor per agent, indexed by `AgentId`.
    pub agents: MotionStore,

    /// Obstacle cells from the loaded plan.
    pub obstacles: BTreeSet<Cell>,

    /// Grid → world mapping shared by every executor.
    pub mapping: GridMapping,

    /// Summary of the most recent tick, `None` before the first.
    pub last_summary: Option<TickSummary>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.end_tick()` or until every agent has finished,
    /// whichever comes first.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() && !self.agents.all_finished() {
            self.step(observer);
        }
        let final_tick = self.clock.current_tick;
        tracing::info!(
            %final_tick,
            now = %self.clock.now(),
            completed = self.agents.phase_counts().completed,
            agents = self.agents.len(),
            "run finished",
        );
        observer.on_sim_end(final_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and completion).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Clear agents, reservations, obstacles and the clock in one step.
    ///
    /// The configuration is kept; call [`load_fleet`](Self::load_fleet) to
    /// start a new run.
    pub fn reset(&mut self) {
        let dropped = self.agents.len();
        self.agents.clear();
        self.table.clear();
        self.obstacles.clear();
        self.clock.reset();
        self.last_summary = None;
        tracing::info!(dropped, "simulation reset");
    }

    /// Create one agent per route and start each at the current time.
    ///
    /// Agents are assigned `AgentId`s in route order.  Returns the ids of
    /// agents left inert because their path is empty.
    ///
    /// # Errors
    ///
    /// [`SimError::FleetLoaded`] if agents are already present.
    pub fn load_fleet(&mut self, plan: FleetPlan) -> SimResult<Vec<AgentId>> {
        if !self.agents.is_empty() {
            return Err(SimError::FleetLoaded(self.agents.len()));
        }

        for (route, cell) in plan.obstacle_hits() {
            tracing::warn!(route, %cell, "path crosses an obstacle cell");
        }
        let grid = self.config.grid;
        for (i, route) in plan.routes.iter().enumerate() {
            if let Some(cell) = route.path.iter().find(|c| !grid.contains(**c)) {
                tracing::warn!(route = i, %cell, "path leaves the grid");
            }
        }

        let FleetPlan { routes, obstacles } = plan;
        self.obstacles = obstacles;
        for route in routes {
            self.agents.spawn(
                route.kind,
                route.path,
                self.mapping,
                self.config.motion,
                self.config.claim_policy,
            );
        }

        let mut ctx = MotionContext::new(self.clock.now(), self.clock.step_secs(), &mut self.table);
        let inert = self.agents.start_all(&mut ctx);
        tracing::info!(
            agents = self.agents.len(),
            inert = inert.len(),
            obstacles = self.obstacles.len(),
            "fleet loaded",
        );
        Ok(inert)
    }

    /// Increment `agent`'s collected counter and return the new value.
    pub fn record_collected(&mut self, agent: AgentId) -> SimResult<u32> {
        let exec = self.agents.get_mut(agent).ok_or(SimError::AgentNotFound(agent))?;
        exec.record_collected();
        Ok(exec.collected())
    }

    /// Sum of every agent's collected counter.
    #[inline]
    pub fn total_collected(&self) -> u64 {
        self.agents.total_collected()
    }

    /// Current world transform of every agent, in `AgentId` order.
    pub fn transforms(&self) -> Vec<AgentTransform> {
        self.agents.transforms()
    }

    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_tick_start(self.clock.current_tick);
        let summary = self.process_tick();
        observer.on_tick_end(&summary);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && summary.tick.0 % interval == 0 {
            observer.on_snapshot(summary.tick, summary.now, &self.agents);
        }
        self.last_summary = Some(summary);
    }

    fn process_tick(&mut self) -> TickSummary {
        // ── Phase 1: clock ────────────────────────────────────────────────
        self.clock.advance();
        let tick = self.clock.current_tick;
        let now  = self.clock.now();

        // ── Phase 2: agents, ascending AgentId ────────────────────────────
        let mut ctx = MotionContext::new(now, self.clock.step_secs(), &mut self.table);
        self.agents.tick_all(&mut ctx);
        let stats = ctx.stats;

        // ── Phase 3: scheduled cleanup ────────────────────────────────────
        let pruned = if tick.0 % self.config.cleanup_interval_ticks == 0 {
            self.table.cleanup(now)
        } else {
            0
        };

        if stats.exhausted > 0 {
            tracing::debug!(%tick, exhausted = stats.exhausted, "contested cells reused");
        }

        TickSummary {
            tick,
            now,
            stats,
            phases:       self.agents.phase_counts(),
            reservations: self.table.len(),
            pruned,
        }
    }
}
