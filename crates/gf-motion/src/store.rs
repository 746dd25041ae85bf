//! The `MotionStore`: every agent's executor, indexed by `AgentId`.

use gf_core::{AgentId, Cell, ClaimPolicy, GridMapping, MotionParams, VehicleKind};

use crate::{AgentTransform, MotionContext, MotionError, MotionPhase, PathExecutor};

/// Number of agents in each phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub idle:      usize,
    pub moving:    usize,
    pub waiting:   usize,
    pub completed: usize,
}

/// Holds one [`PathExecutor`] per agent.
///
/// `executors[i]` belongs to `AgentId(i)`; ids are handed out densely by
/// [`spawn`](Self::spawn) and never reused until [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct MotionStore {
    pub executors: Vec<PathExecutor>,
}

impl MotionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an `Idle` executor for `path` and return its id.
    pub fn spawn(
        &mut self,
        kind:    VehicleKind,
        path:    Vec<Cell>,
        mapping: GridMapping,
        params:  MotionParams,
        policy:  ClaimPolicy,
    ) -> AgentId {
        let agent = AgentId(self.executors.len() as u32);
        self.executors
            .push(PathExecutor::new(agent, kind, path, mapping, params, policy));
        agent
    }

    /// Start every `Idle` executor in ascending `AgentId` order.
    ///
    /// Agents with an empty path stay inert; a warning is logged and the rest
    /// of the fleet starts normally.  Returns the ids that could not start.
    pub fn start_all(&mut self, ctx: &mut MotionContext<'_>) -> Vec<AgentId> {
        let mut inert = Vec::new();
        for exec in self.executors.iter_mut().filter(|e| e.phase() == MotionPhase::Idle) {
            match exec.start(ctx) {
                Ok(()) => {}
                Err(MotionError::EmptyPath(agent)) => {
                    tracing::warn!(%agent, "empty path; agent stays idle");
                    inert.push(agent);
                }
                Err(e) => {
                    tracing::warn!(agent = %exec.agent(), error = %e, "agent failed to start");
                    inert.push(exec.agent());
                }
            }
        }
        inert
    }

    /// Tick every executor in ascending `AgentId` order.
    ///
    /// The order is the contention tie-break: an earlier agent's claims are
    /// already in the table when a later agent checks availability.
    pub fn tick_all(&mut self, ctx: &mut MotionContext<'_>) {
        for exec in &mut self.executors {
            exec.tick(ctx);
        }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&PathExecutor> {
        self.executors.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut PathExecutor> {
        self.executors.get_mut(agent.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathExecutor> {
        self.executors.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    /// Drop every executor.  Part of the simulation reset.
    pub fn clear(&mut self) {
        self.executors.clear();
    }

    /// `true` when no agent will ever move again.  Vacuously true when empty.
    pub fn all_finished(&self) -> bool {
        self.executors.iter().all(PathExecutor::is_finished)
    }

    pub fn phase_counts(&self) -> PhaseCounts {
        let mut counts = PhaseCounts::default();
        for exec in &self.executors {
            match exec.phase() {
                MotionPhase::Idle      => counts.idle += 1,
                MotionPhase::Moving    => counts.moving += 1,
                MotionPhase::Waiting   => counts.waiting += 1,
                MotionPhase::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// World transforms of every agent, in `AgentId` order.
    pub fn transforms(&self) -> Vec<AgentTransform> {
        self.executors.iter().map(PathExecutor::transform).collect()
    }

    /// Sum of every agent's collected counter.
    pub fn total_collected(&self) -> u64 {
        self.executors.iter().map(|e| e.collected() as u64).sum()
    }
}
