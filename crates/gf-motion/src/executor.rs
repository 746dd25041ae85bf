//! `PathExecutor`: drives one agent along its path, one tick at a time.

use gf_core::{AgentId, Cell, ClaimPolicy, GridMapping, MotionParams, Quat, Vec3, VehicleKind};
use gf_reserve::{Resolution, resolve_alternative};

use crate::{AgentMotionState, MotionContext, MotionError, MotionPhase, MotionResult};

/// World transform of one agent's visual proxy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentTransform {
    pub agent:    AgentId,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Reservation-aware path follower for a single agent.
///
/// The executor owns its path and motion state exclusively; the only state
/// it shares with other agents is the reservation table lent through
/// [`MotionContext`] for the duration of one [`tick`](Self::tick).
#[derive(Debug, Clone)]
pub struct PathExecutor {
    agent:     AgentId,
    kind:      VehicleKind,
    path:      Vec<Cell>,
    mapping:   GridMapping,
    params:    MotionParams,
    policy:    ClaimPolicy,
    state:     AgentMotionState,
    collected: u32,
}

impl PathExecutor {
    /// Create an `Idle` executor.  Nothing moves until [`start`](Self::start).
    pub fn new(
        agent:   AgentId,
        kind:    VehicleKind,
        path:    Vec<Cell>,
        mapping: GridMapping,
        params:  MotionParams,
        policy:  ClaimPolicy,
    ) -> Self {
        Self {
            agent,
            kind,
            path,
            mapping,
            params,
            policy,
            state: AgentMotionState::idle(),
            collected: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Snap to the first path cell and set up the first leg.
    ///
    /// # Errors
    ///
    /// [`MotionError::EmptyPath`] leaves the executor `Idle` for good; the
    /// caller decides whether that is worth more than a warning.
    /// [`MotionError::AlreadyStarted`] if the executor left `Idle` before.
    pub fn start(&mut self, ctx: &mut MotionContext<'_>) -> MotionResult<()> {
        if self.state.phase != MotionPhase::Idle {
            return Err(MotionError::AlreadyStarted(self.agent));
        }
        let Some(&first) = self.path.first() else {
            return Err(MotionError::EmptyPath(self.agent));
        };

        self.state.place(self.mapping.world(first), ctx.now);
        self.setup_leg(ctx);
        Ok(())
    }

    /// Advance this agent by one tick.
    ///
    /// `Idle` and `Completed` executors accept the call as a no-op.
    pub fn tick(&mut self, ctx: &mut MotionContext<'_>) {
        match self.state.phase {
            MotionPhase::Idle | MotionPhase::Completed => return,

            MotionPhase::Waiting => {
                if self.state.accumulate_wait(ctx.dt, self.params.time_per_position) {
                    self.advance(ctx);
                }
            }

            MotionPhase::Moving => {
                let fraction = self.state.translation_fraction(ctx.now, self.params.move_speed);
                if fraction >= 1.0 {
                    self.state.position = self.state.leg_target;
                    ctx.stats.arrivals += 1;
                    self.advance(ctx);
                } else {
                    self.state.position = self.state.position_at(fraction);
                }
            }
        }

        if !self.state.is_completed() {
            let fraction = self.state.rotation_fraction(
                ctx.now,
                self.params.rotation_speed,
                self.params.clamp_rotation,
            );
            self.state.rotation = self.state.rotation_at(fraction);
        }
    }

    // ── Leg handling ──────────────────────────────────────────────────────

    fn advance(&mut self, ctx: &mut MotionContext<'_>) {
        if self.state.advance_index(self.path.len()) {
            self.setup_leg(ctx);
        } else {
            ctx.stats.completions += 1;
            tracing::debug!(agent = %self.agent, now = %ctx.now, "path completed");
        }
    }

    /// Decide and claim the target for `path[path_index]`, then begin the leg.
    fn setup_leg(&mut self, ctx: &mut MotionContext<'_>) {
        let planned = self.path[self.state.path_index];

        let target = if ctx.table.is_available(planned, ctx.now) {
            ctx.table.reserve(planned, ctx.now);
            ctx.stats.claims += 1;
            planned
        } else {
            match resolve_alternative(planned, &self.path, ctx.now, ctx.table) {
                Resolution::Alternative(cell) => {
                    ctx.stats.alternatives += 1;
                    if self.policy == ClaimPolicy::ClaimResolved {
                        ctx.table.reserve(cell, ctx.now);
                        ctx.stats.claims += 1;
                    }
                    tracing::debug!(
                        agent = %self.agent, blocked = %planned, alternative = %cell, now = %ctx.now,
                        "leg target re-routed",
                    );
                    cell
                }
                Resolution::Exhausted(cell) => {
                    ctx.stats.exhausted += 1;
                    tracing::warn!(
                        agent = %self.agent, cell = %cell, now = %ctx.now,
                        "no free alternative on own path; heading into contested cell",
                    );
                    cell
                }
            }
        };

        let world = self.mapping.world(target);
        self.state.begin_leg(target, world, ctx.now);
    }

    // ── External triggers ─────────────────────────────────────────────────

    /// Count one collectible consumed by this agent.
    #[inline]
    pub fn record_collected(&mut self) {
        self.collected += 1;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    #[inline]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.state.phase
    }

    #[inline]
    pub fn path_index(&self) -> usize {
        self.state.path_index
    }

    #[inline]
    pub fn state(&self) -> &AgentMotionState {
        &self.state
    }

    #[inline]
    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// `true` once the agent will never move again: completed, or never
    /// startable because its path is empty.
    #[inline]
    pub fn is_finished(&self) -> bool {
        match self.state.phase {
            MotionPhase::Completed => true,
            MotionPhase::Idle      => self.path.is_empty(),
            _                      => false,
        }
    }

    /// Current world transform.
    #[inline]
    pub fn transform(&self) -> AgentTransform {
        AgentTransform {
            agent:    self.agent,
            position: self.state.position,
            rotation: self.state.rotation,
        }
    }
}
