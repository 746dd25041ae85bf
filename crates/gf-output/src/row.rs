//! Plain data row types written by output backends.

use gf_core::{SimTime, Tick, VehicleKind};
use gf_motion::{MotionPhase, PathExecutor};
use gf_sim::TickSummary;

/// One agent's world transform and progress at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:   u32,
    pub kind:       VehicleKind,
    pub tick:       u64,
    pub sim_time:   f64,
    pub phase:      MotionPhase,
    pub path_index: u32,
    /// World position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// World rotation quaternion.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub collected: u32,
}

impl AgentSnapshotRow {
    pub fn from_executor(tick: Tick, now: SimTime, exec: &PathExecutor) -> Self {
        let t = exec.transform();
        Self {
            agent_id:   exec.agent().0,
            kind:       exec.kind(),
            tick:       tick.0,
            sim_time:   now.secs(),
            phase:      exec.phase(),
            path_index: exec.path_index() as u32,
            x:          t.position.x,
            y:          t.position.y,
            z:          t.position.z,
            qx:         t.rotation.x,
            qy:         t.rotation.y,
            qz:         t.rotation.z,
            qw:         t.rotation.w,
            collected:  exec.collected(),
        }
    }
}

/// Fleet-wide statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub sim_time:     f64,
    pub moving:       u32,
    pub waiting:      u32,
    pub completed:    u32,
    pub claims:       u32,
    /// Leg targets replaced by a free neighbor.
    pub alternatives: u32,
    /// Leg targets kept on a contested cell.
    pub exhausted:    u32,
    pub reservations: u64,
    pub pruned:       u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:         s.tick.0,
            sim_time:     s.now.secs(),
            moving:       s.phases.moving as u32,
            waiting:      s.phases.waiting as u32,
            completed:    s.phases.completed as u32,
            claims:       s.stats.claims,
            alternatives: s.stats.alternatives,
            exhausted:    s.stats.exhausted,
            reservations: s.reservations as u64,
            pruned:       s.pruned as u64,
        }
    }
}
