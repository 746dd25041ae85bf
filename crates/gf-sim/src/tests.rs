//! Integration tests for gf-sim.

use gf_core::{
    AgentId, Cell, ClaimPolicy, FleetPlan, MotionParams, SimConfig, SimTime, Tick, Vec3,
    VehicleKind,
};
use gf_motion::{MotionPhase, MotionStore};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

/// 10×10 unit cells with world X/Z equal to the cell coordinates, quarter
/// second ticks and two-second legs.
fn test_config() -> SimConfig {
    SimConfig {
        tick_duration_secs:    0.25,
        global_time_step:      1.0,
        total_ticks:           1_000,
        output_interval_ticks: 4,
        motion: MotionParams {
            move_speed:        0.5,
            rotation_speed:    2.0,
            time_per_position: 1.0,
            clamp_rotation:    false,
        },
        ..SimConfig::default()
    }
    .with_grid(10, 10, 1.0, Vec3::new(5.0, 0.0, 5.0))
}

fn build(plan: FleetPlan) -> Sim {
    SimBuilder::new(test_config()).plan(plan).build().unwrap()
}

#[derive(Default)]
struct Recorder {
    starts:    u64,
    summaries: Vec<TickSummary>,
    snapshots: Vec<(Tick, usize)>,
    ended_at:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }

    fn on_snapshot(&mut self, tick: Tick, _now: SimTime, agents: &MotionStore) {
        self.snapshots.push((tick, agents.len()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_empty_without_plan() {
        let sim = SimBuilder::new(test_config()).build().unwrap();
        assert!(sim.agents.is_empty());
        assert!(sim.table.is_empty());
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn zero_grid_fails_fast() {
        let config = SimConfig::default().with_grid(0, 10, 1.0, Vec3::ZERO);
        let plan = FleetPlan::new().with_route(VehicleKind::Tractor, vec![c(0, 0)]);
        let result = SimBuilder::new(config).plan(plan).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn non_positive_time_fails_fast() {
        let config = SimConfig { tick_duration_secs: 0.0, ..test_config() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));

        let config = SimConfig { global_time_step: -1.0, ..test_config() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn plan_agents_started_at_tick_zero() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(2, 3), c(3, 3)])
            .with_route(VehicleKind::Cart, vec![c(7, 7), c(7, 7)]);
        let sim = build(plan);
        assert_eq!(sim.agents.len(), 2);
        assert_eq!(sim.table.reserved_at(c(2, 3)), Some(SimTime::ZERO));
        assert_eq!(sim.table.reserved_at(c(7, 7)), Some(SimTime::ZERO));
        assert_eq!(sim.transforms()[0].position, Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(sim.agents.get(AgentId(1)).unwrap().kind(), VehicleKind::Cart);
    }

    #[test]
    fn obstacles_are_kept() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0)])
            .with_obstacles([c(1, 0), c(4, 4)]);
        let sim = build(plan);
        assert_eq!(sim.obstacles.len(), 2);
        assert!(sim.is_obstacle(c(4, 4)));
        assert!(!sim.is_obstacle(c(0, 0)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn repeated_cell_scenario_runs_to_completion() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0), c(1, 0), c(2, 0)]);
        let mut sim = build(plan);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        // Wait 1 s, move 2 s, wait 1 s, move 2 s: done at t = 6.0.
        assert_eq!(sim.current_tick(), Tick(24));
        assert_eq!(sim.clock.now(), SimTime(6.0));
        assert_eq!(rec.ended_at, Some(Tick(24)));
        assert_eq!(rec.starts, 24);
        assert_eq!(sim.transforms()[0].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(sim.agents.phase_counts().completed, 1);

        // The pause at (1,0) covers t = 3.0 .. 4.0 (ticks 12..16).
        let waiting: Vec<u64> = rec
            .summaries
            .iter()
            .filter(|s| s.phases.waiting == 1)
            .map(|s| s.tick.0)
            .collect();
        assert_eq!(waiting, vec![1, 2, 3, 12, 13, 14, 15]);
    }

    #[test]
    fn run_stops_at_tick_limit() {
        let config = SimConfig { total_ticks: 10, ..test_config() };
        let plan = FleetPlan::new().with_route(VehicleKind::Tractor, vec![c(0, 0), c(9, 9)]);
        let mut sim = SimBuilder::new(config).plan(plan).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(10));
        assert_eq!(sim.agents.phase_counts().moving, 1);
    }

    #[test]
    fn run_ticks_ignores_completion() {
        let mut sim = build(FleetPlan::new());
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0), c(1, 0), c(2, 0)]);
        let mut sim = build(plan);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<u64> = rec.snapshots.iter().map(|(t, _)| t.0).collect();
        assert_eq!(ticks, vec![4, 8, 12, 16, 20, 24]);
        assert!(rec.snapshots.iter().all(|&(_, n)| n == 1));
    }

    #[test]
    fn scheduled_cleanup_prunes_stale_claims() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0), c(1, 0), c(2, 0)]);
        let mut sim = build(plan);
        sim.run(&mut NoopObserver).unwrap();

        // At t = 6.0 only the claim on (2,0) from t = 4.0 is within 2 s.
        assert_eq!(sim.table.len(), 1);
        assert_eq!(sim.table.reserved_at(c(2, 0)), Some(SimTime(4.0)));

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(sim.table.is_empty());
        assert_eq!(rec.summaries[0].pruned, 1);
    }

    #[test]
    fn cleanup_interval_is_respected() {
        let config = SimConfig { cleanup_interval_ticks: 4, ..test_config() };
        let plan = FleetPlan::new().with_route(VehicleKind::Tractor, vec![c(0, 0)]);
        let mut sim = SimBuilder::new(config).plan(plan).build().unwrap();

        // The claim from t = 0 is stale after t = 2.0 (tick 8), but cleanup
        // only runs on multiples of 4: tick 12 is the first to prune it.
        let mut rec = Recorder::default();
        sim.run_ticks(12, &mut rec).unwrap();
        let pruned_at: Vec<u64> = rec
            .summaries
            .iter()
            .filter(|s| s.pruned > 0)
            .map(|s| s.tick.0)
            .collect();
        assert_eq!(pruned_at, vec![12]);
    }

    #[test]
    fn earlier_agent_wins_contested_cell() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(5, 5), c(5, 6)])
            .with_route(VehicleKind::Cart, vec![c(5, 5), c(5, 6)]);
        let sim = build(plan);
        let a = sim.agents.get(AgentId(0)).unwrap();
        let b = sim.agents.get(AgentId(1)).unwrap();
        assert_eq!(a.state().target_cell, c(5, 5));
        assert_eq!(b.state().target_cell, c(5, 6));
        assert_eq!(sim.config.claim_policy, ClaimPolicy::ClaimResolved);
        assert_eq!(sim.table.reserved_at(c(5, 6)), Some(SimTime::ZERO));
    }

    #[test]
    fn contention_at_coordinate_limit_does_not_overflow() {
        let far = c(i32::MAX, 0);
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![far, far])
            .with_route(VehicleKind::Cart, vec![far, c(0, 0)]);
        let mut sim = build(plan);
        let b = sim.agents.get(AgentId(1)).unwrap();
        assert_eq!(b.state().target_cell, far);

        sim.run_ticks(40, &mut NoopObserver).unwrap();
        assert_eq!(sim.agents.get(AgentId(0)).unwrap().phase(), MotionPhase::Completed);
    }

    #[test]
    fn identical_runs_are_identical() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 1), c(2, 2), c(3, 3)])
            .with_route(VehicleKind::Cart, vec![c(3, 3), c(2, 2), c(1, 1), c(0, 0)])
            .with_route(VehicleKind::Cart, vec![c(2, 2), c(2, 2), c(3, 2)]);
        let mut a = build(plan.clone());
        let mut b = build(plan);
        let mut ra = Recorder::default();
        let mut rb = Recorder::default();
        a.run(&mut ra).unwrap();
        b.run(&mut rb).unwrap();
        assert_eq!(a.transforms(), b.transforms());
        assert_eq!(ra.summaries, rb.summaries);
    }

    #[test]
    fn empty_path_agent_is_inert_others_run() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, Vec::new())
            .with_route(VehicleKind::Cart, vec![c(0, 0), c(1, 0)]);
        let mut sim = SimBuilder::new(test_config()).build().unwrap();
        let inert = sim.load_fleet(plan).unwrap();
        assert_eq!(inert, vec![AgentId(0)]);

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.agents.get(AgentId(0)).unwrap().phase(), MotionPhase::Idle);
        assert_eq!(sim.agents.get(AgentId(1)).unwrap().phase(), MotionPhase::Completed);
    }
}

// ── Reset and external triggers ───────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn reset_clears_everything_together() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0)])
            .with_obstacles([c(5, 5)]);
        let mut sim = build(plan);
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(!sim.table.is_empty());

        sim.reset();
        assert!(sim.agents.is_empty());
        assert!(sim.table.is_empty());
        assert!(sim.obstacles.is_empty());
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert!(sim.last_summary.is_none());
    }

    #[test]
    fn reload_after_reset() {
        let plan = FleetPlan::new().with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0)]);
        let mut sim = build(plan.clone());
        sim.run(&mut NoopObserver).unwrap();
        let first = sim.current_tick();

        sim.reset();
        sim.load_fleet(plan).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), first);
    }

    #[test]
    fn second_load_without_reset_is_rejected() {
        let plan = FleetPlan::new().with_route(VehicleKind::Tractor, vec![c(0, 0)]);
        let mut sim = build(plan.clone());
        assert!(matches!(sim.load_fleet(plan), Err(SimError::FleetLoaded(1))));
    }

    #[test]
    fn collected_counter() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0)])
            .with_route(VehicleKind::Cart, vec![c(1, 1)]);
        let mut sim = build(plan);
        assert_eq!(sim.record_collected(AgentId(0)).unwrap(), 1);
        assert_eq!(sim.record_collected(AgentId(0)).unwrap(), 2);
        assert_eq!(sim.record_collected(AgentId(1)).unwrap(), 1);
        assert_eq!(sim.total_collected(), 3);
        assert!(matches!(
            sim.record_collected(AgentId(9)),
            Err(SimError::AgentNotFound(AgentId(9)))
        ));
    }
}
