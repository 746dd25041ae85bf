//! Tests for the demo's harvest trigger.

use gf_core::{AgentId, Cell, FleetPlan, MotionParams, SimConfig, Vec3, VehicleKind};
use gf_sim::{NoopObserver, Sim, SimBuilder};

use crate::{LegTracker, harvest};

fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

/// Unit cells, quarter-second ticks, two-second legs.
fn build(plan: FleetPlan) -> Sim {
    let config = SimConfig {
        tick_duration_secs: 0.25,
        global_time_step:   1.0,
        total_ticks:        1_000,
        motion: MotionParams {
            move_speed:        0.5,
            rotation_speed:    2.0,
            time_per_position: 1.0,
            clamp_rotation:    false,
        },
        ..SimConfig::default()
    }
    .with_grid(10, 10, 1.0, Vec3::new(5.0, 0.0, 5.0));
    SimBuilder::new(config).plan(plan).build().unwrap()
}

fn run_to_completion(sim: &mut Sim) {
    let mut tracker = LegTracker::new(sim);
    while !sim.agents.all_finished() && sim.current_tick() < sim.config.end_tick() {
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        harvest(sim, &mut tracker).unwrap();
    }
}

#[cfg(test)]
mod harvest_tests {
    use super::*;

    #[test]
    fn pauses_are_not_harvested() {
        // Two driven legs; the start cell and the repeated (1, 0) are pauses.
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(1, 0), c(1, 0), c(2, 0)]);
        let mut sim = build(plan);
        run_to_completion(&mut sim);
        assert!(sim.agents.all_finished());
        assert_eq!(sim.agents.get(AgentId(0)).unwrap().collected(), 2);
    }

    #[test]
    fn only_tractors_harvest() {
        let plan = FleetPlan::new()
            .with_route(VehicleKind::Cart, vec![c(5, 5), c(5, 6), c(5, 7)])
            .with_route(VehicleKind::Tractor, vec![c(0, 0), c(0, 1)]);
        let mut sim = build(plan);
        run_to_completion(&mut sim);
        assert_eq!(sim.agents.get(AgentId(0)).unwrap().collected(), 0);
        assert_eq!(sim.agents.get(AgentId(1)).unwrap().collected(), 1);
        assert_eq!(sim.total_collected(), 1);
    }
}
