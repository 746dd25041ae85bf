//! `MockPlanner`: seeded random walks standing in for the planning service.
//!
//! Not a path planner: walks ignore each other and cover nothing in
//! particular.  They do respect the field bounds and the obstacle layout,
//! and they include deliberate pauses (a repeated cell) so every motion
//! phase gets exercised.

use std::collections::BTreeSet;

use gf_core::{Cell, FleetPlan, GridDims, Route, SimRng, VehicleKind};

use crate::{PathPlanner, PlannerRequest, PlannerResult};

const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Seeded stand-in planner.  Two planners built with the same seed return
/// identical plans for the same sequence of requests.
pub struct MockPlanner {
    rng:         SimRng,
    /// Upper bound on steps per path, applied on top of the request's budget.
    pub max_steps: u32,
    /// Probability that a step repeats the current cell.
    pub pause_probability: f64,
}

impl MockPlanner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng:               SimRng::new(seed),
            max_steps:         40,
            pause_probability: 0.1,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_pause_probability(mut self, p: f64) -> Self {
        self.pause_probability = p;
        self
    }

    fn place_obstacles(&mut self, grid: GridDims, count: u32) -> BTreeSet<Cell> {
        let mut obstacles = BTreeSet::new();
        while obstacles.len() < count as usize {
            obstacles.insert(random_cell(&mut self.rng, grid));
        }
        obstacles
    }

    fn walk(
        rng:       &mut SimRng,
        grid:      GridDims,
        obstacles: &BTreeSet<Cell>,
        steps:     u32,
        pause:     f64,
    ) -> Vec<Cell> {
        let mut current = loop {
            let cell = random_cell(rng, grid);
            if !obstacles.contains(&cell) {
                break cell;
            }
        };

        let mut path = Vec::with_capacity(steps as usize + 1);
        path.push(current);
        for _ in 0..steps {
            if !rng.gen_bool(pause) {
                let options: Vec<Cell> = ORTHOGONAL
                    .iter()
                    .filter_map(|&(dx, dy)| current.offset(dx, dy))
                    .filter(|c| grid.contains(*c) && !obstacles.contains(c))
                    .collect();
                if let Some(&next) = rng.choose(&options) {
                    current = next;
                }
            }
            path.push(current);
        }
        path
    }
}

impl PathPlanner for MockPlanner {
    /// One tractor and one cart per requested vehicle, each a random walk of
    /// `min(step_budget, max_steps)` steps.
    fn plan(&mut self, request: &PlannerRequest) -> PlannerResult<FleetPlan> {
        request.validate()?;
        let grid  = request.grid();
        let steps = request.step_budget.min(self.max_steps);

        let obstacles = self.place_obstacles(grid, request.obstacles);
        let mut plan = FleetPlan::new();
        for kind in [VehicleKind::Tractor, VehicleKind::Cart] {
            for i in 0..request.vehicles {
                let offset = ((kind as u64) << 32) | i as u64;
                let mut rng = self.rng.child(offset);
                let path = Self::walk(&mut rng, grid, &obstacles, steps, self.pause_probability);
                plan.routes.push(Route::new(kind, path));
            }
        }
        plan.obstacles = obstacles;

        tracing::debug!(
            routes = plan.len(),
            obstacles = plan.obstacles.len(),
            steps,
            "mock plan generated",
        );
        Ok(plan)
    }
}

fn random_cell(rng: &mut SimRng, grid: GridDims) -> Cell {
    Cell::new(
        rng.gen_range(0..grid.width) as i32,
        rng.gen_range(0..grid.height) as i32,
    )
}
