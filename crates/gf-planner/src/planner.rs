//! The `PathPlanner` seam and the file-replay planner.

use std::path::{Path, PathBuf};

use gf_core::{FleetPlan, VehicleKind};

use crate::{PlannerRequest, PlannerResult, parse_plan};

/// Anything that turns a field description into solved paths.
///
/// The engine treats the result as ground truth: it never re-plans and never
/// checks reachability, only that coordinates are integral cells.
pub trait PathPlanner {
    fn plan(&mut self, request: &PlannerRequest) -> PlannerResult<FleetPlan>;
}

/// Replays a stored planner response from disk.
///
/// The request only feeds the log line; the file decides the fleet.
#[derive(Clone, Debug)]
pub struct JsonFilePlanner {
    path: PathBuf,
}

impl JsonFilePlanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PathPlanner for JsonFilePlanner {
    fn plan(&mut self, request: &PlannerRequest) -> PlannerResult<FleetPlan> {
        let body = std::fs::read_to_string(&self.path)?;
        let plan = parse_plan(&body)?;

        let tractors = plan.count_of(VehicleKind::Tractor);
        if tractors != request.vehicles as usize {
            tracing::warn!(
                requested = request.vehicles,
                stored = tractors,
                file = %self.path.display(),
                "stored response has a different tractor count",
            );
        }
        tracing::info!(
            file = %self.path.display(),
            routes = plan.len(),
            obstacles = plan.obstacles.len(),
            "planner response loaded",
        );
        Ok(plan)
    }
}
