//! JSON wire contract of the path-planning service.
//!
//! The service speaks a fixed, partly Spanish-keyed schema:
//!
//! ```text
//! request   { "x": 10, "y": 10, "tractores": 2, "pasos": 1200, "obstaculos": 5 }
//! response  { "tractors_positions":       [[[x, y], ...], ...],
//!             "carts_positions":          [[[x, y], ...], ...],
//!             "posiciones_de_obstaculos": [[x, y], ...] }
//! ```
//!
//! Coordinates arrive as floating-point pairs but must be integral.  The
//! Rust field names are English; `serde(rename)` maps them to the wire keys.

use gf_core::{Cell, FleetPlan, GridDims, Route, VehicleKind};
use serde::{Deserialize, Serialize};

use crate::{PlannerError, PlannerResult};

/// Step budget the field front-end always requests.
pub const DEFAULT_STEP_BUDGET: u32 = 1200;

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerRequest {
    /// Field width in cells.
    #[serde(rename = "x")]
    pub width: u32,
    /// Field height in cells.
    #[serde(rename = "y")]
    pub height: u32,
    /// Number of tractors; the service pairs each with a cart.
    #[serde(rename = "tractores")]
    pub vehicles: u32,
    #[serde(rename = "pasos")]
    pub step_budget: u32,
    #[serde(rename = "obstaculos")]
    pub obstacles: u32,
}

impl PlannerRequest {
    pub fn new(grid: GridDims, vehicles: u32, obstacles: u32) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            vehicles,
            step_budget: DEFAULT_STEP_BUDGET,
            obstacles,
        }
    }

    #[inline]
    pub fn grid(&self) -> GridDims {
        GridDims::new(self.width, self.height)
    }

    /// Reject requests no field could satisfy.
    pub fn validate(&self) -> PlannerResult<()> {
        self.grid()
            .validate()
            .map_err(|e| PlannerError::InvalidRequest(e.to_string()))?;
        if self.vehicles == 0 {
            return Err(PlannerError::InvalidRequest("at least one tractor is required".into()));
        }
        let cells = self.width as u64 * self.height as u64;
        if self.obstacles as u64 >= cells {
            return Err(PlannerError::InvalidRequest(format!(
                "{} obstacles leave no free cell on a {}x{} field",
                self.obstacles, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ── Response ──────────────────────────────────────────────────────────────────

/// One `[x, y]` pair exactly as it appears on the wire.
pub type WirePoint = [f64; 2];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerResponse {
    #[serde(rename = "tractors_positions")]
    pub tractors: Vec<Vec<WirePoint>>,
    #[serde(rename = "carts_positions", default)]
    pub carts: Vec<Vec<WirePoint>>,
    #[serde(rename = "posiciones_de_obstaculos", default)]
    pub obstacles: Vec<WirePoint>,
}

impl PlannerResponse {
    /// Parse a response body.
    pub fn parse(body: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wire form of a solved plan.
    pub fn from_plan(plan: &FleetPlan) -> Self {
        let points = |path: &[Cell]| -> Vec<WirePoint> {
            path.iter().map(|c| [c.x as f64, c.y as f64]).collect()
        };
        let of_kind = |kind: VehicleKind| -> Vec<Vec<WirePoint>> {
            plan.routes
                .iter()
                .filter(|r| r.kind == kind)
                .map(|r| points(r.path.as_slice()))
                .collect()
        };
        Self {
            tractors:  of_kind(VehicleKind::Tractor),
            carts:     of_kind(VehicleKind::Cart),
            obstacles: plan.obstacles.iter().map(|c| [c.x as f64, c.y as f64]).collect(),
        }
    }

    /// Convert to a [`FleetPlan`]: tractor routes first, then cart routes.
    ///
    /// # Errors
    ///
    /// [`PlannerError::NonIntegral`] for any coordinate that is not a finite
    /// integer within `i32` range.  No partial plan is returned.
    pub fn into_plan(self) -> PlannerResult<FleetPlan> {
        let mut plan = FleetPlan::new();
        for (kind, paths) in [(VehicleKind::Tractor, self.tractors), (VehicleKind::Cart, self.carts)] {
            for (i, path) in paths.into_iter().enumerate() {
                let cells = path
                    .into_iter()
                    .map(|p| to_cell(p, || format!("{kind} path {i}")))
                    .collect::<PlannerResult<Vec<_>>>()?;
                plan.routes.push(Route::new(kind, cells));
            }
        }
        for p in self.obstacles {
            plan.obstacles.insert(to_cell(p, || "obstacle list".to_owned())?);
        }
        Ok(plan)
    }
}

/// Parse a response body straight into a [`FleetPlan`].
pub fn parse_plan(body: &str) -> PlannerResult<FleetPlan> {
    PlannerResponse::parse(body)?.into_plan()
}

fn to_cell(point: WirePoint, context: impl FnOnce() -> String) -> PlannerResult<Cell> {
    let [x, y] = point;
    match (integral(x), integral(y)) {
        (Some(cx), Some(cy)) => Ok(Cell::new(cx, cy)),
        _ => Err(PlannerError::NonIntegral { context: context(), x, y }),
    }
}

fn integral(v: f64) -> Option<i32> {
    let in_range = v >= i32::MIN as f64 && v <= i32::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i32)
}
