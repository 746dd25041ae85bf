//! `FleetPlan`: the solved input a simulation run consumes.

use std::collections::BTreeSet;

use crate::{Cell, VehicleKind};

/// One vehicle's pre-computed path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub kind: VehicleKind,
    pub path: Vec<Cell>,
}

impl Route {
    pub fn new(kind: VehicleKind, path: Vec<Cell>) -> Self {
        Self { kind, path }
    }
}

/// Paths for the whole fleet plus the obstacle layout.
///
/// Route order determines `AgentId` assignment when the plan is loaded:
/// `routes[i]` becomes `AgentId(i)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetPlan {
    pub routes:    Vec<Route>,
    pub obstacles: BTreeSet<Cell>,
}

impl FleetPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, kind: VehicleKind, path: Vec<Cell>) -> Self {
        self.routes.push(Route::new(kind, path));
        self
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Cell>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of routes of the given vehicle kind.
    pub fn count_of(&self, kind: VehicleKind) -> usize {
        self.routes.iter().filter(|r| r.kind == kind).count()
    }

    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// `(route index, cell)` for every path cell that lies on an obstacle.
    pub fn obstacle_hits(&self) -> Vec<(usize, Cell)> {
        self.routes
            .iter()
            .enumerate()
            .flat_map(|(i, r)| {
                r.path
                    .iter()
                    .filter(|c| self.obstacles.contains(c))
                    .map(move |&c| (i, c))
            })
            .collect()
    }
}
