//! `gf-planner`: the boundary to the external path-planning service.
//!
//! The engine never computes paths.  This crate describes what it asks for
//! ([`PlannerRequest`]), validates what comes back ([`PlannerResponse`] →
//! [`FleetPlan`][gf_core::FleetPlan]) and offers a few ways to obtain a plan:
//!
//! | Planner            | Source                                   |
//! |--------------------|------------------------------------------|
//! | [`JsonFilePlanner`]| a stored response body on disk           |
//! | [`MockPlanner`]    | seeded random walks (demos and tests)    |
//! | `HttpPlanner`      | the live service (feature `http`)        |

pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod mock;
pub mod planner;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::{PlannerError, PlannerResult};
#[cfg(feature = "http")]
pub use http::{DEFAULT_PLANNER_URL, DEFAULT_TIMEOUT_MS, HttpPlanner};
pub use mock::MockPlanner;
pub use planner::{JsonFilePlanner, PathPlanner};
pub use wire::{DEFAULT_STEP_BUDGET, PlannerRequest, PlannerResponse, WirePoint, parse_plan};
