//! `gf-sim`: tick loop orchestrator for the grid_fleet engine.
//!
//! # Tick loop
//!
//! ```text
//! while tick < config.total_ticks and some agent is still active:
//!   ① Clock   : advance one tick; now = tick × tick_duration × time_scale.
//!   ② Agents  : PathExecutor::tick for each agent in ascending AgentId
//!                order, all sharing one ReservationTable borrow.
//!   ③ Cleanup : every cleanup_interval_ticks, prune claims older than
//!                2 × global_time_step.
//!   ④ Observe : on_tick_end(summary); on_snapshot on output ticks.
//! ```
//!
//! Agents are created and started (tick 0, leg setup for index 0) when a
//! [`FleetPlan`][gf_core::FleetPlan] is loaded.  [`Sim::reset`] clears the
//! fleet, the table and the clock together.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash for the reservation table's cell map.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gf_core::{Cell, FleetPlan, SimConfig, VehicleKind};
//! use gf_sim::{NoopObserver, SimBuilder};
//!
//! let plan = FleetPlan::new()
//!     .with_route(VehicleKind::Tractor, vec![Cell::new(0, 0), Cell::new(1, 0)]);
//! let mut sim = SimBuilder::new(SimConfig::default()).plan(plan).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
