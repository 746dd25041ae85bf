//! `gf-core`: foundational types for the `grid_fleet` path-execution engine.
//!
//! This crate is a dependency of every other `gf-*` crate.  It has no `gf-*`
//! dependencies and few external ones (`glam`, `rand`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `AgentId`                                                  |
//! | [`cell`]      | `Cell`: integer grid coordinate                           |
//! | [`field`]     | `GridDims`, `FieldGeometry`, `GridMapping` (grid → world)  |
//! | [`time`]      | `Tick`, `SimTime`, `SimClock`                              |
//! | [`config`]    | `SimConfig`, `MotionParams`, `ClaimPolicy`                 |
//! | [`plan`]      | `FleetPlan`, `Route`: solved paths and obstacles          |
//! | [`rng`]       | `SimRng` (seeded, deterministic)                           |
//! | [`vehicle`]   | `VehicleKind` enum                                         |
//! | [`error`]     | `GfError`, `GfResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod error;
pub mod field;
pub mod ids;
pub mod plan;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{ClaimPolicy, MotionParams, SimConfig};
pub use error::{GfError, GfResult};
pub use field::{FieldGeometry, GridDims, GridMapping};
pub use ids::AgentId;
pub use plan::{FleetPlan, Route};
pub use rng::SimRng;
pub use time::{SimClock, SimTime, Tick};
pub use vehicle::VehicleKind;

/// Math types used for world transforms across all `gf-*` crates.
pub use glam::{Quat, Vec2, Vec3};
