//! `gf-motion`: per-agent path execution for the grid_fleet engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`state`]    | `MotionPhase`, `AgentMotionState`: pure per-tick arithmetic  |
//! | [`context`]  | `MotionContext<'a>`, `TickStats`: what one tick lends an agent |
//! | [`executor`] | `PathExecutor`: reservation-aware state machine for one agent |
//! | [`store`]    | `MotionStore`: every executor, ticked in `AgentId` order      |
//! | [`error`]    | `MotionError`, `MotionResult<T>`                               |
//!
//! # Movement model
//!
//! Each agent walks a fixed list of cells.  A **leg** is the motion from the
//! agent's current world position to the next cell's world position:
//!
//! 1. *Leg setup* claims the next cell in the shared
//!    [`ReservationTable`][gf_reserve::ReservationTable].  If the cell is
//!    taken, a free neighbor from the agent's own path is substituted.
//! 2. A target equal to the current position is a deliberate pause: the
//!    agent waits `time_per_position` seconds in place.
//! 3. Otherwise the agent interpolates linearly at `move_speed` and slerps
//!    toward the leg's heading at `rotation_speed`.
//! 4. On arrival the position snaps to the target, the path index advances
//!    and leg setup runs again, until the index reaches the path length.
//!
//! ```text
//!   Idle ──start──▶ (leg setup) ──▶ Moving ──arrive──▶ (leg setup) ─┐
//!                        │  ▲                                        │
//!                        ▼  └──────── wait elapsed ── Waiting ◀──────┤
//!                   Completed ◀────────── index == path.len() ◀──────┘
//! ```

pub mod context;
pub mod error;
pub mod executor;
pub mod state;
pub mod store;


pub use context::{MotionContext, TickStats};
pub use error::{MotionError, MotionResult};
pub use executor::{AgentTransform, PathExecutor};
pub use state::{AgentMotionState, MotionPhase, facing};
pub use store::{MotionStore, PhaseCounts};
