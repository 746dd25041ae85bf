//! `gf-reserve`: shared cell reservations for the grid_fleet engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`table`]    | `ReservationTable`: cell → last-claim timestamp             |
//! | [`resolver`] | `resolve_alternative`, `Resolution`, `NEIGHBOR_OFFSETS`      |
//!
//! # Reservation model
//!
//! A claim on a cell blocks it for `global_time_step` simulated seconds:
//!
//! ```text
//! available(cell, now)  ⇔  no entry  ∨  now - entry > global_time_step
//! ```
//!
//! Availability checks never remove entries.  Only
//! [`ReservationTable::cleanup`] prunes, dropping claims older than
//! `2 × global_time_step`; the simulation loop schedules it on a fixed
//! cadence so the table stays bounded by the number of recently claimed
//! cells.
//!
//! The table is the sole synchronisation point between agents.  It is not
//! internally locked: the tick loop visits agents sequentially, so the agent
//! processed first in a tick wins any contested cell.

pub mod resolver;
pub mod table;


pub use resolver::{NEIGHBOR_OFFSETS, Resolution, resolve_alternative};
pub use table::ReservationTable;
