//! Alternative-cell resolution for blocked leg targets.

use gf_core::{Cell, SimTime};

use crate::ReservationTable;

/// Neighbor scan order: the four orthogonal moves (up, down, left, right)
/// first, then the four diagonals.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    ( 0,  1),
    ( 0, -1),
    (-1,  0),
    ( 1,  0),
    ( 1,  1),
    ( 1, -1),
    (-1,  1),
    (-1, -1),
];

/// Outcome of [`resolve_alternative`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// A free neighbor that belongs to the agent's own path.
    Alternative(Cell),
    /// No neighbor qualified; carries the original blocked cell.
    Exhausted(Cell),
}

impl Resolution {
    /// The cell the agent should head for.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Resolution::Alternative(c) | Resolution::Exhausted(c) => c,
        }
    }

    #[inline]
    pub fn is_exhausted(self) -> bool {
        matches!(self, Resolution::Exhausted(_))
    }
}

/// Find a replacement for `blocked` among its eight neighbors.
///
/// A neighbor qualifies when it appears anywhere in `own_path` and is
/// available at `now`; the first one in [`NEIGHBOR_OFFSETS`] order wins.
/// Offsets that would leave the `i32` coordinate range are skipped.
/// When none qualifies the blocked cell comes back as
/// [`Resolution::Exhausted`].  The table is only read: reserving the result is
/// the caller's decision.
pub fn resolve_alternative(
    blocked:  Cell,
    own_path: &[Cell],
    now:      SimTime,
    table:    &ReservationTable,
) -> Resolution {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dx, dy)| blocked.offset(dx, dy))
        .find(|n| own_path.contains(n) && table.is_available(*n, now))
        .map_or(Resolution::Exhausted(blocked), Resolution::Alternative)
}
