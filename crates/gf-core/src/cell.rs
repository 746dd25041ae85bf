//! Integer grid coordinate.

use std::fmt;

/// One discrete location on the field grid.
///
/// Equality is exact: two cells are the same cell only when both components
/// match.  Coordinates are signed and unbounded by the grid: a planner may
/// hand over negative or far off-field cells, which are executed as given.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`, or `None` past the `i32` range.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Cell> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Cell { x, y }),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
