//! Field geometry and the grid → world mapping.
//!
//! The field is a flat rectangle centred on `origin`.  Grid x runs along
//! world X, grid y along world Z; the vertical axis (world Y) is fixed at the
//! origin's height for every cell:
//!
//!   world.x = origin.x - size.x / 2 + cell.x * size.x / width
//!   world.z = origin.z - size.y / 2 + cell.y * size.y / height

use glam::{Vec2, Vec3};

use crate::{Cell, GfError, GfResult};

/// Grid dimensions in cells.  Both must be positive; see [`GridDims::validate`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    pub width:  u32,
    pub height: u32,
}

impl GridDims {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fail fast on an unset (zero) dimension instead of dividing by zero later.
    pub fn validate(&self) -> GfResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GfError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// `true` if `cell` lies inside `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }
}

/// Physical placement of the field in world space.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldGeometry {
    /// World-space centre of the field.
    pub origin: Vec3,
    /// Physical extent along world X (`size.x`) and world Z (`size.y`).
    pub size: Vec2,
}

impl FieldGeometry {
    pub fn new(origin: Vec3, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// A field of `grid` cells with `cell_size` world units per cell, centred
    /// on the world origin.
    pub fn with_cell_size(grid: GridDims, cell_size: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            size:   Vec2::new(grid.width as f32 * cell_size, grid.height as f32 * cell_size),
        }
    }
}

/// Validated pairing of [`FieldGeometry`] and [`GridDims`].
///
/// Constructing one is the only way to map cells to world positions, so a
/// zero grid dimension is rejected before any agent can move.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GridMapping {
    field: FieldGeometry,
    grid:  GridDims,
}

impl GridMapping {
    pub fn new(field: FieldGeometry, grid: GridDims) -> GfResult<Self> {
        grid.validate()?;
        if !(field.size.is_finite() && field.size.x > 0.0 && field.size.y > 0.0) {
            return Err(GfError::Config(format!(
                "field size must be positive and finite, got {}x{}",
                field.size.x, field.size.y
            )));
        }
        Ok(Self { field, grid })
    }

    #[inline]
    pub fn grid(&self) -> GridDims {
        self.grid
    }

    #[inline]
    pub fn field(&self) -> FieldGeometry {
        self.field
    }

    /// World-space position of `cell`.  Pure: the same cell always maps to
    /// bit-identical coordinates, which the motion layer relies on for its
    /// "same position → wait" check.
    pub fn world(&self, cell: Cell) -> Vec3 {
        let FieldGeometry { origin, size } = self.field;
        Vec3::new(
            origin.x - size.x / 2.0 + cell.x as f32 * size.x / self.grid.width as f32,
            origin.y,
            origin.z - size.y / 2.0 + cell.y as f32 * size.y / self.grid.height as f32,
        )
    }
}
