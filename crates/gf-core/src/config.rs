//! Top-level simulation configuration.
//!
//! Typically loaded from a TOML file by the application crate (enable the
//! `serde` feature) and passed to the simulation builder, which calls
//! [`SimConfig::validate`] before any agent is created.

use glam::Vec3;

use crate::{FieldGeometry, GfError, GfResult, GridDims, GridMapping, SimClock, Tick};

// ── ClaimPolicy ───────────────────────────────────────────────────────────────

/// What an agent does with the cell returned by the alternative-cell resolver.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClaimPolicy {
    /// Use the resolved cell as the leg target without reserving it.  A later
    /// agent in the same tick may pick the same cell.
    Baseline,
    /// Reserve the resolved cell immediately when it differs from the blocked
    /// one.  The blocked cell itself is never re-stamped.
    #[default]
    ClaimResolved,
}

// ── MotionParams ──────────────────────────────────────────────────────────────

/// Per-agent kinematic parameters (shared by the whole fleet).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionParams {
    /// Translation speed in world units per simulated second.
    pub move_speed: f32,
    /// Rotation progress per simulated second (1.0 = full turn in one second).
    pub rotation_speed: f32,
    /// Seconds an agent holds position on a repeated path cell.
    pub time_per_position: f64,
    /// Bound the rotation interpolation fraction to `[0, 1]`.  Off by default:
    /// the rotation fraction keeps growing after the turn completes and the
    /// slerp extrapolates past the facing direction.
    pub clamp_rotation: bool,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            move_speed:        2.0,
            rotation_speed:    2.0,
            time_per_position: 1.0,
            clamp_rotation:    false,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unscaled seconds per tick.  Default: 0.02 (50 ticks per second).
    pub tick_duration_secs: f64,

    /// Global multiplier on every tick's duration.  Default: 1.0.
    pub time_scale: f64,

    /// Reservation window in simulated seconds: a claim blocks its cell for
    /// this long, and is pruned once older than twice this.  Default: 1.0.
    pub global_time_step: f64,

    /// Upper bound on ticks for `Sim::run`.
    pub total_ticks: u64,

    /// Grid size in cells, as sent to the planner.
    pub grid: GridDims,

    /// Physical placement of the field.
    pub field: FieldGeometry,

    pub motion: MotionParams,

    pub claim_policy: ClaimPolicy,

    /// Run reservation cleanup every N ticks.  Must be at least 1.
    pub cleanup_interval_ticks: u64,

    /// Emit agent snapshots every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Seed for any stochastic collaborator (e.g. the mock planner).
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        let grid = GridDims::new(10, 10);
        Self {
            tick_duration_secs:     0.02,
            time_scale:             1.0,
            global_time_step:       1.0,
            total_ticks:            60_000,
            grid,
            // Ten world units per cell, centred on the world origin.
            field:                  FieldGeometry::with_cell_size(grid, 10.0),
            motion:                 MotionParams::default(),
            claim_policy:           ClaimPolicy::default(),
            cleanup_interval_ticks: 1,
            output_interval_ticks:  50,
            seed:                   42,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs, self.time_scale)
    }

    /// Construct the validated grid → world mapping for this run.
    pub fn make_mapping(&self) -> GfResult<GridMapping> {
        GridMapping::new(self.field, self.grid)
    }

    /// Reject every configuration that would divide by zero, stall the clock
    /// or disable cleanup.
    pub fn validate(&self) -> GfResult<()> {
        self.grid.validate()?;
        positive("tick_duration_secs", self.tick_duration_secs)?;
        positive("time_scale", self.time_scale)?;
        positive("global_time_step", self.global_time_step)?;
        positive("motion.move_speed", self.motion.move_speed as f64)?;
        positive("motion.rotation_speed", self.motion.rotation_speed as f64)?;
        if !(self.motion.time_per_position.is_finite() && self.motion.time_per_position >= 0.0) {
            return Err(GfError::Config(format!(
                "motion.time_per_position must be a non-negative number, got {}",
                self.motion.time_per_position
            )));
        }
        if self.cleanup_interval_ticks == 0 {
            return Err(GfError::Config(
                "cleanup_interval_ticks must be at least 1".to_owned(),
            ));
        }
        if !self.field.origin.is_finite() {
            return Err(GfError::Config(format!(
                "field origin must be finite, got {}",
                self.field.origin
            )));
        }
        self.make_mapping().map(|_| ())
    }

    /// Convenience for tests and demos: a field of `width × height` cells of
    /// `cell_size` world units, centred at `origin`.
    pub fn with_grid(mut self, width: u32, height: u32, cell_size: f32, origin: Vec3) -> Self {
        self.grid  = GridDims::new(width, height);
        self.field = FieldGeometry::with_cell_size(self.grid, cell_size);
        self.field.origin = origin;
        self
    }
}

fn positive(name: &str, value: f64) -> GfResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GfError::Config(format!("{name} must be positive, got {value}")))
    }
}
