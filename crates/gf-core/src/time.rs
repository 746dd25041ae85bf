//! Simulation time model.
//!
//! # Design
//!
//! The canonical counter is an integer `Tick`.  Continuous simulated time is
//! derived from it rather than accumulated:
//!
//!   now = tick * tick_duration_secs * time_scale
//!
//! Deriving `now` from the tick keeps it exactly reproducible (no drift from
//! repeated float addition) and guarantees monotonicity, which the
//! reservation table depends on: no claim is ever stamped earlier than the
//! clock's current value.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// A point in simulated time, in seconds since the simulation (re)started.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic tick/time source shared by every agent and the reservation table.
///
/// `SimClock` is cheap to copy and holds no heap data.  It is owned by the
/// simulation and only ever moves forward, except through [`SimClock::reset`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unscaled seconds per tick (the frame delta).
    pub tick_duration_secs: f64,
    /// Global multiplier applied to every tick's duration.
    pub time_scale: f64,
    /// The current tick, advanced by [`SimClock::advance`].
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f64, time_scale: f64) -> Self {
        Self {
            tick_duration_secs,
            time_scale,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Scaled simulated seconds covered by one tick (`dt`).
    #[inline]
    pub fn step_secs(&self) -> f64 {
        self.tick_duration_secs * self.time_scale
    }

    /// Simulated time at `current_tick`.
    #[inline]
    pub fn now(&self) -> SimTime {
        SimTime(self.current_tick.0 as f64 * self.step_secs())
    }

    /// Return to tick 0.  Only called as part of a full simulation reset.
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}
