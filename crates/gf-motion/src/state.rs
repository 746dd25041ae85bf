//! Per-agent motion state and the pure functions that advance it.

use gf_core::{Cell, Quat, SimTime, Vec3};

/// Where an agent is in its path-execution lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum MotionPhase {
    /// Created but not started, or inert because its path is empty.
    #[default]
    Idle,
    /// Interpolating toward the current leg target.
    Moving,
    /// Holding position on a repeated path cell.
    Waiting,
    /// Path index reached the path length.  Terminal.
    Completed,
}

impl MotionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionPhase::Idle      => "idle",
            MotionPhase::Moving    => "moving",
            MotionPhase::Waiting   => "waiting",
            MotionPhase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MotionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation that faces along `direction` on the horizontal plane, with world
/// +Z as the unrotated forward axis and world +Y as up.
#[inline]
pub fn facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// The complete motion state of one agent.
///
/// All methods are pure arithmetic on this struct; reservation and path
/// lookups live in [`PathExecutor`][crate::PathExecutor].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentMotionState {
    pub phase: MotionPhase,

    /// Index of the path cell the current leg heads for.  Never decreases and
    /// never exceeds the path length.
    pub path_index: usize,

    /// Cell the current leg heads for.  Equals `path[path_index]` unless the
    /// planned cell was blocked and an alternative was substituted.
    pub target_cell: Cell,

    /// Current world position.
    pub position: Vec3,
    /// Current world rotation.
    pub rotation: Quat,

    /// World position at the start of the current leg.
    pub leg_start: Vec3,
    /// World position of `target_cell`.
    pub leg_target: Vec3,
    /// Euclidean length of the current leg.  Zero while waiting.
    pub leg_length: f32,
    pub leg_start_time: SimTime,

    /// Rotation at the start of the most recent moving leg.
    pub rotation_start: Quat,
    /// Heading of the most recent moving leg.
    pub rotation_target: Quat,
    pub rotation_start_time: SimTime,

    /// Seconds spent in the current `Waiting` phase.
    pub wait_elapsed: f64,
}

impl Default for AgentMotionState {
    fn default() -> Self {
        Self::idle()
    }
}

impl AgentMotionState {
    /// A fresh, unstarted state at the world origin.
    pub fn idle() -> Self {
        Self {
            phase:               MotionPhase::Idle,
            path_index:          0,
            target_cell:         Cell::default(),
            position:            Vec3::ZERO,
            rotation:            Quat::IDENTITY,
            leg_start:           Vec3::ZERO,
            leg_target:          Vec3::ZERO,
            leg_length:          0.0,
            leg_start_time:      SimTime::ZERO,
            rotation_start:      Quat::IDENTITY,
            rotation_target:     Quat::IDENTITY,
            rotation_start_time: SimTime::ZERO,
            wait_elapsed:        0.0,
        }
    }

    /// Snap to `position` at `now`, ready for the first leg.
    pub fn place(&mut self, position: Vec3, now: SimTime) {
        self.path_index          = 0;
        self.position            = position;
        self.leg_start           = position;
        self.leg_target          = position;
        self.leg_start_time      = now;
        self.rotation_start      = self.rotation;
        self.rotation_target     = self.rotation;
        self.rotation_start_time = now;
    }

    /// Fraction of the current leg covered at `now` travelling at `speed`.
    ///
    /// Unbounded above: values ≥ 1 mean the leg is complete.
    #[inline]
    pub fn translation_fraction(&self, now: SimTime, speed: f32) -> f64 {
        (now - self.leg_start_time) * speed as f64 / self.leg_length as f64
    }

    /// Interpolated world position for a leg `fraction`, bounded to the leg.
    #[inline]
    pub fn position_at(&self, fraction: f64) -> Vec3 {
        self.leg_start.lerp(self.leg_target, fraction.clamp(0.0, 1.0) as f32)
    }

    /// Rotation progress at `now`.  With `clamp == false` the value keeps
    /// growing past 1 and [`rotation_at`](Self::rotation_at) extrapolates.
    #[inline]
    pub fn rotation_fraction(&self, now: SimTime, rotation_speed: f32, clamp: bool) -> f32 {
        let fraction = ((now - self.rotation_start_time) * rotation_speed as f64) as f32;
        if clamp { fraction.clamp(0.0, 1.0) } else { fraction }
    }

    /// Spherical interpolation from the leg's starting rotation toward its
    /// heading.
    #[inline]
    pub fn rotation_at(&self, fraction: f32) -> Quat {
        self.rotation_start.slerp(self.rotation_target, fraction)
    }

    /// Add `dt` to the wait timer.  Returns `true` once the timer reaches
    /// `time_per_position`.
    #[inline]
    pub fn accumulate_wait(&mut self, dt: f64, time_per_position: f64) -> bool {
        self.wait_elapsed += dt;
        self.wait_elapsed >= time_per_position
    }

    /// Begin a leg toward `cell` (world position `target`) at `now`.
    ///
    /// A target bit-identical to the current position enters `Waiting` with a
    /// zeroed timer; the rotation leg is left as it was.  Anything else enters
    /// `Moving` and starts a new rotation leg toward the heading.
    pub fn begin_leg(&mut self, cell: Cell, target: Vec3, now: SimTime) {
        self.target_cell = cell;
        self.leg_start   = self.position;
        self.leg_target  = target;

        if target == self.position {
            self.phase        = MotionPhase::Waiting;
            self.leg_length   = 0.0;
            self.wait_elapsed = 0.0;
            return;
        }

        self.leg_length          = self.leg_start.distance(target);
        self.leg_start_time      = now;
        self.rotation_start      = self.rotation;
        self.rotation_target     = facing(target - self.leg_start);
        self.rotation_start_time = now;
        self.phase               = MotionPhase::Moving;
    }

    /// Move to the next path index.  Returns `false` (and enters `Completed`)
    /// when the index reaches `path_len`.
    pub fn advance_index(&mut self, path_len: usize) -> bool {
        debug_assert!(self.path_index < path_len, "advancing past the end of the path");
        self.path_index = (self.path_index + 1).min(path_len);
        if self.path_index >= path_len {
            self.phase = MotionPhase::Completed;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.phase == MotionPhase::Completed
    }
}
