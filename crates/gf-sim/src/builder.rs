//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use gf_core::{FleetPlan, SimConfig};
use gf_motion::MotionStore;
use gf_reserve::ReservationTable;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: grid, field geometry, timing, motion parameters, …
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                         |
/// |--------------|---------------------------------|
/// | `.plan(p)`   | Empty fleet; load one later with [`Sim::load_fleet`] |
///
/// # Example
///
/// ```rust,ignore
/// let plan = JsonFilePlanner::new("response.json").plan(&request)?;
/// let mut sim = SimBuilder::new(config).plan(plan).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    plan:   Option<FleetPlan>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, plan: None }
    }

    /// Supply the fleet to load at tick 0.
    pub fn plan(mut self, plan: FleetPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Validate the configuration, construct the clock and reservation
    /// table, and load the fleet (if any).
    ///
    /// # Errors
    ///
    /// [`SimError::Config`][crate::SimError::Config] for any invalid setting.
    /// Nothing is constructed in that case, so no agent ever moves under a
    /// bad configuration.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let mapping = self.config.make_mapping()?;

        let mut sim = Sim {
            clock:        self.config.make_clock(),
            table:        ReservationTable::new(self.config.global_time_step),
            agents:       MotionStore::new(),
            obstacles:    BTreeSet::new(),
            mapping,
            last_summary: None,
            config:       self.config,
        };
        tracing::info!(
            grid = %format_args!("{}x{}", sim.config.grid.width, sim.config.grid.height),
            step = sim.clock.step_secs(),
            window = sim.config.global_time_step,
            policy = ?sim.config.claim_policy,
            "simulation built",
        );

        if let Some(plan) = self.plan {
            sim.load_fleet(plan)?;
        }
        Ok(sim)
    }
}
