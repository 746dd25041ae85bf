//! field: runnable demo for the grid_fleet path-execution engine.
//!
//! Plans a fleet of tractors and carts on a rectangular field (mock planner
//! by default, or a stored/live planner response), executes the paths with
//! reservation-based contention avoidance, and writes per-tick summaries and
//! transform snapshots to `output_dir`.
//!
//! ```text
//! cargo run -p field -- demos/field/field.toml
//! RUST_LOG=gf_motion=debug cargo run -p field
//! ```

mod config;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use gf_core::{AgentId, VehicleKind};
use gf_motion::MotionPhase;
use gf_output::{OutputWriter, SimOutputObserver};
use gf_planner::{JsonFilePlanner, MockPlanner, PathPlanner, PlannerRequest};
use gf_sim::{Sim, SimBuilder, SimObserver};

use config::DemoConfig;

#[cfg(test)]
mod tests;

/// Log a progress line every this many ticks.
const PROGRESS_INTERVAL_TICKS: u64 = 1_000;

fn make_planner(cfg: &DemoConfig) -> Result<Box<dyn PathPlanner>> {
    if let Some(path) = &cfg.plan_file {
        return Ok(Box::new(JsonFilePlanner::new(path)));
    }

    #[cfg(feature = "http")]
    if let Some(url) = &cfg.planner_url {
        return Ok(Box::new(gf_planner::HttpPlanner::new(url.clone(), gf_planner::DEFAULT_TIMEOUT_MS)?));
    }
    #[cfg(not(feature = "http"))]
    if cfg.planner_url.is_some() {
        tracing::warn!("planner_url ignored: built without the `http` feature");
    }

    Ok(Box::new(MockPlanner::new(cfg.sim.seed)))
}

#[cfg(feature = "sqlite")]
fn make_writer(dir: &Path) -> Result<gf_output::SqliteWriter> {
    Ok(gf_output::SqliteWriter::new(dir)?)
}

#[cfg(not(feature = "sqlite"))]
fn make_writer(dir: &Path) -> Result<gf_output::CsvWriter> {
    Ok(gf_output::CsvWriter::new(dir)?)
}

/// Per-agent path index and phase as of the previous tick.
struct LegTracker {
    last: Vec<(usize, MotionPhase)>,
}

impl LegTracker {
    fn new(sim: &Sim) -> Self {
        Self { last: sim.agents.iter().map(|e| (e.path_index(), e.phase())).collect() }
    }

    /// Tractors that drove into a new cell since the previous call.  Holding
    /// position on a repeated cell advances the index too but is not a leg.
    fn finished_legs(&mut self, sim: &Sim) -> Vec<AgentId> {
        let mut finished = Vec::new();
        for exec in sim.agents.iter() {
            let slot = &mut self.last[exec.agent().index()];
            let (index, phase) = *slot;
            if exec.kind() == VehicleKind::Tractor
                && phase == MotionPhase::Moving
                && exec.path_index() > index
            {
                finished.push(exec.agent());
            }
            *slot = (exec.path_index(), exec.phase());
        }
        finished
    }
}

/// Tractors harvest the patch at the end of every driven leg.
fn harvest(sim: &mut Sim, tracker: &mut LegTracker) -> Result<()> {
    for agent in tracker.finished_legs(sim) {
        sim.record_collected(agent)?;
    }
    Ok(())
}

fn run<W: OutputWriter>(sim: &mut Sim, obs: &mut SimOutputObserver<W>) -> Result<()> {
    let mut tracker = LegTracker::new(sim);
    let end = sim.config.end_tick();

    while sim.current_tick() < end && !sim.agents.all_finished() {
        sim.run_ticks(1, obs)?;
        harvest(sim, &mut tracker)?;

        let tick = sim.current_tick();
        if tick.0 % PROGRESS_INTERVAL_TICKS == 0 {
            let phases = sim.agents.phase_counts();
            tracing::info!(
                %tick,
                now = %sim.clock.now(),
                moving = phases.moving,
                waiting = phases.waiting,
                completed = phases.completed,
                reservations = sim.table.len(),
                "progress",
            );
        }
    }
    obs.on_sim_end(sim.current_tick());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Configuration.
    let cfg = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_file(Path::new(&path))?,
        None       => DemoConfig::default(),
    };
    println!("=== field | grid_fleet path execution ===");
    println!(
        "Grid: {}x{}  |  Tractors: {}  |  Obstacles: {}  |  Seed: {}",
        cfg.sim.grid.width, cfg.sim.grid.height, cfg.vehicles, cfg.obstacles, cfg.sim.seed
    );

    // 2. Plan.
    let request = PlannerRequest::new(cfg.sim.grid, cfg.vehicles, cfg.obstacles);
    let plan = make_planner(&cfg)?.plan(&request)?;
    println!(
        "Plan: {} tractor and {} cart paths, {} obstacles",
        plan.count_of(VehicleKind::Tractor),
        plan.count_of(VehicleKind::Cart),
        plan.obstacles.len()
    );

    // 3. Build sim (fails fast on a bad configuration).
    let mut sim = SimBuilder::new(cfg.sim.clone()).plan(plan).build()?;

    // 4. Output.
    let writer = make_writer(&cfg.output_dir)?;
    let mut obs = SimOutputObserver::new(writer);

    // 5. Run.
    let t0 = Instant::now();
    run(&mut sim, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let (summaries, snapshots) = obs.rows_written();
    println!();
    println!(
        "Simulated {} ({}) in {:.3} s",
        sim.current_tick(),
        sim.clock.now(),
        elapsed.as_secs_f64()
    );
    println!("  tick summaries : {summaries} rows");
    println!("  snapshots      : {snapshots} rows");
    println!("  output         : {}", cfg.output_dir.display());
    println!("  harvested      : {}", sim.total_collected());
    println!();

    println!(
        "{:<8} {:<8} {:<10} {:>6} {:>22} {:>9}",
        "Agent", "Kind", "Phase", "Index", "Position", "Collected"
    );
    println!("{}", "-".repeat(68));
    for exec in sim.agents.iter() {
        let p = exec.transform().position;
        println!(
            "{:<8} {:<8} {:<10} {:>6} {:>22} {:>9}",
            exec.agent().0,
            exec.kind(),
            exec.phase(),
            format!("{}/{}", exec.path_index(), exec.path().len()),
            format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z),
            exec.collected(),
        );
    }

    Ok(())
}
