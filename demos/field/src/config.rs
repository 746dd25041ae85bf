//! Demo configuration, loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gf_core::SimConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub sim: SimConfig,
    /// Tractors requested from the planner (each comes with a cart).
    pub vehicles: u32,
    pub obstacles: u32,
    /// Replay this stored planner response instead of the mock planner.
    pub plan_file: Option<PathBuf>,
    /// Live planner endpoint; only honoured when built with `--features http`.
    pub planner_url: Option<String>,
    pub output_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:         SimConfig::default(),
            vehicles:    2,
            obstacles:   5,
            plan_file:   None,
            planner_url: None,
            output_dir:  PathBuf::from("output/field"),
        }
    }
}

impl DemoConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}
