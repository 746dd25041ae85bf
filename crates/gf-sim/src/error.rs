use gf_core::{AgentId, GfError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] GfError),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("a fleet of {0} agents is already loaded; reset the simulation first")]
    FleetLoaded(usize),
}

pub type SimResult<T> = Result<T, SimError>;
