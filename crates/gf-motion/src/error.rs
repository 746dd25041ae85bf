use gf_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("agent {0} has an empty path")]
    EmptyPath(AgentId),

    #[error("agent {0} has already been started")]
    AlreadyStarted(AgentId),
}

pub type MotionResult<T> = Result<T, MotionError>;
