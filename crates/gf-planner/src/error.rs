use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid planner request: {0}")]
    InvalidRequest(String),

    #[error("malformed planner response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: coordinate ({x}, {y}) is not an integer cell")]
    NonIntegral { context: String, x: f64, y: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("planner request failed: {0}")]
    Http(String),

    #[error("planner returned HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
