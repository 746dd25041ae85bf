//! Blocking HTTP client for a live planning service.

use std::time::Duration;

use gf_core::FleetPlan;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::{PathPlanner, PlannerError, PlannerRequest, PlannerResult, parse_plan};

/// Endpoint the field front-end posts to by default.
pub const DEFAULT_PLANNER_URL: &str = "http://127.0.0.1:5000/start-simulation";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// POSTs the request as JSON and parses the response body.
pub struct HttpPlanner {
    url:    String,
    client: Client,
}

impl HttpPlanner {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> PlannerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms.max(1)))
            .build()
            .map_err(|err| PlannerError::Http(err.to_string()))?;
        Ok(Self { url: url.into(), client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PathPlanner for HttpPlanner {
    fn plan(&mut self, request: &PlannerRequest) -> PlannerResult<FleetPlan> {
        request.validate()?;
        tracing::info!(url = %self.url, ?request, "requesting plan");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|err| PlannerError::Http(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_else(|_| "<no body>".to_owned());
            return Err(PlannerError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().map_err(|err| PlannerError::Http(err.to_string()))?;
        parse_plan(&body)
    }
}
