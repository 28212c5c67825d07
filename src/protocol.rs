//! Public response structs for the HTTP endpoints (serde ready).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Problem;

/// A problem as served to clients. `date` is present only for per-date lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  pub problem: Problem,
}

impl ProblemResponse {
  pub fn dated(date: String, problem: Problem) -> Self {
    Self { date: Some(date), problem }
  }

  pub fn undated(problem: Problem) -> Self {
    Self { date: None, problem }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub message: String,
  pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
  pub fn ok(message: &str) -> Self {
    Self { status: "ok".into(), message: message.into(), timestamp: Utc::now() }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
  pub detail: String,
}
