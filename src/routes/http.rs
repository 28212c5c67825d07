//! HTTP endpoint handlers. Thin wrappers that parse parameters and forward to the stores.

use std::sync::Arc;
use axum::{extract::{Path, State}, Json};
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::protocol::{HealthResponse, ProblemResponse};
use crate::routes::error::ApiError;
use crate::state::AppState;

const DATE_FORMAT: &str = "%Y-%m-%d";

type ApiResult = Result<Json<ProblemResponse>, ApiError>;

#[instrument(level = "info")]
pub async fn http_root() -> Json<HealthResponse> {
  Json(HealthResponse::ok("Little TOEIC API is running"))
}

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthResponse> {
  Json(HealthResponse::ok("Service is healthy"))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_random(State(state): State<Arc<AppState>>) -> ApiResult {
  let resp = state.bank.get_random_problem().await?;
  info!(target: "problem", id = resp.problem.id, "HTTP random problem served");
  Ok(Json(resp))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_today(State(state): State<Arc<AppState>>) -> ApiResult {
  let resp = state.daily.get_today_problem().await?;
  info!(target: "problem", id = resp.problem.id, date = ?resp.date, "HTTP today problem served");
  Ok(Json(resp))
}

/// `/api/problems/:key` where key is either a numeric id (bank) or a `YYYY-MM-DD` date (daily).
#[instrument(level = "info", skip(state))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
) -> ApiResult {
  let resp = if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
    // Digits beyond i64 cannot name a stored problem.
    let id = key
      .parse::<i64>()
      .map_err(|_| ApiError::NotFound(format!("Problem not found with id: {key}")))?;
    state.bank.get_problem_by_id(id).await?
  } else {
    let date = parse_iso_date(&key)
      .ok_or_else(|| ApiError::bad_request("Invalid date format. Use YYYY-MM-DD"))?;
    state.daily.get_problem_by_date(date).await?
  };
  info!(target: "problem", %key, id = resp.problem.id, "HTTP problem served");
  Ok(Json(resp))
}

/// Strict `YYYY-MM-DD`: chrono alone also takes unpadded fields, signs and leading spaces.
fn parse_iso_date(key: &str) -> Option<NaiveDate> {
  let date = NaiveDate::parse_from_str(key, DATE_FORMAT).ok()?;
  (date.format(DATE_FORMAT).to_string() == key).then_some(date)
}
