//! HTTP error mapping. Store failures other than "not found" are logged here
//! and reach the client only as a generic 500.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::error;

use crate::error::StoreError;
use crate::protocol::ErrorOut;

#[derive(Debug)]
pub enum ApiError {
  BadRequest(String),
  NotFound(String),
  Internal(String),
}

impl ApiError {
  pub fn bad_request(message: impl Into<String>) -> Self {
    ApiError::BadRequest(message.into())
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    if err.is_not_found() {
      ApiError::NotFound(err.to_string())
    } else {
      ApiError::Internal(err.to_string())
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match self {
      ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
      ApiError::Internal(cause) => {
        error!(target: "little_toeic", %cause, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
      }
    };
    (status, Json(ErrorOut { detail })).into_response()
  }
}
