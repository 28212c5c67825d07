//! Errors produced by the problem stores.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Problem not found for date: {0}")]
  DateNotFound(NaiveDate),

  #[error("Problem not found with id: {0}")]
  IdNotFound(i64),

  #[error("No problems available")]
  EmptyBank,

  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Stored JSON does not have the expected shape.
  #[error("malformed problem data in {}: {source}", path.display())]
  Corrupt {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl StoreError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, StoreError::DateNotFound(_) | StoreError::IdNotFound(_) | StoreError::EmptyBank)
  }
}
