//! Per-date problem files: `<root>/<YYYY-MM-DD>.json`.
//!
//! Every lookup re-reads its file; nothing is cached, so a file dropped into
//! the directory is served on the next request.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::domain::Problem;
use crate::error::StoreError;
use crate::protocol::ProblemResponse;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// On-disk shape of a single daily file.
#[derive(Debug, Deserialize)]
struct DailyFile {
  date: String,
  problem: Problem,
}

#[derive(Clone, Debug)]
pub struct DailyStore {
  root: PathBuf,
}

impl DailyStore {
  /// Open the store, creating the directory if it does not exist yet.
  pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
    let root = root.into();
    std::fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn file_for(&self, date: NaiveDate) -> PathBuf {
    self.root.join(format!("{}.json", date.format(DATE_FORMAT)))
  }

  /// Today's problem, with "today" taken from the server's local clock at call time.
  pub async fn get_today_problem(&self) -> Result<ProblemResponse, StoreError> {
    self.get_problem_by_date(Local::now().date_naive()).await
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn get_problem_by_date(&self, date: NaiveDate) -> Result<ProblemResponse, StoreError> {
    let path = self.file_for(date);
    let bytes = match tokio::fs::read(&path).await {
      Ok(b) => b,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(target: "problem", path = %path.display(), "No daily file");
        return Err(StoreError::DateNotFound(date));
      }
      Err(source) => return Err(StoreError::Io { path, source }),
    };

    let file: DailyFile = serde_json::from_slice(&bytes)
      .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;

    // The embedded date wins for the response; a disagreeing filename is only reported.
    let requested = date.format(DATE_FORMAT).to_string();
    if file.date != requested {
      warn!(target: "problem", path = %path.display(), embedded = %file.date, %requested, "Daily file date does not match its filename");
    }

    Ok(ProblemResponse::dated(file.date, file.problem))
  }
}
