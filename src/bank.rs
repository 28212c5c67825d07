//! Question bank backed by a single aggregate file: `{ "problems": [ ... ] }`.
//!
//! The list is loaded on first use (or at startup via `preload`) and kept for
//! the lifetime of the store. An absent or empty file is never cached, so data
//! added later is picked up by the next request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::domain::Problem;
use crate::error::StoreError;
use crate::protocol::ProblemResponse;

#[derive(Debug, Deserialize)]
struct BankFile {
  problems: Vec<Problem>,
}

#[derive(Debug)]
pub struct BankStore {
  path: PathBuf,
  cache: RwLock<Option<Arc<Vec<Problem>>>>,
}

impl BankStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), cache: RwLock::new(None) }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Warm the cache. Returns how many problems are available.
  pub async fn preload(&self) -> Result<usize, StoreError> {
    Ok(self.problems().await?.len())
  }

  /// Uniform pick over the current list.
  #[instrument(level = "debug", skip(self))]
  pub async fn get_random_problem(&self) -> Result<ProblemResponse, StoreError> {
    let problems = self.problems().await?;
    let picked = problems.choose(&mut rand::thread_rng()).ok_or(StoreError::EmptyBank)?;
    Ok(ProblemResponse::undated(picked.clone()))
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn get_problem_by_id(&self, id: i64) -> Result<ProblemResponse, StoreError> {
    let problems = self.problems().await?;
    problems
      .iter()
      .find(|p| p.id == id)
      .map(|p| ProblemResponse::undated(p.clone()))
      .ok_or(StoreError::IdNotFound(id))
  }

  async fn problems(&self) -> Result<Arc<Vec<Problem>>, StoreError> {
    if let Some(cached) = self.cache.read().await.as_ref() {
      return Ok(cached.clone());
    }

    // Re-check under the write lock so concurrent first requests load once.
    let mut slot = self.cache.write().await;
    if let Some(cached) = slot.as_ref() {
      return Ok(cached.clone());
    }

    let loaded = Arc::new(self.read_from_disk().await?);
    if !loaded.is_empty() {
      info!(target: "problem", path = %self.path.display(), count = loaded.len(), "Question bank loaded");
      for p in loaded.iter().filter(|p| !p.answer_key_is_consistent()) {
        warn!(target: "problem", id = p.id, correct_answer = %p.correct_answer, "Answer key does not match a unique choice id");
      }
      *slot = Some(loaded.clone());
    }
    Ok(loaded)
  }

  async fn read_from_disk(&self) -> Result<Vec<Problem>, StoreError> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(b) => b,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
    };
    let file: BankFile = serde_json::from_slice(&bytes)
      .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })?;
    Ok(file.problems)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::testutil::{problem_json, scratch_dir};

  fn bank_with(ids: &[i64]) -> BankStore {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problems.json");
    write_bank(&path, ids);
    BankStore::new(path)
  }

  fn write_bank(path: &Path, ids: &[i64]) {
    let problems: Vec<_> = ids.iter().map(|id| problem_json(*id)).collect();
    let body = serde_json::json!({ "problems": problems });
    std::fs::write(path, body.to_string()).expect("write bank");
  }

  #[tokio::test]
  async fn finds_problem_by_id() {
    let bank = bank_with(&[1, 2, 3]);
    let resp = bank.get_problem_by_id(2).await.expect("found");
    assert_eq!(resp.problem.id, 2);
    assert_eq!(resp.date, None);
  }

  #[tokio::test]
  async fn unknown_id_is_not_found() {
    let bank = bank_with(&[1, 2, 3]);
    let err = bank.get_problem_by_id(99).await.unwrap_err();
    assert!(matches!(err, StoreError::IdNotFound(99)));
    assert_eq!(err.to_string(), "Problem not found with id: 99");
  }

  #[tokio::test]
  async fn first_match_wins_on_duplicate_ids() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problems.json");
    let mut second = problem_json(5);
    second["question"] = serde_json::json!("duplicate");
    let body = serde_json::json!({ "problems": [problem_json(5), second] });
    std::fs::write(&path, body.to_string()).unwrap();

    let resp = BankStore::new(path).get_problem_by_id(5).await.expect("found");
    assert_ne!(resp.problem.question, "duplicate");
  }

  #[tokio::test]
  async fn missing_file_behaves_as_empty_bank() {
    let bank = BankStore::new(scratch_dir().join("problems.json"));
    assert!(matches!(bank.get_random_problem().await, Err(StoreError::EmptyBank)));
    assert!(matches!(bank.get_problem_by_id(1).await, Err(StoreError::IdNotFound(1))));
  }

  #[tokio::test]
  async fn empty_read_is_not_cached() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problems.json");
    let bank = BankStore::new(&path);
    assert!(bank.get_random_problem().await.is_err());

    write_bank(&path, &[11]);
    let resp = bank.get_random_problem().await.expect("picked up new data");
    assert_eq!(resp.problem.id, 11);
  }

  #[tokio::test]
  async fn loaded_list_is_kept_after_file_changes() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problems.json");
    write_bank(&path, &[1]);
    let bank = BankStore::new(&path);
    assert_eq!(bank.preload().await.expect("preload"), 1);

    write_bank(&path, &[2]);
    assert!(bank.get_problem_by_id(1).await.is_ok());
    assert!(bank.get_problem_by_id(2).await.is_err());
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_first_requests_share_one_load() {
    let bank = Arc::new(bank_with(&[1, 2, 3]));
    let handles: Vec<_> = (0..16)
      .map(|_| {
        let bank = bank.clone();
        tokio::spawn(async move { bank.problems().await.expect("load") })
      })
      .collect();

    let mut loaded = Vec::new();
    for h in handles {
      loaded.push(h.await.expect("join"));
    }
    let first = &loaded[0];
    assert!(loaded.iter().all(|p| Arc::ptr_eq(p, first)));
    let cached = bank.problems().await.expect("cached");
    assert!(Arc::ptr_eq(&cached, first));
  }

  #[tokio::test]
  async fn malformed_bank_is_corrupt() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("problems.json");
    std::fs::write(&path, r#"{ "problems": [ { "id": 1, "type": "grammar" } ] }"#).unwrap();

    let err = BankStore::new(path).get_random_problem().await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }), "{err:?}");
  }

  #[tokio::test]
  async fn random_pick_is_roughly_uniform() {
    let bank = bank_with(&[1, 2, 3]);
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for _ in 0..3000 {
      let resp = bank.get_random_problem().await.expect("pick");
      *counts.entry(resp.problem.id).or_default() += 1;
    }
    for id in [1, 2, 3] {
      let n = counts.get(&id).copied().unwrap_or(0);
      assert!((800..=1200).contains(&n), "id {id} drawn {n} times");
    }
  }
}
