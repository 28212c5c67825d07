//! Application state: the two problem stores, built once before serving.

use tracing::{info, instrument, warn};

use crate::bank::BankStore;
use crate::config::ServiceConfig;
use crate::daily::DailyStore;

#[derive(Debug)]
pub struct AppState {
  pub daily: DailyStore,
  pub bank: BankStore,
}

impl AppState {
  /// Build stores from config. Creates the daily directory if needed.
  #[instrument(level = "info", skip_all, fields(data_dir = %cfg.data_dir.display()))]
  pub async fn new(cfg: &ServiceConfig) -> std::io::Result<Self> {
    let daily = DailyStore::new(cfg.daily_dir())?;
    let bank = BankStore::new(cfg.bank_file());
    info!(target: "little_toeic", daily_dir = %daily.root().display(), bank_file = %bank.path().display(), "Problem stores ready");

    if cfg.preload_bank {
      match bank.preload().await {
        Ok(0) => warn!(target: "little_toeic", "Question bank is empty; random/by-id lookups will 404 until it is populated"),
        Ok(count) => info!(target: "little_toeic", count, "Question bank preloaded"),
        Err(e) => warn!(target: "little_toeic", error = %e, "Question bank preload failed; will retry on first request"),
      }
    }

    Ok(Self { daily, bank })
  }
}
