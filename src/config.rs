//! Service configuration from an optional TOML file plus env overrides.
//!
//! SERVICE_CONFIG_PATH : path to TOML (keys: port, data_dir, preload_bank)
//! PORT                : overrides `port`
//! PROBLEMS_DATA_DIR   : overrides `data_dir`

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
  pub port: u16,
  /// Storage root. Daily files live in `<data_dir>/problems/`, the bank in `<data_dir>/problems.json`.
  pub data_dir: PathBuf,
  /// Load the question bank before serving instead of on the first request.
  pub preload_bank: bool,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self { port: 3000, data_dir: PathBuf::from("data"), preload_bank: false }
  }
}

impl ServiceConfig {
  pub fn daily_dir(&self) -> PathBuf {
    self.data_dir.join("problems")
  }

  pub fn bank_file(&self) -> PathBuf {
    self.data_dir.join("problems.json")
  }

  fn apply_overrides(mut self, port: Option<String>, data_dir: Option<String>) -> Self {
    if let Some(p) = port.and_then(|p| p.parse::<u16>().ok()) {
      self.port = p;
    }
    if let Some(d) = data_dir.filter(|d| !d.trim().is_empty()) {
      self.data_dir = PathBuf::from(d);
    }
    self
  }
}

/// Load config from SERVICE_CONFIG_PATH (if set), then apply env overrides.
/// A missing or unparsable file is logged and defaults are used instead.
pub fn load_service_config_from_env() -> ServiceConfig {
  let base = match std::env::var("SERVICE_CONFIG_PATH").ok() {
    Some(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<ServiceConfig>(&s) {
        Ok(cfg) => {
          info!(target: "little_toeic", %path, "Loaded service config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "little_toeic", %path, error = %e, "Failed to parse TOML config; using defaults");
          ServiceConfig::default()
        }
      },
      Err(e) => {
        error!(target: "little_toeic", %path, error = %e, "Failed to read TOML config file; using defaults");
        ServiceConfig::default()
      }
    },
    None => ServiceConfig::default(),
  };

  base.apply_overrides(std::env::var("PORT").ok(), std::env::var("PROBLEMS_DATA_DIR").ok())
}
