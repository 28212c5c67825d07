//! Little TOEIC · daily practice problems backend
//!
//! - Axum HTTP API serving multiple-choice problems from JSON files
//! - Per-date files (`today`, `YYYY-MM-DD`) and a question bank (`random`, id)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   PROBLEMS_DATA_DIR   : storage root (default "data")
//!   SERVICE_CONFIG_PATH : optional TOML config (port, data_dir, preload_bank)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod config;
mod domain;
mod error;
mod protocol;
mod daily;
mod bank;
mod state;
mod routes;
#[cfg(test)]
mod testutil;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::load_service_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_service_config_from_env();

  // Stores are created once here and are read-only for the life of the process.
  let state = Arc::new(AppState::new(&cfg).await?);

  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "little_toeic", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "little_toeic", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "little_toeic", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
}
