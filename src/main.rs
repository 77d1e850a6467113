//! Quizdeck · quiz session backend
//!
//! - Validated quiz document (JSON) flattened into a linear question sequence
//! - One in-memory session: answers, navigation, submit, self-grading, scoring
//! - Axum HTTP + WebSocket API, static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML config (auto-graded section, data path, static dir)
//!   QUIZ_DATA_PATH    : path to the JSON quiz document (built-in sample if unset)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default), "compact" or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod seeds;
mod flatten;
mod session;
mod scoring;
mod review;
mod quiz;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::load_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // A document that fails validation never gets a session.
  let config = load_config_from_env();
  let state = match AppState::new(config) {
    Ok(s) => Arc::new(s),
    Err(e) => {
      error!(target: "quizdeck_backend", error = %e, "Refusing to start");
      return Err(e.into());
    }
  };

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizdeck_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      info!(target: "quizdeck_backend", "Shutdown signal received");
    })
    .await?;
  Ok(())
}
