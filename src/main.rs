//! Quizforge · Quiz Generator Backend
//!
//! - Axum HTTP API (`/upload`, `/generate-quiz`, `/health`)
//! - Optional AI generation (OpenAI-compatible, via environment variables)
//! - Static frontend fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 5000)
//!   AI_API_KEY       : enables AI generation if present (OPENAI_API_KEY also accepted)
//!   AI_BASE_URL      : default "https://api.openai.com/v1"
//!   AI_MODEL         : default "gpt-4o-mini"
//!   QUIZ_CONFIG_PATH : path to TOML config (prompts + limits)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use quizforge::routes::build_router;
use quizforge::state::AppState;
use quizforge::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizforge", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "quizforge", error = %e, "Failed to listen for shutdown signal");
  }
  info!(target: "quizforge", "Shutdown signal received");
}
