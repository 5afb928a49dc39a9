//! Application state: prompts, request limits and the optional AI client.
//!
//! Nothing here is mutated after startup; each request builds its own
//! frequency model and sentence pool inside the generator.

use tracing::{info, instrument};

use crate::ai::AiClient;
use crate::config::{load_config_from_env, Limits, Prompts, QuizConfig};

#[derive(Clone)]
pub struct AppState {
    pub ai: Option<AiClient>,
    pub prompts: Prompts,
    pub limits: Limits,
}

impl AppState {
    /// Build state from env: load TOML config, init the AI client when credentials exist.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();
        let ai = AiClient::from_env();
        if let Some(client) = &ai {
            info!(target: "quizforge", provider = client.provider.as_str(), base_url = %client.base_url, model = %client.model, "AI generation enabled.");
        } else {
            info!(target: "quizforge", "AI generation disabled (no AI_API_KEY/OPENAI_API_KEY/GOOGLE_API_KEY). Using local generator only.");
        }
        info!(
            target: "quizforge",
            default_questions = cfg.limits.default_questions,
            max_questions = cfg.limits.max_questions,
            max_upload_bytes = cfg.limits.max_upload_bytes,
            "Request limits"
        );
        Self::with_config(cfg, ai)
    }

    /// State from explicit parts; used by tests and embedders.
    pub fn with_config(cfg: QuizConfig, ai: Option<AiClient>) -> Self {
        Self { ai, prompts: cfg.prompts, limits: cfg.limits }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(QuizConfig::default(), None)
    }
}
