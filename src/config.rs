//! Loading service configuration (AI prompts + request limits) from TOML.
//!
//! See `QuizConfig`, `Prompts` and `Limits` for the expected schema. Every field
//! has a default, so an empty file (or no file at all) is valid.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub limits: Limits,
}

/// Prompts sent to the AI provider. `user_template` understands
/// `{num_questions}`, `{mode_rules}` and `{text}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub system: String,
  pub user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      system: "You produce strict JSON outputs.".into(),
      user_template: concat!(
        "You are a helpful assistant that creates high-quality quiz questions from study text.\n",
        "Return ONLY a valid JSON array, no prose, no markdown fences.\n",
        "Each item must be: {\n",
        "  'question': string (<= 30 words),\n",
        "  'options': array of strings,\n",
        "  'answer_index': integer index of the correct option,\n",
        "  'type': 'mcq' or 'true_false'\n",
        "}.\n",
        "Constraints:\n",
        "- Total questions: {num_questions}.\n",
        "- Prefer conceptually meaningful, unambiguous questions.\n",
        "- No duplicate or near-duplicate questions.\n",
        "- Avoid trivial blanks; test comprehension.\n",
        "- Keep questions concise (<= 30 words).\n",
        "{mode_rules}",
        "\nText to use:\n{text}",
      )
      .into(),
    }
  }
}

/// Request bounds enforced by the HTTP layer before the generator runs.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Limits {
  /// Used when the request omits `num_questions` or sends 0.
  pub default_questions: usize,
  pub max_questions: usize,
  pub max_upload_bytes: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self { default_questions: 5, max_questions: 100, max_upload_bytes: 16 * 1024 * 1024 }
  }
}

impl Limits {
  /// Missing or zero means the default; the result always lies in `[1, max_questions]`.
  pub fn clamp_questions(&self, requested: Option<i64>) -> usize {
    let max = self.max_questions.max(1) as i64;
    let n = match requested {
      Some(n) if n != 0 => n,
      _ => self.default_questions as i64,
    };
    n.clamp(1, max) as usize
  }
}

/// Parse a TOML document into `QuizConfig`.
pub fn parse_config(s: &str) -> Result<QuizConfig, String> {
  toml::from_str::<QuizConfig>(s).map_err(|e| e.to_string())
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "quizforge", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizforge", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizforge", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
