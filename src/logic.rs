//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Quiz generation: optional AI attempt, then the local heuristic generator
//!   - Upload handling: extension check and text extraction

use tracing::{error, info, instrument, warn};

use crate::domain::Mode;
use crate::extract::{extract, is_supported};
use crate::protocol::{GenerateIn, GenerateOut};
use crate::quizgen::generate_quiz;
use crate::state::AppState;
use crate::util::file_extension;

/// Request-level failures, mapped to status codes by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
  BadRequest(String),
  Internal(String),
}

impl ApiError {
  pub fn message(&self) -> &str {
    match self {
      ApiError::BadRequest(m) | ApiError::Internal(m) => m,
    }
  }
}

/// Validate the request, try the AI provider when asked (and configured), and fall
/// back to the local generator whenever that yields nothing.
#[instrument(level = "info", skip(state, req))]
pub async fn generate(state: &AppState, req: GenerateIn) -> Result<GenerateOut, ApiError> {
  let text = req.text.as_deref().unwrap_or_default().trim().to_string();
  if text.is_empty() {
    return Err(ApiError::BadRequest("Text is required".into()));
  }
  let num_questions = state.limits.clamp_questions(req.num_questions);
  let mode = Mode::parse(req.mode.as_deref().unwrap_or_default());
  let ai = req.use_ai.unwrap_or(false).then_some(state.ai.as_ref()).flatten();
  if req.use_ai.unwrap_or(false) && ai.is_none() {
    warn!(target: "quiz", "AI requested but no provider is configured; using local generator");
  }

  let mut questions = Vec::new();
  let mut provider = None;
  let mut ai_error = None;
  if let Some(client) = ai {
    provider = Some(client.provider.as_str().to_string());
    match client.generate_quiz(&state.prompts, &text, num_questions, mode).await {
      Ok(qs) => questions = qs,
      Err(e) => {
        error!(target: "quiz", error = %e, "AI generation failed; using local generator");
        ai_error = Some(e);
      }
    }
  }

  let used_ai = !questions.is_empty();
  if !used_ai {
    // CPU-bound (regex scans, sorting); keep it off the async workers
    let local_text = text.clone();
    questions = tokio::task::spawn_blocking(move || generate_quiz(&local_text, num_questions, mode))
      .await
      .map_err(|e| {
        error!(target: "quiz", error = %e, "Local quiz generation task failed");
        ApiError::Internal(format!("Quiz generation failed: {e}"))
      })?;
  }
  let fallback = ai.is_some() && !used_ai;

  info!(
    target: "quiz",
    text_len = text.len(),
    %mode,
    requested = num_questions,
    produced = questions.len(),
    used_ai,
    fallback,
    "Quiz served"
  );
  Ok(GenerateOut { questions, used_ai, provider, fallback, ai_error })
}

/// Extract plain text from an uploaded document.
#[instrument(level = "info", skip(bytes), fields(size = bytes.len()))]
pub fn extract_upload(filename: &str, bytes: &[u8]) -> Result<String, ApiError> {
  if filename.is_empty() {
    return Err(ApiError::BadRequest("No selected file".into()));
  }
  let ext = match file_extension(filename) {
    Some(ext) if is_supported(&ext) => ext,
    _ => return Err(ApiError::BadRequest("Unsupported file type. Use PDF, DOCX, or TXT.".into())),
  };
  let text = extract(bytes, &ext).map_err(|e| {
    error!(target: "quizforge", %filename, error = %e, "Text extraction failed");
    ApiError::Internal(format!("Failed to extract text: {e}"))
  })?;
  info!(target: "quizforge", %ext, text_len = text.len(), "Upload extracted");
  Ok(text)
}
