//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic request/result info.

use std::sync::Arc;
use axum::{
  extract::{Multipart, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::logic::{extract_upload, generate, ApiError};
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorOut { error: self.message().to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.as_deref().map(str::len).unwrap_or(0), mode = ?body.mode))]
pub async fn http_post_generate_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> Result<Json<GenerateOut>, ApiError> {
  let out = generate(&state, body).await?;
  info!(target: "quiz", count = out.questions.len(), used_ai = out.used_ai, "HTTP quiz served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(multipart))]
pub async fn http_post_upload(mut multipart: Multipart) -> Result<Json<UploadOut>, ApiError> {
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
  {
    if field.name() != Some("file") {
      continue;
    }
    let filename = field.file_name().unwrap_or_default().to_string();
    let bytes = field
      .bytes()
      .await
      .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
    // extraction is CPU-bound (PDF parsing in particular)
    let text = tokio::task::spawn_blocking(move || extract_upload(&filename, &bytes))
      .await
      .map_err(|e| ApiError::Internal(format!("Failed to extract text: {e}")))??;
    return Ok(Json(UploadOut { text }));
  }
  warn!(target: "quizforge", "Upload without a file part");
  Err(ApiError::BadRequest("No file part".into()))
}
