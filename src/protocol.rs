//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::Question;

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub num_questions: Option<i64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub use_ai: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOut {
    pub questions: Vec<Question>,
    pub used_ai: bool,
    pub provider: Option<String>,
    /// True when AI was requested but the local generator produced the result.
    pub fallback: bool,
    pub ai_error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadOut {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
