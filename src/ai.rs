//! Minimal AI clients used as an optional quiz source: OpenAI-compatible chat
//! completions, or Google Gemini `generateContent`.
//!
//! Both expect a JSON array of questions back. The reply is never trusted as-is:
//! `normalize_questions` enforces the same shape rules as the local generator
//! before anything reaches a caller.
//!
//! NOTE: We never log the API key or the study text; only sizes, model names and latencies.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::config::Prompts;
use crate::domain::{Mode, Question, MCQ_OPTION_COUNT};
use crate::util::{fill_template, preview};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GOOGLE_MODEL: &str = "gemini-1.5-flash";

const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiProvider {
  OpenAi,
  Google,
}

impl AiProvider {
  /// Name reported in the `provider` field of quiz responses.
  pub fn as_str(&self) -> &'static str {
    match self {
      AiProvider::OpenAi => "openai",
      AiProvider::Google => "google",
    }
  }
}

/// Which provider to call and how. Built from env by `from_env`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiSettings {
  pub provider: AiProvider,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl AiSettings {
  /// Google wins when AI_PROVIDER=google or GOOGLE_API_KEY is set; otherwise an
  /// OpenAI-compatible endpoint. `None` when the chosen provider has no key.
  pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Option<Self> {
    let provider_name = get("AI_PROVIDER").map(|p| p.to_lowercase()).unwrap_or_default();
    if provider_name == "google" || get("GOOGLE_API_KEY").is_some() {
      return Some(Self {
        provider: AiProvider::Google,
        api_key: get("AI_API_KEY").or_else(|| get("GOOGLE_API_KEY"))?,
        base_url: GOOGLE_BASE_URL.into(),
        model: get("AI_MODEL").unwrap_or_else(|| GOOGLE_MODEL.into()),
      });
    }
    Some(Self {
      provider: AiProvider::OpenAi,
      api_key: get("AI_API_KEY").or_else(|| get("OPENAI_API_KEY"))?,
      base_url: get("AI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.into()),
      model: get("AI_MODEL").unwrap_or_else(|| OPENAI_MODEL.into()),
    })
  }

  pub fn from_env() -> Option<Self> {
    Self::from_lookup(env_nonempty)
  }
}

#[derive(Clone)]
pub struct AiClient {
  pub client: reqwest::Client,
  pub provider: AiProvider,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  /// Extra headers for OpenRouter (`HTTP-Referer`, `X-Title`).
  pub referer: Option<(String, String)>,
}

fn env_nonempty(key: &str) -> Option<String> {
  std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl AiClient {
  /// Construct the client if provider credentials are present; otherwise return None.
  pub fn from_env() -> Option<Self> {
    Self::new(AiSettings::from_env()?)
  }

  pub fn new(settings: AiSettings) -> Option<Self> {
    let AiSettings { provider, api_key, base_url, model } = settings;
    let referer = (provider == AiProvider::OpenAi && base_url.contains("openrouter.ai")).then(|| {
      (
        env_nonempty("AI_SITE_URL").unwrap_or_else(|| "http://localhost:5000".into()),
        env_nonempty("AI_APP_NAME").unwrap_or_else(|| "Quiz Generator".into()),
      )
    });

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, provider, api_key, base_url: base_url.trim_end_matches('/').to_string(), model, referer })
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(&self, system: &str, user: &str, temperature: f32, max_tokens: u32) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: Some(max_tokens),
    };

    let mut builder = self.client.post(&url)
      .header(USER_AGENT, "quizforge/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key));
    if let Some((site, app)) = &self.referer {
      builder = builder.header("HTTP-Referer", site).header("X-Title", app);
    }
    let res = builder.json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_error_message(&body).unwrap_or(body);
      return Err(format!("AI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "AI usage");
    }
    Ok(body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default())
  }

  /// Gemini `generateContent` with a single user prompt.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model))]
  async fn gemini_generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String, String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GeminiRequest {
      contents: vec![GeminiContent { parts: vec![GeminiPart { text: Some(prompt.to_string()) }] }],
      generation_config: GeminiGenerationConfig { temperature, max_output_tokens: max_tokens },
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "quizforge/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_error_message(&body).unwrap_or(body);
      return Err(format!("AI HTTP {}: {}", status, msg));
    }

    let body: GeminiResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(gemini_reply_text(&body))
  }

  /// Ask the provider for a quiz and return only the questions that pass validation.
  #[instrument(
    level = "info",
    skip(self, prompts, text, num_questions, mode),
    fields(provider = self.provider.as_str(), text_len = text.len(), %num_questions, %mode)
  )]
  pub async fn generate_quiz(
    &self,
    prompts: &Prompts,
    text: &str,
    num_questions: usize,
    mode: Mode,
  ) -> Result<Vec<Question>, String> {
    let user = build_prompt(&prompts.user_template, text, num_questions, mode);
    let start = Instant::now();
    let reply = match self.provider {
      AiProvider::OpenAi => self.chat_plain(&prompts.system, &user, TEMPERATURE, MAX_TOKENS).await,
      AiProvider::Google => self.gemini_generate(&user, TEMPERATURE, MAX_TOKENS).await,
    };
    let raw = match reply {
      Ok(raw) => raw,
      Err(e) => {
        error!(elapsed = ?start.elapsed(), error = %e, "AI call failed during quiz generation");
        return Err(e);
      }
    };

    let items = coerce_questions(&raw);
    if items.is_empty() {
      warn!(reply_preview = %preview(&raw, 80), "AI reply held no JSON array");
    }
    let questions = normalize_questions(&items, num_questions);
    if questions.len() < items.len() {
      warn!(received = items.len(), kept = questions.len(), "Dropped malformed AI questions");
    }
    info!(elapsed = ?start.elapsed(), reply_len = raw.len(), kept = questions.len(), "AI quiz received");
    Ok(questions)
  }
}

/// Fill the user prompt template with the count, mode-specific rules and the text.
pub fn build_prompt(template: &str, text: &str, num_questions: usize, mode: Mode) -> String {
  let mut rules = String::new();
  if mode.includes_mcq() {
    rules.push_str("- For MCQ, provide exactly 4 plausible options, one correct. Set type='mcq'.\n");
  }
  if mode.includes_true_false() {
    rules.push_str("- For True/False, options must be [\"True\", \"False\"]. Set type='true_false'.\n");
  }
  if mode == Mode::Mixed {
    rules.push_str("- If mixed, include a balanced mix of MCQ and True/False.\n");
  }
  let n = num_questions.to_string();
  fill_template(template, &[("num_questions", &n), ("mode_rules", &rules), ("text", text)])
}

/// Parse the reply as a JSON array, falling back to the outermost `[...]` slice.
pub fn coerce_questions(raw: &str) -> Vec<Value> {
  if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw.trim()) {
    return items;
  }
  if let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) {
    if end > start {
      if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw[start..=end]) {
        return items;
      }
    }
  }
  Vec::new()
}

fn value_to_string(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn value_to_index(v: Option<&Value>) -> Option<i64> {
  match v? {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

/// Keep items that can be expressed as valid `Question`s, at most `limit` of them.
pub fn normalize_questions(items: &[Value], limit: usize) -> Vec<Question> {
  items.iter().filter_map(normalize_question).take(limit).collect()
}

fn normalize_question(item: &Value) -> Option<Question> {
  let question = item.get("question").map(value_to_string)?.trim().to_string();
  let options: Vec<String> = item.get("options")?.as_array()?.iter().map(value_to_string).collect();
  let answer_index = value_to_index(item.get("answer_index"))?;
  if question.is_empty() || options.is_empty() || answer_index < 0 || answer_index as usize >= options.len() {
    return None;
  }
  let kind = item
    .get("type")
    .and_then(Value::as_str)
    .map(|s| s.trim().to_lowercase())
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| "mcq".into());

  let q = match kind.as_str() {
    "true_false" => Question::true_false(question, answer_index == 0),
    "mcq" => {
      let mut options = options;
      options.truncate(MCQ_OPTION_COUNT);
      Question::mcq(question, options, answer_index as usize)
    }
    _ => return None,
  };
  q.is_well_formed().then_some(q)
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

// --- Gemini DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
  contents: Vec<GeminiContent>,
  generation_config: GeminiGenerationConfig,
}
#[derive(Serialize, Deserialize)]
struct GeminiContent { #[serde(default)] parts: Vec<GeminiPart> }
#[derive(Serialize, Deserialize)]
struct GeminiPart {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  text: Option<String>,
}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig { temperature: f32, max_output_tokens: u32 }

#[derive(Deserialize)]
struct GeminiResponse { #[serde(default)] candidates: Vec<GeminiCandidate> }
#[derive(Deserialize)]
struct GeminiCandidate { #[serde(default)] content: Option<GeminiContent> }

/// Text of the first candidate, its parts concatenated.
fn gemini_reply_text(resp: &GeminiResponse) -> String {
  resp.candidates
    .first()
    .and_then(|c| c.content.as_ref())
    .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
    .unwrap_or_default()
}

/// Try to extract a clean error message from an OpenAI- or Google-style error body.
fn extract_error_message(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
