//! LLM integration for plan and insight generation
//!
//! This module handles communication with the chat-completion API.
//! It owns the network call and the bearer credential; everything the
//! model is asked to do is assembled upstream in `prompts`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const API_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 0.7;

/// Environment variable holding the API credential, loaded via `.env`
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum GenerationError {
  #[error("API key not configured (set {API_KEY_VAR})")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// ---------------------------------------------------------------------------
/// Chat Completion API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest {
  model: String,
  messages: Vec<ChatMessage>,
  max_tokens: u32,
  temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
  role: String,
  content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
  message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
  content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
  error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Generation Client
/// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct GenerationClient {
  http: Client,
  api_key: String,
  base_url: String,
}

impl GenerationClient {
  /// Create a client, loading the API key from `.env` / the environment.
  ///
  /// A missing key is a startup configuration failure reported to the
  /// caller, not a crash.
  pub fn from_env() -> Result<Self, GenerationError> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var(API_KEY_VAR).map_err(|_| GenerationError::MissingApiKey)?;

    Ok(Self::new(api_key, API_BASE_URL.to_string()))
  }

  /// Create a client against an explicit endpoint (used by tests)
  pub fn with_base_url(api_key: String, base_url: String) -> Self {
    Self::new(api_key, base_url)
  }

  fn new(api_key: String, base_url: String) -> Self {
    Self {
      http: Client::new(),
      api_key,
      base_url,
    }
  }

  /// Send a system instruction and user prompt, returning the first
  /// completion's message content as raw text.
  ///
  /// No retry and no timeout beyond the transport default; dropping the
  /// returned future aborts the in-flight request.
  pub async fn complete(
    &self,
    system_prompt: &str,
    user_prompt: &str,
  ) -> Result<String, GenerationError> {
    let request = ChatRequest {
      model: MODEL.to_string(),
      messages: vec![
        ChatMessage {
          role: "system".to_string(),
          content: system_prompt.to_string(),
        },
        ChatMessage {
          role: "user".to_string(),
          content: user_prompt.to_string(),
        },
      ],
      max_tokens: MAX_TOKENS,
      temperature: TEMPERATURE,
    };

    debug!(prompt_chars = user_prompt.len(), "sending generation request");

    let response = self
      .http
      .post(format!("{}/chat/completions", self.base_url))
      .header("Authorization", format!("Bearer {}", self.api_key))
      .header("Content-Type", "application/json")
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      // Prefer the server's own error message when it sends one
      if let Ok(error_resp) = serde_json::from_str::<ApiErrorResponse>(&body) {
        return Err(GenerationError::Api(error_resp.error.message));
      }
      return Err(GenerationError::Api(format!("HTTP {}: {}", status, body)));
    }

    let chat_response: ChatResponse =
      serde_json::from_str(&body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let content = chat_response
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| GenerationError::Parse("No completion content in response".to_string()))?;

    debug!(reply_chars = content.len(), "generation request complete");

    Ok(content)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
