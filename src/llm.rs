//! LLM integration for coaching replies
//!
//! This module handles communication with the Claude API. The rest of the
//! crate talks to the model through the `CoachModel` trait so the HTTP
//! client can be swapped out in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CoachConfig;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const API_VERSION: &str = "2023-06-01";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Serialize)]
pub enum LlmError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// ---------------------------------------------------------------------------
/// Claude API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
  model: &'a str,
  max_tokens: u32,
  system: &'a str,
  messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
  content: Vec<ContentBlock>,
  usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  content_type: String,
  text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
  pub input_tokens: u32,
  pub output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
  error: ClaudeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Model Abstraction
/// ---------------------------------------------------------------------------

/// Model reply with token usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
  pub text: String,
  pub usage: Usage,
}

#[async_trait]
pub trait CoachModel: Send + Sync {
  /// Send one user message under a system prompt
  async fn complete(
    &self,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
  ) -> Result<Completion, LlmError>;
}

/// ---------------------------------------------------------------------------
/// Claude Client
/// ---------------------------------------------------------------------------

pub struct ClaudeClient {
  client: Client,
  api_key: String,
  api_url: String,
  model: String,
}

impl ClaudeClient {
  pub fn new(api_key: impl Into<String>, api_url: impl Into<String>, model: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      api_url: api_url.into(),
      model: model.into(),
    }
  }

  /// Build a client from config; fails when no API key is set
  pub fn from_config(config: &CoachConfig) -> Result<Self, LlmError> {
    let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey)?;
    Ok(Self::new(api_key, config.api_url.clone(), config.model.clone()))
  }
}

#[async_trait]
impl CoachModel for ClaudeClient {
  async fn complete(
    &self,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
  ) -> Result<Completion, LlmError> {
    let request = ClaudeRequest {
      model: &self.model,
      max_tokens,
      system: system_prompt,
      messages: vec![ClaudeMessage {
        role: "user",
        content: user_message,
      }],
    };

    let response = self
      .client
      .post(&self.api_url)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", API_VERSION)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    if !status.is_success() {
      if let Ok(error_resp) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
        return Err(LlmError::Api(error_resp.error.message));
      }
      return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
    }

    let claude_response: ClaudeResponse =
      serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;

    let text = claude_response
      .content
      .into_iter()
      .find(|c| c.content_type == "text")
      .and_then(|c| c.text)
      .ok_or_else(|| LlmError::Parse("No text content in response".to_string()))?;

    Ok(Completion {
      text,
      usage: claude_response.usage,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn client_for(server: &mockito::Server) -> ClaudeClient {
    ClaudeClient::new("sk-test", format!("{}/v1/messages", server.url()), "claude-test")
  }

  #[tokio::test]
  async fn test_complete_returns_first_text_block() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/v1/messages")
      .match_header("x-api-key", "sk-test")
      .match_header("anthropic-version", API_VERSION)
      .match_body(mockito::Matcher::PartialJson(serde_json::json!({
        "model": "claude-test",
        "max_tokens": 256,
        "system": "be a coach"
      })))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"{
          "id": "msg_1",
          "model": "claude-test",
          "stop_reason": "end_turn",
          "content": [
            {"type": "tool_use", "id": "t1", "name": "noop", "input": {}},
            {"type": "text", "text": "Easy 40 minutes today."}
          ],
          "usage": {"input_tokens": 120, "output_tokens": 8}
        }"#,
      )
      .create_async()
      .await;

    let completion = client_for(&server)
      .complete("be a coach", "what should I do?", 256)
      .await
      .unwrap();

    mock.assert_async().await;
    assert_eq!(completion.text, "Easy 40 minutes today.");
    assert_eq!(completion.usage, Usage { input_tokens: 120, output_tokens: 8 });
  }

  #[tokio::test]
  async fn test_api_error_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/v1/messages")
      .with_status(429)
      .with_body(r#"{"type": "error", "error": {"type": "rate_limit_error", "message": "Rate limited"}}"#)
      .create_async()
      .await;

    let err = client_for(&server).complete("s", "u", 64).await.unwrap_err();
    assert!(matches!(err, LlmError::Api(ref m) if m == "Rate limited"));
  }

  #[tokio::test]
  async fn test_unstructured_error_body_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/v1/messages")
      .with_status(502)
      .with_body("bad gateway")
      .create_async()
      .await;

    let err = client_for(&server).complete("s", "u", 64).await.unwrap_err();
    match err {
      LlmError::Api(message) => {
        assert!(message.contains("502"));
        assert!(message.contains("bad gateway"));
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_response_without_text_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/v1/messages")
      .with_status(200)
      .with_body(r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#)
      .create_async()
      .await;

    let err = client_for(&server).complete("s", "u", 64).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse(_)));
  }

  #[test]
  fn test_from_config_requires_api_key() {
    let config = CoachConfig::default();
    assert!(matches!(ClaudeClient::from_config(&config), Err(LlmError::MissingApiKey)));

    let config = CoachConfig {
      api_key: Some("sk-test".to_string()),
      ..CoachConfig::default()
    };
    assert!(ClaudeClient::from_config(&config).is_ok());
  }
}
