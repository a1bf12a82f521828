//! Environment-driven configuration
//!
//! The binary loads `.env` first; everything here reads the process
//! environment only.

use std::path::PathBuf;

use thiserror::Error;

use crate::policy::Policy;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
const MODEL_VAR: &str = "COACH_MODEL";
const API_URL_VAR: &str = "COACH_API_URL";
const MAX_TOKENS_VAR: &str = "COACH_MAX_TOKENS";
const POLICY_PATH_VAR: &str = "COACH_POLICY_PATH";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value}")]
  Invalid { name: &'static str, value: String },

  #[error("Failed to read policy file {path}: {message}")]
  PolicyFile { path: PathBuf, message: String },

  #[error("Invalid policy: {0}")]
  Policy(String),
}

/// ---------------------------------------------------------------------------
/// Coach Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CoachConfig {
  /// Only needed when the model is actually called
  pub api_key: Option<String>,
  pub model: String,
  pub api_url: String,
  pub max_tokens: u32,
  pub policy_path: Option<PathBuf>,
}

impl Default for CoachConfig {
  fn default() -> Self {
    Self {
      api_key: None,
      model: DEFAULT_MODEL.to_string(),
      api_url: DEFAULT_API_URL.to_string(),
      max_tokens: DEFAULT_MAX_TOKENS,
      policy_path: None,
    }
  }
}

impl CoachConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let max_tokens = match non_empty_var(MAX_TOKENS_VAR) {
      Some(raw) => raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
        name: MAX_TOKENS_VAR,
        value: raw,
      })?,
      None => DEFAULT_MAX_TOKENS,
    };

    Ok(Self {
      api_key: non_empty_var(API_KEY_VAR),
      model: non_empty_var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
      api_url: non_empty_var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
      max_tokens,
      policy_path: non_empty_var(POLICY_PATH_VAR).map(PathBuf::from),
    })
  }

  /// Policy from `policy_path`, or the built-in defaults
  pub fn load_policy(&self) -> Result<Policy, ConfigError> {
    match &self.policy_path {
      Some(path) => {
        tracing::debug!(path = %path.display(), "loading policy file");
        Policy::load(path)
      }
      None => Ok(Policy::default()),
    }
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
