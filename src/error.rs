use thiserror::Error;

use crate::config::ConfigError;
use crate::llm::LlmError;

/// Top-level error for the caller-facing layer
#[derive(Error, Debug)]
pub enum CoachError {
  #[error("Invalid input: {0}")]
  Input(String),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Llm(#[from] LlmError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoachError {
  fn from(err: serde_json::Error) -> Self {
    CoachError::Input(err.to_string())
  }
}
