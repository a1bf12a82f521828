//! Coaching decision and context engine
//!
//! Deterministic evaluators (readiness, fatigue, workout compatibility,
//! goal and phase resolution) plus the context aggregator that grounds a
//! language-model coach. Engine functions are pure: every input, including
//! the current time, is passed in explicitly.

pub mod coach;
pub mod compatibility;
pub mod config;
pub mod context;
pub mod error;
pub mod fatigue;
pub mod format;
pub mod llm;
pub mod models;
pub mod policy;
pub mod readiness;
pub mod resolver;

#[cfg(test)]
mod test_utils;

pub use coach::{ask_coach, check_workout, CoachInput, DailyBriefing};
pub use compatibility::ConstraintCompatibility;
pub use config::{CoachConfig, ConfigError};
pub use context::{CoachingContext, ContextInputs, ContextSection, SectionKind};
pub use error::CoachError;
pub use fatigue::{FatigueAssessment, FatigueLevel};
pub use llm::{ClaudeClient, CoachModel, Completion, LlmError};
pub use policy::Policy;
pub use readiness::{Readiness, ReadinessAssessment, ReadinessBaseline};
