//! Daily briefing and coach conversation
//!
//! Glue between the deterministic engine and the model: builds the context,
//! runs the readiness and fatigue evaluators on demand, and hands the rendered
//! text to a `CoachModel`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compatibility::ConstraintCompatibility;
use crate::config::CoachConfig;
use crate::context::{CoachingContext, ContextInputs};
use crate::error::CoachError;
use crate::fatigue::FatigueAssessment;
use crate::llm::{CoachModel, Completion};
use crate::models::WorkoutDescriptor;
use crate::policy::Policy;
use crate::readiness::{ReadinessAssessment, ReadinessBaseline, DEFAULT_BASELINE_WINDOW};

const SYSTEM_PROMPT: &str = include_str!("prompts/coach_system.txt");

/// ---------------------------------------------------------------------------
/// Input
/// ---------------------------------------------------------------------------

/// One athlete snapshot as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoachInput {
  #[serde(flatten)]
  pub inputs: ContextInputs,
  /// Resting HR / HRV baseline; derived from wellness history when absent or empty
  #[serde(default)]
  pub baseline: Option<ReadinessBaseline>,
  /// Snapshot time; the caller's clock is used when absent
  #[serde(default)]
  pub now: Option<DateTime<Utc>>,
}

impl CoachInput {
  /// Deserialize a snapshot, rejecting wrongly shaped documents
  pub fn from_json(json: &str) -> Result<Self, CoachError> {
    Ok(serde_json::from_str(json)?)
  }
}

/// ---------------------------------------------------------------------------
/// Daily Briefing
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBriefing {
  pub context: CoachingContext,
  pub baseline: ReadinessBaseline,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub readiness: Option<ReadinessAssessment>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fatigue: Option<FatigueAssessment>,
  /// Rendered context sections
  pub rendered: String,
}

impl DailyBriefing {
  pub fn build(input: CoachInput, policy: &Policy, now: DateTime<Utc>) -> Self {
    let CoachInput {
      inputs,
      baseline,
      now: snapshot_now,
    } = input;
    let now = snapshot_now.unwrap_or(now);

    let context = CoachingContext::build(inputs, now);

    let baseline = baseline.filter(|b| !b.is_empty()).unwrap_or_else(|| {
      ReadinessBaseline::from_wellness(&context.wellness_history, DEFAULT_BASELINE_WINDOW)
    });

    let readiness = context
      .today_check_in
      .as_ref()
      .map(|check_in| ReadinessAssessment::compute(check_in, &baseline, &policy.readiness));

    let fatigue = context
      .fitness_metrics
      .as_ref()
      .map(|metrics| FatigueAssessment::compute(metrics, &policy.fatigue));

    let rendered = context.render(&policy.context);

    Self {
      context,
      baseline,
      readiness,
      fatigue,
      rendered,
    }
  }

  pub fn check_workout(&self, workout: &WorkoutDescriptor) -> ConstraintCompatibility {
    check_workout(self, workout)
  }

  /// Readiness and fatigue verdicts as prompt-ready text
  pub fn assessment_summary(&self) -> String {
    let mut blocks = Vec::new();

    if let Some(r) = &self.readiness {
      let mut lines = vec![format!("Readiness: {} (score {}/100)", r.readiness.as_str(), r.score)];
      lines.extend(r.concerns.iter().map(|c| format!("- Concern: {}", c)));
      lines.extend(r.recommendations.iter().map(|c| format!("- Recommendation: {}", c)));
      blocks.push(lines.join("\n"));
    }

    if let Some(f) = &self.fatigue {
      let mut lines = vec![format!("Fatigue: {} (TSB {:.1})", f.level.as_str(), f.tsb)];
      lines.extend(f.concerns.iter().map(|c| format!("- Concern: {}", c)));
      lines.extend(f.recommendations.iter().map(|c| format!("- Recommendation: {}", c)));
      blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
  }

  fn user_message(&self, question: &str) -> String {
    let assessments = self.assessment_summary();
    let assessments = if assessments.is_empty() {
      "No check-in or fitness metrics available.".to_string()
    } else {
      assessments
    };

    format!(
      "TRAINING CONTEXT:\n{}\n\nASSESSMENTS:\n{}\n\nATHLETE QUESTION:\n{}",
      self.rendered,
      assessments,
      question.trim()
    )
  }
}

/// Check a proposed workout against the briefing's constraints and check-in
pub fn check_workout(briefing: &DailyBriefing, workout: &WorkoutDescriptor) -> ConstraintCompatibility {
  ConstraintCompatibility::check(workout, &briefing.context)
}

/// ---------------------------------------------------------------------------
/// Coach Conversation
/// ---------------------------------------------------------------------------

/// Ask the model a question grounded in the briefing
pub async fn ask_coach(
  model: &dyn CoachModel,
  config: &CoachConfig,
  briefing: &DailyBriefing,
  question: &str,
) -> Result<Completion, CoachError> {
  let user_message = briefing.user_message(question);

  tracing::info!(
    model = %config.model,
    prompt_chars = user_message.len(),
    "asking coach"
  );

  let completion = model
    .complete(SYSTEM_PROMPT, &user_message, config.max_tokens)
    .await
    .map_err(|e| {
      tracing::warn!(error = %e, "coach request failed");
      e
    })?;

  tracing::info!(
    input_tokens = completion.usage.input_tokens,
    output_tokens = completion.usage.output_tokens,
    "coach replied"
  );

  Ok(completion)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
