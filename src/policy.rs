//! Coaching policy table
//!
//! Every threshold and deduction the evaluators use lives here. The defaults
//! are hand-tuned coaching constants; callers can override any part of the
//! table from JSON (missing fields keep their defaults).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConfigError;

/// ---------------------------------------------------------------------------
/// Top-level Policy
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
  pub readiness: ReadinessPolicy,
  pub fatigue: FatiguePolicy,
  pub context: ContextLimits,
}

impl Policy {
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Policy(e.to_string()))
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::PolicyFile {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;
    Self::from_json(&json)
  }
}

/// ---------------------------------------------------------------------------
/// Readiness Deductions
/// ---------------------------------------------------------------------------

/// One rung of a deduction ladder. Within a ladder the first matching tier
/// applies, so tiers are listed most severe first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionTier {
  pub limit: f64,
  pub deduction: u32,
  pub concern: String,
  #[serde(default)]
  pub recommendation: Option<String>,
}

impl DeductionTier {
  pub fn new(limit: f64, deduction: u32, concern: &str) -> Self {
    Self {
      limit,
      deduction,
      concern: concern.to_string(),
      recommendation: None,
    }
  }

  pub fn recommending(mut self, recommendation: &str) -> Self {
    self.recommendation = Some(recommendation.to_string());
    self
  }
}

/// How a ladder's limit is compared with the observed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
  Below,
  AtMost,
  AtLeast,
  Above,
}

impl Comparison {
  pub fn matches(&self, value: f64, limit: f64) -> bool {
    match self {
      Comparison::Below => value < limit,
      Comparison::AtMost => value <= limit,
      Comparison::AtLeast => value >= limit,
      Comparison::Above => value > limit,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionLadder {
  pub comparison: Comparison,
  pub tiers: Vec<DeductionTier>,
}

impl DeductionLadder {
  pub fn new(comparison: Comparison, tiers: Vec<DeductionTier>) -> Self {
    Self { comparison, tiers }
  }

  /// First tier whose limit the value crosses
  pub fn evaluate(&self, value: f64) -> Option<&DeductionTier> {
    self
      .tiers
      .iter()
      .find(|tier| self.comparison.matches(value, tier.limit))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
  pub sleep_hours: DeductionLadder,
  pub sleep_quality: DeductionLadder,
  pub energy: DeductionLadder,
  pub stress: DeductionLadder,
  pub soreness: DeductionLadder,
  /// Resting HR above baseline, in bpm
  pub resting_hr_delta: DeductionLadder,
  /// HRV drop below baseline, in percent
  pub hrv_drop_pct: DeductionLadder,
  pub green_min: u32,
  pub yellow_min: u32,
  pub yellow_default_recommendation: String,
  pub red_default_recommendation: String,
}

impl Default for ReadinessPolicy {
  fn default() -> Self {
    Self {
      sleep_hours: DeductionLadder::new(
        Comparison::Below,
        vec![
          DeductionTier::new(5.0, 30, "Very low sleep")
            .recommending("Prioritize sleep tonight and keep today's session easy"),
          DeductionTier::new(6.0, 15, "Low sleep"),
          DeductionTier::new(7.0, 5, "Slightly short sleep"),
        ],
      ),
      sleep_quality: DeductionLadder::new(
        Comparison::AtMost,
        vec![
          DeductionTier::new(4.0, 20, "Poor sleep quality")
            .recommending("Keep today easy and prioritize sleep tonight"),
          DeductionTier::new(6.0, 10, "Fair sleep quality"),
        ],
      ),
      energy: DeductionLadder::new(
        Comparison::AtMost,
        vec![
          DeductionTier::new(3.0, 25, "Very low energy")
            .recommending("Swap intensity for an easy aerobic session or rest"),
          DeductionTier::new(5.0, 10, "Low energy"),
        ],
      ),
      stress: DeductionLadder::new(
        Comparison::AtLeast,
        vec![
          DeductionTier::new(9.0, 25, "Very high stress")
            .recommending("Keep training light; stress load is already high"),
          DeductionTier::new(7.0, 10, "Elevated stress"),
        ],
      ),
      soreness: DeductionLadder::new(
        Comparison::AtLeast,
        vec![
          DeductionTier::new(8.0, 20, "High muscle soreness")
            .recommending("Avoid high-impact and high-intensity work today"),
          DeductionTier::new(6.0, 10, "Moderate muscle soreness"),
        ],
      ),
      resting_hr_delta: DeductionLadder::new(
        Comparison::Above,
        vec![
          DeductionTier::new(10.0, 25, "Resting HR well above baseline")
            .recommending("Elevated resting HR can signal illness or fatigue; consider rest"),
          DeductionTier::new(5.0, 10, "Resting HR above baseline"),
        ],
      ),
      hrv_drop_pct: DeductionLadder::new(
        Comparison::Above,
        vec![
          DeductionTier::new(20.0, 20, "HRV well below baseline")
            .recommending("HRV suppression suggests incomplete recovery; favor low intensity"),
          DeductionTier::new(10.0, 10, "HRV below baseline"),
        ],
      ),
      green_min: 70,
      yellow_min: 40,
      yellow_default_recommendation: "Consider reduced volume or intensity".to_string(),
      red_default_recommendation: "Rest day or very light recovery activity only".to_string(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Fatigue Bands
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatiguePolicy {
  /// TSB below this is critical
  pub critical_tsb: f64,
  /// TSB below this is high
  pub high_tsb: f64,
  /// TSB below this is moderate
  pub moderate_tsb: f64,
  /// TSB above this is flagged as very fresh
  pub fresh_tsb: f64,
  /// Ramp rate above this (TSS/week) is too steep
  pub ramp_rate_max: f64,
  /// Ramp rate above this (TSS/week) is elevated
  pub ramp_rate_elevated: f64,
}

impl Default for FatiguePolicy {
  fn default() -> Self {
    Self {
      critical_tsb: -40.0,
      high_tsb: -25.0,
      moderate_tsb: -10.0,
      fresh_tsb: 10.0,
      ramp_rate_max: 8.0,
      ramp_rate_elevated: 5.0,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Context Bounds
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextLimits {
  /// Maximum characters for any embedded free-text field
  pub max_text_len: usize,
  pub max_activities: usize,
  pub max_wellness_days: usize,
}

impl Default for ContextLimits {
  fn default() -> Self {
    Self {
      max_text_len: 100,
      max_activities: 10,
      max_wellness_days: 7,
    }
  }
}
