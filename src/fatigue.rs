//! Fatigue interpretation from rolling training load
//!
//! Classifies freshness from TSB (form) and checks how fast chronic load is
//! being built. Pure and total: missing ramp rate just skips that check.

use serde::{Deserialize, Serialize};

use crate::format::fmt1;
use crate::models::FitnessMetrics;
use crate::policy::FatiguePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
  Low,
  Moderate,
  High,
  Critical,
}

impl FatigueLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      FatigueLevel::Low => "low",
      FatigueLevel::Moderate => "moderate",
      FatigueLevel::High => "high",
      FatigueLevel::Critical => "critical",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueAssessment {
  pub level: FatigueLevel,
  pub tsb: f64,
  pub concerns: Vec<String>,
  pub recommendations: Vec<String>,
}

impl FatigueAssessment {
  /// Classify fatigue from TSB. Band limits are strict: TSB of exactly -40 is high, not critical
  pub fn compute(metrics: &FitnessMetrics, policy: &FatiguePolicy) -> Self {
    let tsb = metrics.tsb;
    let mut concerns = Vec::new();
    let mut recommendations = Vec::new();

    let level = if tsb < policy.critical_tsb {
      concerns.push(format!(
        "Critical fatigue (TSB {}): overtraining risk",
        fmt1(tsb)
      ));
      recommendations.push("Mandatory rest or very light recovery activity only".to_string());
      FatigueLevel::Critical
    } else if tsb < policy.high_tsb {
      concerns.push(format!("High accumulated fatigue (TSB {})", fmt1(tsb)));
      recommendations.push("Reduce training load and prioritize recovery".to_string());
      FatigueLevel::High
    } else if tsb < policy.moderate_tsb {
      recommendations.push("Productive training zone: continue as planned".to_string());
      FatigueLevel::Moderate
    } else {
      if tsb > policy.fresh_tsb {
        concerns.push(format!(
          "Very fresh (TSB {}): may be losing fitness",
          fmt1(tsb)
        ));
        recommendations.push("Training load may be increased".to_string());
      }
      FatigueLevel::Low
    };

    if let Some(ramp) = metrics.ramp_rate {
      if ramp > policy.ramp_rate_max {
        concerns.push(format!("Ramp rate too high ({} TSS/week)", fmt1(ramp)));
        recommendations.push(format!(
          "Slow the build: keep ramp rate at or below {} TSS/week",
          fmt1(policy.ramp_rate_max)
        ));
      } else if ramp > policy.ramp_rate_elevated && level != FatigueLevel::Low {
        // the level recommendation already covers what to do
        concerns.push(format!("Elevated ramp rate ({} TSS/week)", fmt1(ramp)));
      }
    }

    tracing::debug!(
      level = level.as_str(),
      tsb,
      concerns = concerns.len(),
      "fatigue assessed"
    );

    Self {
      level,
      tsb,
      concerns,
      recommendations,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
