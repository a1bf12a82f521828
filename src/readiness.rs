//! Daily training readiness from the wellness check-in
//!
//! Starts from 100 and applies one deduction per wellness signal, using the
//! deduction ladders in the policy table. Resting HR and HRV are compared
//! against the athlete's baseline, either supplied or derived from recent
//! wellness history.

use serde::{Deserialize, Serialize};

use crate::format::{fmt1, mean};
use crate::models::{DailyCheckIn, WellnessData};
use crate::policy::{DeductionLadder, ReadinessPolicy};

const MAX_SCORE: u32 = 100;

/// ---------------------------------------------------------------------------
/// Classification
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
  Green,
  Yellow,
  Red,
}

impl Readiness {
  pub fn from_score(score: u32, policy: &ReadinessPolicy) -> Self {
    if score >= policy.green_min {
      Readiness::Green
    } else if score >= policy.yellow_min {
      Readiness::Yellow
    } else {
      Readiness::Red
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Readiness::Green => "green",
      Readiness::Yellow => "yellow",
      Readiness::Red => "red",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Baseline
/// ---------------------------------------------------------------------------

/// Days of history averaged when no baseline is supplied
pub const DEFAULT_BASELINE_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessBaseline {
  #[serde(default)]
  pub resting_hr: Option<f64>,
  #[serde(default)]
  pub hrv: Option<f64>,
}

impl ReadinessBaseline {
  /// Mean resting HR and HRV over the most recent `window` days of history
  pub fn from_wellness(history: &[WellnessData], window: usize) -> Self {
    let mut recent: Vec<&WellnessData> = history.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(window);

    Self {
      resting_hr: mean(recent.iter().filter_map(|w| w.resting_hr.map(f64::from))),
      hrv: mean(recent.iter().filter_map(|w| w.hrv)),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.resting_hr.is_none() && self.hrv.is_none()
  }
}

/// ---------------------------------------------------------------------------
/// Assessment
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessAssessment {
  pub readiness: Readiness,
  pub score: u32,
  pub concerns: Vec<String>,
  pub recommendations: Vec<String>,
}

/// Accumulates deductions across independent signals
struct Deductions {
  score: u32,
  concerns: Vec<String>,
  recommendations: Vec<String>,
}

impl Deductions {
  fn apply(&mut self, ladder: &DeductionLadder, value: Option<f64>, detail: impl Fn(f64) -> String) {
    let Some(value) = value else { return };
    let Some(tier) = ladder.evaluate(value) else { return };

    self.score = self.score.saturating_sub(tier.deduction);
    self.concerns.push(format!("{} ({})", tier.concern, detail(value)));
    if let Some(rec) = &tier.recommendation {
      self.recommendations.push(rec.clone());
    }
  }
}

impl ReadinessAssessment {
  pub fn compute(
    check_in: &DailyCheckIn,
    baseline: &ReadinessBaseline,
    policy: &ReadinessPolicy,
  ) -> Self {
    let mut d = Deductions {
      score: MAX_SCORE,
      concerns: Vec::new(),
      recommendations: Vec::new(),
    };

    d.apply(&policy.sleep_hours, check_in.sleep_hours, |v| format!("{}h", fmt1(v)));
    d.apply(&policy.sleep_quality, check_in.sleep_quality.map(f64::from), |v| format!("{}/10", v));
    d.apply(&policy.energy, check_in.energy.map(f64::from), |v| format!("{}/10", v));
    d.apply(&policy.stress, check_in.stress.map(f64::from), |v| format!("{}/10", v));
    d.apply(&policy.soreness, check_in.soreness.map(f64::from), |v| format!("{}/10", v));

    let hr_delta = match (check_in.resting_hr, baseline.resting_hr) {
      (Some(hr), Some(base)) => Some(hr as f64 - base),
      _ => None,
    };
    d.apply(&policy.resting_hr_delta, hr_delta, |v| format!("+{} bpm", fmt1(v)));

    let hrv_drop_pct = match (check_in.hrv, baseline.hrv) {
      (Some(hrv), Some(base)) if base > 0.0 => Some((base - hrv) / base * 100.0),
      _ => None,
    };
    d.apply(&policy.hrv_drop_pct, hrv_drop_pct, |v| format!("-{}%", fmt1(v)));

    let score = d.score;
    let readiness = Readiness::from_score(score, policy);
    let mut recommendations = d.recommendations;

    match readiness {
      Readiness::Yellow if recommendations.is_empty() => {
        recommendations.push(policy.yellow_default_recommendation.clone());
      }
      Readiness::Red if recommendations.is_empty() => {
        recommendations.push(policy.red_default_recommendation.clone());
      }
      _ => {}
    }

    tracing::debug!(
      readiness = readiness.as_str(),
      score,
      concerns = d.concerns.len(),
      "readiness assessed"
    );

    Self {
      readiness,
      score,
      concerns: d.concerns,
      recommendations,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::policy::{Comparison, DeductionTier};
  use crate::test_utils::date;

  fn score(check_in: &DailyCheckIn) -> ReadinessAssessment {
    ReadinessAssessment::compute(check_in, &ReadinessBaseline::default(), &ReadinessPolicy::default())
  }

  #[test]
  fn test_empty_check_in_is_green_100() {
    let result = score(&DailyCheckIn::default());
    assert_eq!(result.score, 100);
    assert_eq!(result.readiness, Readiness::Green);
    assert!(result.concerns.is_empty());
    assert!(result.recommendations.is_empty());
  }

  #[test]
  fn test_lower_sleep_never_raises_score() {
    let mut check_in = DailyCheckIn::default();
    let mut last = 100;
    for hours in [8.0, 6.5, 5.5, 4.0] {
      check_in.sleep_hours = Some(hours);
      let s = score(&check_in).score;
      assert!(s <= last, "{}h scored {} after {}", hours, s, last);
      last = s;
    }
    assert_eq!(last, 70);
  }

  #[test]
  fn test_deductions_are_additive_across_fields() {
    // 30 (sleep < 5) + 20 (quality <= 4) + 10 (stress >= 7) = 60
    let check_in = DailyCheckIn {
      sleep_hours: Some(4.5),
      sleep_quality: Some(4),
      stress: Some(7),
      ..DailyCheckIn::default()
    };
    let result = score(&check_in);
    assert_eq!(result.score, 40);
    assert_eq!(result.readiness, Readiness::Yellow);
    assert_eq!(result.concerns.len(), 3);
    assert!(result.concerns[0].starts_with("Very low sleep"));
    // both large tiers carry their own recommendation
    assert_eq!(result.recommendations.len(), 2);
    assert_eq!(result.recommendations[1], "Keep today easy and prioritize sleep tonight");
  }

  #[test]
  fn test_score_floors_at_zero_and_is_red() {
    let check_in = DailyCheckIn {
      sleep_hours: Some(3.0),
      sleep_quality: Some(2),
      energy: Some(2),
      stress: Some(10),
      soreness: Some(9),
      resting_hr: Some(70),
      hrv: Some(30.0),
      ..DailyCheckIn::default()
    };
    let baseline = ReadinessBaseline {
      resting_hr: Some(50.0),
      hrv: Some(60.0),
    };
    let result = ReadinessAssessment::compute(&check_in, &baseline, &ReadinessPolicy::default());
    assert_eq!(result.score, 0);
    assert_eq!(result.readiness, Readiness::Red);
    assert_eq!(result.concerns.len(), 7);
  }

  #[test]
  fn test_classification_boundaries_are_exact() {
    let policy = ReadinessPolicy::default();
    assert_eq!(Readiness::from_score(70, &policy), Readiness::Green);
    assert_eq!(Readiness::from_score(69, &policy), Readiness::Yellow);
    assert_eq!(Readiness::from_score(40, &policy), Readiness::Yellow);
    assert_eq!(Readiness::from_score(39, &policy), Readiness::Red);
  }

  #[test]
  fn test_yellow_gets_default_recommendation() {
    // 15 (sleep < 6) + 10 (energy <= 5) + 10 (soreness >= 6) = 35 -> 65
    let check_in = DailyCheckIn {
      sleep_hours: Some(5.5),
      energy: Some(5),
      soreness: Some(6),
      ..DailyCheckIn::default()
    };
    let result = score(&check_in);
    assert_eq!(result.score, 65);
    assert_eq!(result.readiness, Readiness::Yellow);
    assert_eq!(result.recommendations, vec!["Consider reduced volume or intensity".to_string()]);
  }

  #[test]
  fn test_oversized_deduction_floors_at_zero() {
    let policy = crate::policy::Policy::from_json(
      r#"{"readiness": {"energy": {"comparison": "at_most", "tiers": [
        {"limit": 5.0, "deduction": 3000000000, "concern": "Low energy"}
      ]}}}"#,
    )
    .unwrap();

    let check_in = DailyCheckIn {
      energy: Some(3),
      sleep_hours: Some(4.0),
      ..DailyCheckIn::default()
    };
    let result = ReadinessAssessment::compute(&check_in, &ReadinessBaseline::default(), &policy.readiness);
    assert_eq!(result.score, 0);
    assert_eq!(result.readiness, Readiness::Red);
  }

  #[test]
  fn test_red_gets_default_recommendation_with_custom_policy() {
    let mut policy = ReadinessPolicy::default();
    policy.energy = DeductionLadder::new(
      Comparison::AtMost,
      vec![DeductionTier::new(5.0, 61, "Low energy")],
    );

    let check_in = DailyCheckIn {
      energy: Some(4),
      ..DailyCheckIn::default()
    };
    let result = ReadinessAssessment::compute(&check_in, &ReadinessBaseline::default(), &policy);
    assert_eq!(result.score, 39);
    assert_eq!(result.readiness, Readiness::Red);
    assert_eq!(
      result.recommendations,
      vec!["Rest day or very light recovery activity only".to_string()]
    );
  }

  #[test]
  fn test_resting_hr_against_baseline() {
    let baseline = ReadinessBaseline {
      resting_hr: Some(50.0),
      hrv: None,
    };
    let policy = ReadinessPolicy::default();

    let mut check_in = DailyCheckIn {
      resting_hr: Some(56),
      ..DailyCheckIn::default()
    };
    assert_eq!(ReadinessAssessment::compute(&check_in, &baseline, &policy).score, 90);

    check_in.resting_hr = Some(61);
    assert_eq!(ReadinessAssessment::compute(&check_in, &baseline, &policy).score, 75);

    // exactly +5 is not a deduction
    check_in.resting_hr = Some(55);
    assert_eq!(ReadinessAssessment::compute(&check_in, &baseline, &policy).score, 100);
  }

  #[test]
  fn test_hrv_drop_against_baseline() {
    let baseline = ReadinessBaseline {
      resting_hr: None,
      hrv: Some(60.0),
    };
    let policy = ReadinessPolicy::default();

    // 15% drop
    let check_in = DailyCheckIn {
      hrv: Some(51.0),
      ..DailyCheckIn::default()
    };
    assert_eq!(ReadinessAssessment::compute(&check_in, &baseline, &policy).score, 90);

    // 25% drop
    let check_in = DailyCheckIn {
      hrv: Some(45.0),
      ..DailyCheckIn::default()
    };
    let result = ReadinessAssessment::compute(&check_in, &baseline, &policy);
    assert_eq!(result.score, 80);
    assert_eq!(result.concerns, vec!["HRV well below baseline (-25.0%)".to_string()]);
  }

  #[test]
  fn test_hr_and_hrv_skipped_without_baseline() {
    let check_in = DailyCheckIn {
      resting_hr: Some(90),
      hrv: Some(10.0),
      ..DailyCheckIn::default()
    };
    assert_eq!(score(&check_in).score, 100);
  }

  #[test]
  fn test_baseline_from_recent_wellness() {
    let mut history = Vec::new();
    for day in 1..=10 {
      let mut w = WellnessData::empty(date(2026, 2, day));
      w.resting_hr = Some(40 + day);
      w.hrv = if day % 2 == 0 { Some(60.0) } else { None };
      history.push(w);
    }

    // most recent 3 days: 10, 9, 8 -> RHR 50, 49, 48; HRV on days 10 and 8
    let baseline = ReadinessBaseline::from_wellness(&history, 3);
    crate::assert_approx_eq!(baseline.resting_hr.unwrap(), 49.0, 1e-9);
    assert_eq!(baseline.hrv, Some(60.0));

    assert!(ReadinessBaseline::from_wellness(&[], 7).is_empty());
  }
}
