use serde::{Deserialize, Serialize};

use super::activity::Sport;

/// Athlete identity plus optional physiological baselines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteProfile {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub primary_sport: Option<Sport>,
  #[serde(default)]
  pub ftp_watts: Option<u32>,
  /// Threshold run pace in seconds per km
  #[serde(default)]
  pub threshold_pace_seconds: Option<u32>,
  /// Critical swim speed in seconds per 100m
  #[serde(default)]
  pub css_seconds: Option<u32>,
  #[serde(default)]
  pub max_hr: Option<u32>,
  #[serde(default)]
  pub lthr: Option<u32>,
  #[serde(default)]
  pub weight_kg: Option<f64>,
}

impl AthleteProfile {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Get LTHR, falling back to 93% of max_hr if not set.
  /// The flag is true when the value is an estimate.
  pub fn effective_lthr(&self) -> Option<(u32, bool)> {
    self
      .lthr
      .map(|l| (l, false))
      .or_else(|| self.max_hr.map(|m| ((m as f64 * 0.93) as u32, true)))
  }

  pub fn has_baselines(&self) -> bool {
    self.ftp_watts.is_some()
      || self.threshold_pace_seconds.is_some()
      || self.css_seconds.is_some()
      || self.max_hr.is_some()
      || self.lthr.is_some()
      || self.weight_kg.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lthr_fallback() {
    let athlete = AthleteProfile {
      max_hr: Some(190),
      ..AthleteProfile::new("Sam")
    };

    // 190 * 0.93 = 176.7 -> 176
    assert_eq!(athlete.effective_lthr(), Some((176, true)));
  }

  #[test]
  fn test_explicit_lthr_wins() {
    let athlete = AthleteProfile {
      max_hr: Some(190),
      lthr: Some(170),
      ..AthleteProfile::new("Sam")
    };
    assert_eq!(athlete.effective_lthr(), Some((170, false)));
  }

  #[test]
  fn test_has_baselines() {
    assert!(!AthleteProfile::new("Sam").has_baselines());
    let athlete = AthleteProfile {
      weight_kg: Some(68.0),
      ..AthleteProfile::new("Sam")
    };
    assert!(athlete.has_baselines());
  }
}
