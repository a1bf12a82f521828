use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rolling training-load numbers, computed upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessMetrics {
  /// Chronic Training Load: 42-day load average
  pub ctl: f64,
  /// Acute Training Load: 7-day load average
  pub atl: f64,
  /// Training Stress Balance: CTL - ATL (form)
  pub tsb: f64,
  /// Weekly CTL ramp in TSS/week
  #[serde(default)]
  pub ramp_rate: Option<f64>,
  #[serde(default)]
  pub date: Option<NaiveDate>,
}

impl FitnessMetrics {
  pub fn from_loads(ctl: f64, atl: f64) -> Self {
    Self {
      ctl,
      atl,
      tsb: ctl - atl,
      ramp_rate: None,
      date: None,
    }
  }

  pub fn with_ramp_rate(mut self, ramp_rate: f64) -> Self {
    self.ramp_rate = Some(ramp_rate);
    self
  }
}
