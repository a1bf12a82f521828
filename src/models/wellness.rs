use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of historical wellness data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessData {
  pub date: NaiveDate,
  #[serde(default)]
  pub sleep_hours: Option<f64>,
  #[serde(default)]
  pub sleep_quality: Option<u8>,
  #[serde(default)]
  pub hrv: Option<f64>,
  #[serde(default)]
  pub resting_hr: Option<u32>,
  #[serde(default)]
  pub energy: Option<u8>,
  #[serde(default)]
  pub stress: Option<u8>,
  #[serde(default)]
  pub soreness: Option<u8>,
}

impl WellnessData {
  pub fn empty(date: NaiveDate) -> Self {
    Self {
      date,
      sleep_hours: None,
      sleep_quality: None,
      hrv: None,
      resting_hr: None,
      energy: None,
      stress: None,
      soreness: None,
    }
  }
}
