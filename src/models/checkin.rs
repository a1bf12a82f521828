use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStatus {
  #[default]
  Home,
  #[serde(alias = "travelling")]
  Traveling,
  #[serde(other)]
  Unknown,
}

/// Today's wellness snapshot. Every field is optional; absent fields are
/// simply not scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyCheckIn {
  #[serde(default)]
  pub date: Option<NaiveDate>,
  /// 1-10
  #[serde(default)]
  pub sleep_quality: Option<u8>,
  #[serde(default)]
  pub sleep_hours: Option<f64>,
  /// 1-10
  #[serde(default)]
  pub energy: Option<u8>,
  /// 1-10
  #[serde(default)]
  pub stress: Option<u8>,
  /// 1-10, overall soreness
  #[serde(default)]
  pub soreness: Option<u8>,
  #[serde(default)]
  pub resting_hr: Option<u32>,
  #[serde(default)]
  pub hrv: Option<f64>,
  #[serde(default)]
  pub available_time_minutes: Option<u32>,
  #[serde(default)]
  pub equipment_access: Vec<String>,
  #[serde(default)]
  pub travel_status: Option<TravelStatus>,
  #[serde(default)]
  pub notes: Option<String>,
}

impl DailyCheckIn {
  pub fn is_traveling(&self) -> bool {
    self.travel_status == Some(TravelStatus::Traveling)
  }

  /// Case-insensitive substring match against the declared equipment list
  pub fn has_equipment(&self, item: &str) -> bool {
    let item = item.to_lowercase();
    self
      .equipment_access
      .iter()
      .map(|e| e.to_lowercase())
      .any(|e| e.contains(&item) || (!e.is_empty() && item.contains(&e)))
  }
}
