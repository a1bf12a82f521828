use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
  Active,
  Paused,
  Completed,
  Cancelled,
}

impl PlanStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      PlanStatus::Active => "active",
      PlanStatus::Paused => "paused",
      PlanStatus::Completed => "completed",
      PlanStatus::Cancelled => "cancelled",
    }
  }
}

/// Periodization block covering an inclusive, 1-indexed week range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
  pub name: String,
  pub start_week: u32,
  pub end_week: u32,
  #[serde(default)]
  pub focus: Option<String>,
}

impl Phase {
  pub fn contains_week(&self, week: u32) -> bool {
    self.start_week <= week && week <= self.end_week
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
  pub name: String,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  #[serde(default)]
  pub phases: Vec<Phase>,
  pub status: PlanStatus,
  #[serde(default)]
  pub description: Option<String>,
}

impl TrainingPlan {
  pub fn is_active(&self) -> bool {
    self.status == PlanStatus::Active
  }

  pub fn covers(&self, today: NaiveDate) -> bool {
    self.start_date <= today && today <= self.end_date
  }

  pub fn total_weeks(&self) -> u32 {
    let days = (self.end_date - self.start_date).num_days().max(0) as f64;
    ((days + 1.0) / 7.0).ceil() as u32
  }
}
