use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStatus {
  Active,
  Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
  Mild,
  Moderate,
  Severe,
}

impl InjurySeverity {
  pub fn as_str(&self) -> &'static str {
    match self {
      InjurySeverity::Mild => "mild",
      InjurySeverity::Moderate => "moderate",
      InjurySeverity::Severe => "severe",
    }
  }
}

/// Variant-specific constraint payload, keyed by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKind {
  Injury {
    body_part: String,
    severity: InjurySeverity,
    /// Sports ("run", "bike", ...) or tags ("impact", "high_intensity")
    #[serde(default)]
    restrictions: Vec<String>,
  },
  Travel {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    available_equipment: Vec<String>,
  },
  Availability {
    #[serde(default)]
    hours_per_week: Option<f64>,
    #[serde(default)]
    available_days: Vec<String>,
  },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
  pub title: String,
  pub status: ConstraintStatus,
  pub start_date: NaiveDate,
  #[serde(default)]
  pub end_date: Option<NaiveDate>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(flatten)]
  pub kind: ConstraintKind,
}

impl Constraint {
  /// Active status, started on or before `today`, and not yet ended.
  /// An end date equal to `today` still counts as active.
  pub fn is_active_on(&self, today: NaiveDate) -> bool {
    self.status == ConstraintStatus::Active
      && self.start_date <= today
      && self.end_date.map_or(true, |end| end >= today)
  }

  pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
    self.is_active_on(now.date_naive())
  }

  /// Case-insensitive lookup in an injury's restriction list.
  /// Always false for non-injury constraints.
  pub fn restricts(&self, tag: &str) -> bool {
    match &self.kind {
      ConstraintKind::Injury { restrictions, .. } => {
        restrictions.iter().any(|r| r.trim().eq_ignore_ascii_case(tag))
      }
      _ => false,
    }
  }

  /// Whether an injury's restriction list names `sport`, by alias or by its
  /// own label for unrecognized sports
  pub fn restricts_sport(&self, sport: &Sport) -> bool {
    match &self.kind {
      ConstraintKind::Injury { restrictions, .. } => {
        restrictions.iter().any(|r| Sport::parse(r) == *sport)
      }
      _ => false,
    }
  }
}
