use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
  A,
  B,
  C,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Priority::A => "A",
      Priority::B => "B",
      Priority::C => "C",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
  Active,
  Completed,
  Cancelled,
}

/// Variant-specific goal payload, keyed by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
  Race {
    #[serde(default)]
    distance: Option<String>,
    #[serde(default)]
    target_time_seconds: Option<u32>,
  },
  Performance {
    #[serde(default)]
    metric: Option<String>,
    #[serde(default)]
    target_value: Option<f64>,
  },
  Fitness,
  Health,
}

impl GoalKind {
  pub fn label(&self) -> &'static str {
    match self {
      GoalKind::Race { .. } => "race",
      GoalKind::Performance { .. } => "performance",
      GoalKind::Fitness => "fitness",
      GoalKind::Health => "health",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
  pub title: String,
  pub priority: Priority,
  pub status: GoalStatus,
  #[serde(default)]
  pub target_date: Option<NaiveDate>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(flatten)]
  pub kind: GoalKind,
}

impl Goal {
  pub fn is_active(&self) -> bool {
    self.status == GoalStatus::Active
  }

  pub fn is_race(&self) -> bool {
    matches!(self.kind, GoalKind::Race { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_race_goal_wire_format() {
    let json = r#"{
      "type": "race",
      "title": "Spring Marathon",
      "priority": "A",
      "status": "active",
      "target_date": "2026-03-01",
      "distance": "42.2 km",
      "target_time_seconds": 12600
    }"#;

    let goal: Goal = serde_json::from_str(json).unwrap();
    assert!(goal.is_race());
    assert!(goal.is_active());
    assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    assert_eq!(
      goal.kind,
      GoalKind::Race {
        distance: Some("42.2 km".to_string()),
        target_time_seconds: Some(12600),
      }
    );
  }

  #[test]
  fn test_unit_variant_goal() {
    let json = r#"{"type": "health", "title": "Sleep more", "priority": "C", "status": "completed"}"#;
    let goal: Goal = serde_json::from_str(json).unwrap();
    assert_eq!(goal.kind, GoalKind::Health);
    assert!(!goal.is_active());
    assert!(goal.target_date.is_none());
  }

  #[test]
  fn test_priority_ordering() {
    assert!(Priority::A < Priority::B);
    assert!(Priority::B < Priority::C);
  }
}
