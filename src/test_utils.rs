//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - A fixed reference clock
//! - Helper assertions

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::context::{CoachingContext, ContextInputs};
use crate::models::{
  Activity, AthleteProfile, Constraint, ConstraintKind, ConstraintStatus, DailyCheckIn, Goal,
  GoalKind, GoalStatus, InjurySeverity, Phase, PlanStatus, Priority, Sport, TrainingPlan,
  WellnessData,
};

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Midnight UTC on the given day
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date(year, month, day).and_time(NaiveTime::default()))
}

/// Fixed "now" shared by the factories: 2026-02-10 00:00 UTC
pub fn reference_now() -> DateTime<Utc> {
  at(2026, 2, 10)
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_athlete() -> AthleteProfile {
  AthleteProfile {
    primary_sport: Some(Sport::Run),
    max_hr: Some(190),
    ..AthleteProfile::new("Sam")
  }
}

/// Activity started at 07:00 UTC `days_ago` days before the reference time
pub fn mock_activity(sport: Sport, days_ago: i64) -> Activity {
  Activity {
    started_at: reference_now() - Duration::days(days_ago) + Duration::hours(7),
    title: format!("Morning {}", sport),
    sport,
    description: None,
    duration_seconds: Some(3600),
    distance_meters: None,
    average_hr: Some(142),
    average_watts: None,
    tss: Some(50.0),
  }
}

pub fn mock_wellness(days_ago: i64) -> WellnessData {
  WellnessData {
    sleep_hours: Some(7.5),
    hrv: Some(60.0),
    resting_hr: Some(48),
    ..WellnessData::empty(reference_now().date_naive() - Duration::days(days_ago))
  }
}

/// Active, undated fitness goal
pub fn mock_goal(title: &str, priority: Priority) -> Goal {
  Goal {
    title: title.to_string(),
    priority,
    status: GoalStatus::Active,
    target_date: None,
    description: None,
    kind: GoalKind::Fitness,
  }
}

/// Active A-priority marathon on `target_date`
pub fn mock_race(title: &str, target_date: NaiveDate) -> Goal {
  Goal {
    title: title.to_string(),
    priority: Priority::A,
    status: GoalStatus::Active,
    target_date: Some(target_date),
    description: None,
    kind: GoalKind::Race {
      distance: Some("42.2 km".to_string()),
      target_time_seconds: Some(12_600),
    },
  }
}

/// Active, open-ended moderate Achilles injury starting 2026-01-20
pub fn mock_injury(restrictions: &[&str]) -> Constraint {
  Constraint {
    title: "Sore Achilles".to_string(),
    status: ConstraintStatus::Active,
    start_date: date(2026, 1, 20),
    end_date: None,
    description: None,
    kind: ConstraintKind::Injury {
      body_part: "achilles".to_string(),
      severity: InjurySeverity::Moderate,
      restrictions: restrictions.iter().map(|r| r.to_string()).collect(),
    },
  }
}

/// Active 16-week plan: Base weeks 1-8, Build weeks 9-16
pub fn mock_plan(start_date: NaiveDate) -> TrainingPlan {
  TrainingPlan {
    name: "Spring Marathon Build".to_string(),
    start_date,
    end_date: start_date + Duration::days(111),
    phases: vec![
      Phase {
        name: "Base".to_string(),
        start_week: 1,
        end_week: 8,
        focus: Some("aerobic volume".to_string()),
      },
      Phase {
        name: "Build".to_string(),
        start_week: 9,
        end_week: 16,
        focus: Some("threshold".to_string()),
      },
    ],
    status: PlanStatus::Active,
    description: None,
  }
}

/// Reasonable morning check-in with no time, equipment or travel limits
pub fn mock_check_in() -> DailyCheckIn {
  DailyCheckIn {
    date: Some(reference_now().date_naive()),
    sleep_quality: Some(8),
    sleep_hours: Some(7.5),
    energy: Some(7),
    stress: Some(3),
    soreness: Some(2),
    ..DailyCheckIn::default()
  }
}

/// Inputs with only an athlete
pub fn mock_inputs() -> ContextInputs {
  ContextInputs {
    athlete: mock_athlete(),
    ..ContextInputs::default()
  }
}

/// Context built at the reference time with today's check-in and nothing else
pub fn mock_context() -> CoachingContext {
  let inputs = ContextInputs {
    check_in: Some(mock_check_in()),
    ..mock_inputs()
  };
  CoachingContext::build(inputs, reference_now())
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_factories_create_valid_data() {
    assert!(mock_goal("Base", Priority::B).is_active());
    assert!(mock_race("Marathon", date(2026, 3, 1)).is_race());
    assert!(mock_injury(&["run"]).is_active_at(reference_now()));
    assert_eq!(mock_plan(date(2026, 1, 1)).total_weeks(), 16);

    let context = mock_context();
    assert!(context.today_check_in.is_some());
    assert!(context.active_constraints.is_empty());
  }

  #[test]
  fn test_time_helpers_are_fixed() {
    let activity = mock_activity(Sport::Run, 7);
    let diff = reference_now() - activity.started_at;
    assert_eq!(diff.num_hours(), 7 * 24 - 7);
    assert_eq!(mock_wellness(1).date, date(2026, 2, 9));
  }
}
