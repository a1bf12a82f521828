//! Goal, race and plan-phase resolution
//!
//! Temporal filters work at day granularity against `now.date_naive()`.
//! Inconsistent data (past race dates still marked active, gaps between
//! phases) is excluded from the filtered view rather than rejected.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Activity, Constraint, Goal, Phase, TrainingPlan, WellnessData};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
  (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// ---------------------------------------------------------------------------
/// Goals
/// ---------------------------------------------------------------------------

/// Active goals ordered A, B, C; input order is kept within a priority
pub fn active_goals(goals: &[Goal]) -> Vec<Goal> {
  let mut active: Vec<Goal> = goals.iter().filter(|g| g.is_active()).cloned().collect();
  active.sort_by_key(|g| g.priority);
  active
}

/// Earliest active race whose target date is today or later
pub fn next_race(goals: &[Goal], now: DateTime<Utc>) -> Option<&Goal> {
  let today = now.date_naive();
  goals
    .iter()
    .filter(|g| g.is_active() && g.is_race())
    .filter_map(|g| g.target_date.filter(|d| *d >= today).map(|d| (d, g)))
    .min_by_key(|(d, _)| *d)
    .map(|(_, g)| g)
}

/// Whole days until `target`, rounded up
pub fn days_until(target: NaiveDate, now: DateTime<Utc>) -> i64 {
  days_between(now, midnight_utc(target)).ceil() as i64
}

pub fn days_to_race(goal: &Goal, now: DateTime<Utc>) -> Option<i64> {
  goal.target_date.map(|d| days_until(d, now))
}

/// ---------------------------------------------------------------------------
/// Constraints
/// ---------------------------------------------------------------------------

pub fn active_constraints(constraints: &[Constraint], now: DateTime<Utc>) -> Vec<Constraint> {
  constraints
    .iter()
    .filter(|c| c.is_active_at(now))
    .cloned()
    .collect()
}

/// ---------------------------------------------------------------------------
/// Training Plan
/// ---------------------------------------------------------------------------

/// Where `now` falls in an active plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPosition {
  /// 1-indexed week of the plan
  pub week: u32,
  /// None when the week falls in a gap between phases
  pub phase: Option<Phase>,
}

/// 1-indexed plan week, or None when the plan is not active or `now` is
/// outside its date range
pub fn week_in_plan(plan: &TrainingPlan, now: DateTime<Utc>) -> Option<u32> {
  if !plan.is_active() || !plan.covers(now.date_naive()) {
    return None;
  }

  let days = days_between(midnight_utc(plan.start_date), now);
  // the first day of the plan counts as week 1
  Some(((days / 7.0).ceil() as u32).max(1))
}

pub fn plan_position(plan: &TrainingPlan, now: DateTime<Utc>) -> Option<PlanPosition> {
  let week = week_in_plan(plan, now)?;
  let phase = plan.phases.iter().find(|p| p.contains_week(week)).cloned();
  Some(PlanPosition { week, phase })
}

pub fn current_phase(plan: &TrainingPlan, now: DateTime<Utc>) -> Option<Phase> {
  plan_position(plan, now).and_then(|p| p.phase)
}

/// ---------------------------------------------------------------------------
/// History Ordering
/// ---------------------------------------------------------------------------

pub fn sort_activities(activities: &mut [Activity]) {
  activities.sort_by(|a, b| b.started_at.cmp(&a.started_at));
}

pub fn sort_wellness(history: &mut [WellnessData]) {
  history.sort_by(|a, b| b.date.cmp(&a.date));
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
