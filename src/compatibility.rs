//! Workout vs. constraint compatibility
//!
//! Checks a proposed workout against today's time and equipment, active
//! injuries and travel. Every check is independent; a check whose inputs are
//! missing is skipped.

use serde::{Deserialize, Serialize};

use crate::context::CoachingContext;
use crate::models::{ConstraintKind, DailyCheckIn, Sport, WorkoutDescriptor};

const HIGH_INTENSITY_TAG: &str = "high_intensity";
const IMPACT_TAG: &str = "impact";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintCompatibility {
  pub compatible: bool,
  pub issues: Vec<String>,
  pub modifications: Vec<String>,
}

/// Minimal equipment for a sport; any one item satisfies the check
pub fn required_equipment(sport: &Sport) -> &'static [&'static str] {
  match sport {
    Sport::Swim => &["pool", "goggles"],
    Sport::Bike => &["bike", "trainer"],
    Sport::Run => &["shoes"],
    Sport::Strength => &["gym", "weights"],
    Sport::Other(_) => &[],
  }
}

/// Facility a traveling athlete must confirm for the sport
fn travel_facility(sport: &Sport) -> Option<&'static str> {
  match sport {
    Sport::Swim => Some("pool"),
    Sport::Bike => Some("bike"),
    _ => None,
  }
}

impl ConstraintCompatibility {
  pub fn check(workout: &WorkoutDescriptor, context: &CoachingContext) -> Self {
    let mut issues = Vec::new();
    let mut modifications = Vec::new();

    if let Some(check_in) = &context.today_check_in {
      Self::check_time(workout, check_in, &mut issues, &mut modifications);
      Self::check_equipment(workout, check_in, &mut issues, &mut modifications);
    }

    Self::check_injuries(workout, context, &mut issues, &mut modifications);

    if let Some(check_in) = &context.today_check_in {
      Self::check_travel(workout, check_in, &mut issues, &mut modifications);
    }

    tracing::debug!(
      sport = workout.sport.as_str(),
      intensity = workout.intensity.as_str(),
      issues = issues.len(),
      "workout compatibility checked"
    );

    Self {
      compatible: issues.is_empty(),
      issues,
      modifications,
    }
  }

  fn check_time(
    workout: &WorkoutDescriptor,
    check_in: &DailyCheckIn,
    issues: &mut Vec<String>,
    modifications: &mut Vec<String>,
  ) {
    let Some(available) = check_in.available_time_minutes else { return };
    if workout.duration_minutes > available {
      issues.push(format!(
        "Workout is {} min but only {} min available today",
        workout.duration_minutes, available
      ));
      modifications.push(format!("Reduce to {} minutes", available));
    }
  }

  fn check_equipment(
    workout: &WorkoutDescriptor,
    check_in: &DailyCheckIn,
    issues: &mut Vec<String>,
    modifications: &mut Vec<String>,
  ) {
    let required = required_equipment(&workout.sport);
    if check_in.equipment_access.is_empty() || required.is_empty() {
      return;
    }

    if !required.iter().any(|item| check_in.has_equipment(item)) {
      issues.push(format!(
        "No {} equipment available (needs {})",
        workout.sport,
        required.join(" or ")
      ));
      modifications.push("Consider an alternative sport that fits the available equipment".to_string());
    }
  }

  fn check_injuries(
    workout: &WorkoutDescriptor,
    context: &CoachingContext,
    issues: &mut Vec<String>,
    modifications: &mut Vec<String>,
  ) {
    let sport = workout.sport.as_str();

    for constraint in context
      .active_constraints
      .iter()
      .filter(|c| c.is_active_at(context.generated_at))
    {
      let ConstraintKind::Injury { body_part, severity, .. } = &constraint.kind else {
        continue;
      };

      if constraint.restricts_sport(&workout.sport) {
        issues.push(format!(
          "{} {} injury restricts {}",
          severity.as_str(),
          body_part,
          sport
        ));
        modifications.push(format!("Avoid {} until the {} injury resolves", sport, body_part));
      }

      if constraint.restricts(HIGH_INTENSITY_TAG) && workout.intensity.is_high() {
        issues.push(format!(
          "{} {} injury restricts high-intensity work ({})",
          severity.as_str(),
          body_part,
          workout.intensity.as_str()
        ));
        modifications.push("Reduce intensity to moderate or below".to_string());
      }

      if constraint.restricts(IMPACT_TAG) && workout.sport == Sport::Run {
        issues.push(format!(
          "{} {} injury restricts impact activities such as running",
          severity.as_str(),
          body_part
        ));
        modifications.push("Consider swimming or cycling instead".to_string());
      }
    }
  }

  fn check_travel(
    workout: &WorkoutDescriptor,
    check_in: &DailyCheckIn,
    issues: &mut Vec<String>,
    modifications: &mut Vec<String>,
  ) {
    if !check_in.is_traveling() {
      return;
    }
    let Some(facility) = travel_facility(&workout.sport) else { return };

    if !check_in.has_equipment(facility) {
      issues.push(format!("Traveling: {} access not confirmed", facility));
      modifications.push(format!(
        "Confirm {} access at your destination or choose an alternative workout",
        facility
      ));
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
