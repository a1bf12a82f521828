//! Coaching context aggregation and rendering
//!
//! Builds the one object handed to the language model as grounding data.
//! Filtering and ordering happen here; the readiness, fatigue and
//! compatibility evaluators are run separately by the caller.
//!
//! Rendering is pure formatting: numbers are rounded, paces and durations
//! are humanized, and every free-text field is truncated so the output stays
//! bounded no matter what the caller sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{fmt1, format_duration, format_pace, mean, truncate};
use crate::models::{
  Activity, AthleteProfile, Constraint, ConstraintKind, DailyCheckIn, FitnessMetrics, Goal,
  GoalKind, Phase, Sport, TrainingPlan, WellnessData,
};
use crate::policy::ContextLimits;
use crate::resolver;

/// ---------------------------------------------------------------------------
/// Inputs
/// ---------------------------------------------------------------------------

/// Raw caller-supplied entities, as fetched from storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextInputs {
  pub athlete: AthleteProfile,
  #[serde(default)]
  pub goals: Vec<Goal>,
  #[serde(default)]
  pub constraints: Vec<Constraint>,
  #[serde(default)]
  pub check_in: Option<DailyCheckIn>,
  #[serde(default)]
  pub activities: Vec<Activity>,
  #[serde(default)]
  pub wellness: Vec<WellnessData>,
  #[serde(default)]
  pub fitness: Option<FitnessMetrics>,
  #[serde(default)]
  pub plan: Option<TrainingPlan>,
}

/// ---------------------------------------------------------------------------
/// Aggregate
/// ---------------------------------------------------------------------------

/// Training plan with its resolved position at build time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanContext {
  pub plan: TrainingPlan,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_week: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_phase: Option<Phase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingContext {
  pub generated_at: DateTime<Utc>,
  pub athlete: AthleteProfile,
  /// Active goals, A before B before C
  pub active_goals: Vec<Goal>,
  pub active_constraints: Vec<Constraint>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub today_check_in: Option<DailyCheckIn>,
  /// Most recent first
  pub recent_activities: Vec<Activity>,
  /// Most recent first
  pub wellness_history: Vec<WellnessData>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fitness_metrics: Option<FitnessMetrics>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub training_plan: Option<PlanContext>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_race: Option<Goal>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub days_to_race: Option<i64>,
}

impl CoachingContext {
  /// Filter, order and resolve the raw inputs as of `now`
  pub fn build(inputs: ContextInputs, now: DateTime<Utc>) -> Self {
    let ContextInputs {
      athlete,
      goals,
      constraints,
      check_in,
      mut activities,
      mut wellness,
      fitness,
      plan,
    } = inputs;

    let active_goals = resolver::active_goals(&goals);
    let active_constraints = resolver::active_constraints(&constraints, now);

    let next_race = resolver::next_race(&goals, now).cloned();
    let days_to_race = next_race
      .as_ref()
      .and_then(|race| resolver::days_to_race(race, now));

    resolver::sort_activities(&mut activities);
    resolver::sort_wellness(&mut wellness);

    let training_plan = plan.map(|plan| {
      let position = resolver::plan_position(&plan, now);
      PlanContext {
        current_week: position.as_ref().map(|p| p.week),
        current_phase: position.and_then(|p| p.phase),
        plan,
      }
    });

    tracing::debug!(
      goals = active_goals.len(),
      constraints = active_constraints.len(),
      activities = activities.len(),
      wellness_days = wellness.len(),
      has_next_race = next_race.is_some(),
      "coaching context built"
    );

    Self {
      generated_at: now,
      athlete,
      active_goals,
      active_constraints,
      today_check_in: check_in,
      recent_activities: activities,
      wellness_history: wellness,
      fitness_metrics: fitness,
      training_plan,
      next_race,
      days_to_race,
    }
  }

  /// Rendered sections in fixed order, skipping any with no data
  pub fn sections(&self, limits: &ContextLimits) -> Vec<ContextSection> {
    let renderer = Renderer { limits };

    [
      (SectionKind::AthleteProfile, renderer.athlete(&self.athlete)),
      (SectionKind::Goals, renderer.goals(self)),
      (SectionKind::Constraints, renderer.constraints(&self.active_constraints)),
      (SectionKind::TrainingPlan, self.training_plan.as_ref().map(|p| renderer.plan(p)).unwrap_or_default()),
      (SectionKind::FitnessMetrics, self.fitness_metrics.as_ref().map(|m| renderer.fitness(m)).unwrap_or_default()),
      (SectionKind::RecentActivities, renderer.activities(&self.recent_activities)),
      (SectionKind::WellnessTrend, renderer.wellness(&self.wellness_history)),
      (SectionKind::TodayCheckIn, self.today_check_in.as_ref().map(|c| renderer.check_in(c)).unwrap_or_default()),
    ]
    .into_iter()
    .filter(|(_, lines)| !lines.is_empty())
    .map(|(kind, lines)| ContextSection {
      kind,
      body: lines.join("\n"),
    })
    .collect()
  }

  /// Serialize the sections into the text block embedded in the prompt
  pub fn render(&self, limits: &ContextLimits) -> String {
    self
      .sections(limits)
      .iter()
      .map(ContextSection::to_text)
      .collect::<Vec<_>>()
      .join("\n\n")
  }

  /// Structured form, for callers that prefer JSON grounding
  pub fn to_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}

/// ---------------------------------------------------------------------------
/// Sections
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
  AthleteProfile,
  Goals,
  Constraints,
  TrainingPlan,
  FitnessMetrics,
  RecentActivities,
  WellnessTrend,
  TodayCheckIn,
}

impl SectionKind {
  pub fn title(&self) -> &'static str {
    match self {
      SectionKind::AthleteProfile => "Athlete Profile",
      SectionKind::Goals => "Goals",
      SectionKind::Constraints => "Active Constraints",
      SectionKind::TrainingPlan => "Training Plan",
      SectionKind::FitnessMetrics => "Fitness Metrics",
      SectionKind::RecentActivities => "Recent Activities",
      SectionKind::WellnessTrend => "Wellness Trend",
      SectionKind::TodayCheckIn => "Today's Check-in",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSection {
  pub kind: SectionKind,
  pub body: String,
}

impl ContextSection {
  pub fn to_text(&self) -> String {
    format!("## {}\n{}", self.kind.title(), self.body)
  }
}

/// ---------------------------------------------------------------------------
/// Rendering
/// ---------------------------------------------------------------------------

struct Renderer<'a> {
  limits: &'a ContextLimits,
}

impl Renderer<'_> {
  fn text(&self, value: &str) -> String {
    truncate(value, self.limits.max_text_len)
  }

  fn list(&self, values: &[String]) -> String {
    values.iter().map(|v| self.text(v)).collect::<Vec<_>>().join(", ")
  }

  fn athlete(&self, athlete: &AthleteProfile) -> Vec<String> {
    let mut lines = vec![format!("Name: {}", self.text(&athlete.name))];

    if let Some(sport) = &athlete.primary_sport {
      lines.push(format!("Primary sport: {}", sport));
    }
    if let Some(ftp) = athlete.ftp_watts {
      lines.push(format!("FTP: {} W", ftp));
    }
    if let Some(pace) = athlete.threshold_pace_seconds {
      lines.push(format!("Threshold pace: {}/km", format_pace(pace as f64)));
    }
    if let Some(css) = athlete.css_seconds {
      lines.push(format!("CSS: {}/100m", format_pace(css as f64)));
    }
    if let Some(max_hr) = athlete.max_hr {
      lines.push(format!("Max HR: {} bpm", max_hr));
    }
    match athlete.effective_lthr() {
      Some((lthr, true)) => lines.push(format!("LTHR: {} bpm (estimated from max HR)", lthr)),
      Some((lthr, false)) => lines.push(format!("LTHR: {} bpm", lthr)),
      None => {}
    }
    if let Some(weight) = athlete.weight_kg {
      lines.push(format!("Weight: {} kg", fmt1(weight)));
    }
    if !athlete.has_baselines() {
      lines.push("Thresholds: none recorded".to_string());
    }

    lines
  }

  fn goals(&self, context: &CoachingContext) -> Vec<String> {
    let mut lines = Vec::new();

    for goal in &context.active_goals {
      let mut details = Vec::new();
      if let Some(date) = goal.target_date {
        details.push(format!("target date {}", date));
      }
      match &goal.kind {
        GoalKind::Race {
          distance,
          target_time_seconds,
        } => {
          if let Some(distance) = distance {
            details.push(format!("distance {}", self.text(distance)));
          }
          if let Some(secs) = target_time_seconds {
            details.push(format!("target time {}", format_duration(*secs)));
          }
        }
        GoalKind::Performance {
          metric,
          target_value,
        } => {
          if let Some(metric) = metric {
            details.push(format!("metric {}", self.text(metric)));
          }
          if let Some(value) = target_value {
            details.push(format!("target {}", fmt1(*value)));
          }
        }
        GoalKind::Fitness | GoalKind::Health => {}
      }

      let mut line = format!(
        "- [{}] {} ({})",
        goal.priority.as_str(),
        self.text(&goal.title),
        goal.kind.label()
      );
      if !details.is_empty() {
        line.push_str(&format!(": {}", details.join("; ")));
      }
      lines.push(line);

      if let Some(description) = &goal.description {
        lines.push(format!("  {}", self.text(description)));
      }
    }

    if let (Some(race), Some(days)) = (&context.next_race, context.days_to_race) {
      lines.push(format!(
        "Next race: {} in {} days",
        self.text(&race.title),
        days
      ));
    }

    lines
  }

  fn constraints(&self, constraints: &[Constraint]) -> Vec<String> {
    let mut lines = Vec::new();

    for c in constraints {
      let period = match c.end_date {
        Some(end) => format!("{} to {}", c.start_date, end),
        None => format!("since {}", c.start_date),
      };

      let line = match &c.kind {
        ConstraintKind::Injury {
          body_part,
          severity,
          restrictions,
        } => {
          let mut line = format!(
            "- Injury: {} ({}, {}), {}",
            self.text(&c.title),
            self.text(body_part),
            severity.as_str(),
            period
          );
          if !restrictions.is_empty() {
            line.push_str(&format!("; avoid: {}", self.list(restrictions)));
          }
          line
        }
        ConstraintKind::Travel {
          destination,
          available_equipment,
        } => {
          let mut line = format!("- Travel: {}", self.text(&c.title));
          if let Some(destination) = destination {
            line.push_str(&format!(" to {}", self.text(destination)));
          }
          line.push_str(&format!(", {}", period));
          if !available_equipment.is_empty() {
            line.push_str(&format!("; equipment: {}", self.list(available_equipment)));
          }
          line
        }
        ConstraintKind::Availability {
          hours_per_week,
          available_days,
        } => {
          let mut line = format!("- Availability: {}, {}", self.text(&c.title), period);
          if let Some(hours) = hours_per_week {
            line.push_str(&format!("; {} h/week", fmt1(*hours)));
          }
          if !available_days.is_empty() {
            line.push_str(&format!("; days: {}", self.list(available_days)));
          }
          line
        }
      };
      lines.push(line);

      if let Some(description) = &c.description {
        lines.push(format!("  {}", self.text(description)));
      }
    }

    lines
  }

  fn plan(&self, context: &PlanContext) -> Vec<String> {
    let plan = &context.plan;
    let mut lines = vec![
      format!("Plan: {} ({})", self.text(&plan.name), plan.status.as_str()),
      format!(
        "Dates: {} to {} ({} weeks)",
        plan.start_date,
        plan.end_date,
        plan.total_weeks()
      ),
    ];

    if let Some(week) = context.current_week {
      lines.push(format!("Current week: {} of {}", week, plan.total_weeks()));
      match &context.current_phase {
        Some(phase) => {
          let mut line = format!(
            "Current phase: {} (weeks {}-{})",
            self.text(&phase.name),
            phase.start_week,
            phase.end_week
          );
          if let Some(focus) = &phase.focus {
            line.push_str(&format!(", focus: {}", self.text(focus)));
          }
          lines.push(line);
        }
        None => lines.push("Current phase: none scheduled this week".to_string()),
      }
    }

    if !plan.phases.is_empty() {
      let phases = plan
        .phases
        .iter()
        .map(|p| format!("{} ({}-{})", self.text(&p.name), p.start_week, p.end_week))
        .collect::<Vec<_>>()
        .join(", ");
      lines.push(format!("Phases: {}", phases));
    }

    lines
  }

  fn fitness(&self, metrics: &FitnessMetrics) -> Vec<String> {
    let mut lines = vec![
      format!("CTL (fitness): {}", fmt1(metrics.ctl)),
      format!("ATL (fatigue): {}", fmt1(metrics.atl)),
      format!("TSB (form): {}", fmt1(metrics.tsb)),
    ];
    if let Some(ramp) = metrics.ramp_rate {
      lines.push(format!("Ramp rate: {} TSS/week", fmt1(ramp)));
    }
    lines
  }

  fn activities(&self, activities: &[Activity]) -> Vec<String> {
    let mut lines = Vec::new();

    for a in activities.iter().take(self.limits.max_activities) {
      let mut parts = vec![format!(
        "- {} {}: {}",
        a.started_at.format("%Y-%m-%d"),
        a.sport,
        self.text(&a.title)
      )];

      if let Some(secs) = a.duration_seconds {
        parts.push(format_duration(secs));
      }
      if let Some(meters) = a.distance_meters {
        parts.push(format!("{} km", fmt1(meters / 1000.0)));
      }
      if let Some(pace) = a.pace_seconds() {
        let unit = if a.sport == Sport::Swim { "/100m" } else { "/km" };
        parts.push(format!("pace {}{}", format_pace(pace), unit));
      }
      if let Some(hr) = a.average_hr {
        parts.push(format!("avg HR {}", hr));
      }
      if let Some(watts) = a.average_watts {
        parts.push(format!("avg {} W", watts.round()));
      }
      if let Some(tss) = a.tss {
        parts.push(format!("TSS {}", fmt1(tss)));
      }
      lines.push(parts.join(" | "));

      if let Some(description) = &a.description {
        lines.push(format!("  {}", self.text(description)));
      }
    }

    lines
  }

  fn wellness(&self, history: &[WellnessData]) -> Vec<String> {
    let recent: Vec<&WellnessData> = history.iter().take(self.limits.max_wellness_days).collect();
    let mut lines = Vec::new();

    for w in &recent {
      let mut parts = Vec::new();
      if let Some(hours) = w.sleep_hours {
        parts.push(format!("sleep {}h", fmt1(hours)));
      }
      if let Some(quality) = w.sleep_quality {
        parts.push(format!("sleep quality {}/10", quality));
      }
      if let Some(hrv) = w.hrv {
        parts.push(format!("HRV {}", fmt1(hrv)));
      }
      if let Some(hr) = w.resting_hr {
        parts.push(format!("RHR {}", hr));
      }
      if let Some(energy) = w.energy {
        parts.push(format!("energy {}/10", energy));
      }
      if let Some(stress) = w.stress {
        parts.push(format!("stress {}/10", stress));
      }
      if let Some(soreness) = w.soreness {
        parts.push(format!("soreness {}/10", soreness));
      }
      if !parts.is_empty() {
        lines.push(format!("- {}: {}", w.date, parts.join(", ")));
      }
    }

    if lines.is_empty() {
      return lines;
    }

    let averages: Vec<String> = [
      ("sleep", mean(recent.iter().filter_map(|w| w.sleep_hours)), "h"),
      ("HRV", mean(recent.iter().filter_map(|w| w.hrv)), ""),
      ("RHR", mean(recent.iter().filter_map(|w| w.resting_hr.map(f64::from))), ""),
    ]
    .into_iter()
    .filter_map(|(label, value, unit)| value.map(|v| format!("{} {}{}", label, fmt1(v), unit)))
    .collect();

    if !averages.is_empty() {
      lines.push(format!("Average: {}", averages.join(", ")));
    }

    lines
  }

  fn check_in(&self, c: &DailyCheckIn) -> Vec<String> {
    let mut lines = Vec::new();

    match (c.sleep_hours, c.sleep_quality) {
      (Some(hours), Some(quality)) => {
        lines.push(format!("Sleep: {}h (quality {}/10)", fmt1(hours), quality))
      }
      (Some(hours), None) => lines.push(format!("Sleep: {}h", fmt1(hours))),
      (None, Some(quality)) => lines.push(format!("Sleep quality: {}/10", quality)),
      (None, None) => {}
    }
    if let Some(energy) = c.energy {
      lines.push(format!("Energy: {}/10", energy));
    }
    if let Some(stress) = c.stress {
      lines.push(format!("Stress: {}/10", stress));
    }
    if let Some(soreness) = c.soreness {
      lines.push(format!("Soreness: {}/10", soreness));
    }
    if let Some(hr) = c.resting_hr {
      lines.push(format!("Resting HR: {} bpm", hr));
    }
    if let Some(hrv) = c.hrv {
      lines.push(format!("HRV: {}", fmt1(hrv)));
    }
    if let Some(minutes) = c.available_time_minutes {
      lines.push(format!("Available time: {} min", minutes));
    }
    if !c.equipment_access.is_empty() {
      lines.push(format!("Equipment: {}", self.list(&c.equipment_access)));
    }
    if c.is_traveling() {
      lines.push("Travel status: traveling".to_string());
    }
    if let Some(notes) = &c.notes {
      lines.push(format!("Notes: {}", self.text(notes)));
    }

    lines
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
