use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sport label. Unrecognized labels are kept verbatim (lowercased) so they
/// can still be matched against injury restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sport {
  Swim,
  Bike,
  Run,
  Strength,
  Other(String),
}

impl Sport {
  /// Parse a label, accepting common aliases ("ride", "cycling", "running", ...)
  pub fn parse(label: &str) -> Self {
    let label = label.trim().to_lowercase();
    match label.as_str() {
      "swim" | "swimming" => Sport::Swim,
      "bike" | "ride" | "cycling" | "biking" => Sport::Bike,
      "run" | "running" => Sport::Run,
      "strength" => Sport::Strength,
      _ => Sport::Other(label),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Sport::Swim => "swim",
      Sport::Bike => "bike",
      Sport::Run => "run",
      Sport::Strength => "strength",
      Sport::Other(label) => label,
    }
  }
}

impl From<String> for Sport {
  fn from(label: String) -> Self {
    Sport::parse(&label)
  }
}

impl From<Sport> for String {
  fn from(sport: Sport) -> Self {
    sport.as_str().to_string()
  }
}

impl std::fmt::Display for Sport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A completed activity as recorded upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub started_at: DateTime<Utc>,
  pub sport: Sport,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub duration_seconds: Option<u32>,
  #[serde(default)]
  pub distance_meters: Option<f64>,
  #[serde(default)]
  pub average_hr: Option<u32>,
  #[serde(default)]
  pub average_watts: Option<f64>,
  #[serde(default)]
  pub tss: Option<f64>,
}

impl Activity {
  /// Pace in seconds per km (run) or per 100m (swim); None for other sports
  pub fn pace_seconds(&self) -> Option<f64> {
    let duration = self.duration_seconds? as f64;
    let distance = self.distance_meters.filter(|d| *d > 0.0)?;

    match &self.sport {
      Sport::Run => Some(duration / (distance / 1000.0)),
      Sport::Swim => Some(duration / (distance / 100.0)),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_activity;

  #[test]
  fn test_sport_aliases_and_unknowns() {
    let ride: Sport = serde_json::from_str("\"ride\"").unwrap();
    assert_eq!(ride, Sport::Bike);

    let yoga: Sport = serde_json::from_str("\"Yoga\"").unwrap();
    assert_eq!(yoga, Sport::Other("yoga".to_string()));
    assert_eq!(serde_json::to_string(&yoga).unwrap(), "\"yoga\"");
    assert_eq!(serde_json::to_string(&Sport::Bike).unwrap(), "\"bike\"");
  }

  #[test]
  fn test_run_pace() {
    // 44 minutes over 8 km = 330 s/km
    let mut activity = mock_activity(Sport::Run, 0);
    activity.duration_seconds = Some(2640);
    activity.distance_meters = Some(8000.0);
    assert_eq!(activity.pace_seconds(), Some(330.0));
  }

  #[test]
  fn test_swim_pace_is_per_100m() {
    let mut activity = mock_activity(Sport::Swim, 0);
    activity.duration_seconds = Some(1800);
    activity.distance_meters = Some(1500.0);
    assert_eq!(activity.pace_seconds(), Some(120.0));
  }

  #[test]
  fn test_no_pace_for_bike_or_zero_distance() {
    let bike = mock_activity(Sport::Bike, 0);
    assert!(bike.pace_seconds().is_none());

    let mut run = mock_activity(Sport::Run, 0);
    run.distance_meters = Some(0.0);
    assert!(run.pace_seconds().is_none());
  }
}
