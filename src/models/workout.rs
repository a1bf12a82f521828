use serde::{Deserialize, Serialize};

use super::activity::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
  Recovery,
  Easy,
  Moderate,
  Tempo,
  Threshold,
  Vo2max,
  Sprint,
  #[serde(other)]
  Unknown,
}

impl Intensity {
  /// Threshold and above
  pub fn is_high(&self) -> bool {
    matches!(self, Intensity::Threshold | Intensity::Vo2max | Intensity::Sprint)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Intensity::Recovery => "recovery",
      Intensity::Easy => "easy",
      Intensity::Moderate => "moderate",
      Intensity::Tempo => "tempo",
      Intensity::Threshold => "threshold",
      Intensity::Vo2max => "vo2max",
      Intensity::Sprint => "sprint",
      Intensity::Unknown => "unknown",
    }
  }
}

/// A proposed workout to be checked against the athlete's constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDescriptor {
  pub sport: Sport,
  pub duration_minutes: u32,
  pub intensity: Intensity,
}

impl WorkoutDescriptor {
  pub fn new(sport: Sport, duration_minutes: u32, intensity: Intensity) -> Self {
    Self {
      sport,
      duration_minutes,
      intensity,
    }
  }
}
