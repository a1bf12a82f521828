pub mod activity;
pub mod athlete;
pub mod checkin;
pub mod constraint;
pub mod fitness;
pub mod goal;
pub mod plan;
pub mod wellness;
pub mod workout;

pub use activity::{Activity, Sport};
pub use athlete::AthleteProfile;
pub use checkin::{DailyCheckIn, TravelStatus};
pub use constraint::{Constraint, ConstraintKind, ConstraintStatus, InjurySeverity};
pub use fitness::FitnessMetrics;
pub use goal::{Goal, GoalKind, GoalStatus, Priority};
pub use plan::{Phase, PlanStatus, TrainingPlan};
pub use wellness::WellnessData;
pub use workout::{Intensity, WorkoutDescriptor};
