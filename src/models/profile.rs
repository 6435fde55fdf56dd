use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Preferred time of day for workouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutTime {
  Morning,
  Afternoon,
  Evening,
}

impl WorkoutTime {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkoutTime::Morning => "Morning",
      WorkoutTime::Afternoon => "Afternoon",
      WorkoutTime::Evening => "Evening",
    }
  }
}

/// The user's profile, captured at onboarding and edited afterwards.
///
/// The host application stores a single profile per installation and
/// passes it into the core explicitly; nothing here is queried ambiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  pub age: i64,
  pub diet_type: String,
  /// Target training days, 1-7
  pub workout_days_per_week: i64,
  pub preferred_workout_time: WorkoutTime,
  pub major_workout_issues: Vec<String>,
  pub fitness_goals: Vec<String>,
  pub last_period_date: NaiveDate,
  /// Typically 21-35 days
  pub average_cycle_length: i64,
  pub onboarded: bool,
}
