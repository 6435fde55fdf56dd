use crate::cycle::CyclePhase;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Shared Enums
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
  Beginner,
  Moderate,
  Advanced,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Beginner => "Beginner",
      Difficulty::Moderate => "Moderate",
      Difficulty::Advanced => "Advanced",
    }
  }

  /// Case-insensitive parse used by the lenient response decoder
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "beginner" | "easy" => Some(Difficulty::Beginner),
      "moderate" | "intermediate" | "medium" => Some(Difficulty::Moderate),
      "advanced" | "hard" => Some(Difficulty::Advanced),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
  Breakfast,
  Lunch,
  Dinner,
  Snack,
}

impl MealType {
  pub fn as_str(&self) -> &'static str {
    match self {
      MealType::Breakfast => "Breakfast",
      MealType::Lunch => "Lunch",
      MealType::Dinner => "Dinner",
      MealType::Snack => "Snack",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "breakfast" => Some(MealType::Breakfast),
      "lunch" => Some(MealType::Lunch),
      "dinner" => Some(MealType::Dinner),
      "snack" => Some(MealType::Snack),
      _ => None,
    }
  }
}

/// Macro nutrient summary in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSummary {
  pub protein_grams: i64,
  pub carbs_grams: i64,
  pub fat_grams: i64,
}

/// ---------------------------------------------------------------------------
/// Workout Plans
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
  pub name: String,
  pub sets: i64,
  /// Rep range as text, e.g. "10-12"
  pub reps: String,
  /// For time-based movements (planks, holds)
  pub duration_seconds: Option<i64>,
  pub rest_seconds: i64,
  pub instructions: String,
  pub target_muscles: Vec<String>,
  pub equipment: Vec<String>,
  pub difficulty: Difficulty,
  pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
  pub title: String,
  pub exercises: Vec<Exercise>,
  pub duration_minutes: i64,
  pub difficulty: Difficulty,
  pub cycle_phase: CyclePhase,
  pub ai_generated: bool,
  pub created_at: DateTime<Utc>,
  pub scheduled: bool,
  pub scheduled_for: Option<NaiveDate>,
  pub tags: Vec<String>,
  pub description: String,
}

impl WorkoutPlan {
  /// Schedule the plan for a date. Keeps the invariant that a scheduling
  /// date implies the scheduled flag.
  pub fn schedule_for(&mut self, date: NaiveDate) {
    self.scheduled = true;
    self.scheduled_for = Some(date);
  }

  pub fn unschedule(&mut self) {
    self.scheduled = false;
    self.scheduled_for = None;
  }
}

/// ---------------------------------------------------------------------------
/// Meal Plans
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
  pub name: String,
  pub meal_type: MealType,
  pub ingredients: Vec<String>,
  pub instructions: String,
  pub prep_minutes: i64,
  pub cook_minutes: i64,
  pub servings: i64,
  pub calories: i64,
  pub macros: MacroSummary,
  pub allergens: Vec<String>,
  pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
  pub title: String,
  pub meals: Vec<Meal>,
  pub total_calories: i64,
  pub macros: MacroSummary,
  pub cycle_phase: CyclePhase,
  pub ai_generated: bool,
  pub created_at: DateTime<Utc>,
  pub scheduled: bool,
  pub scheduled_for: Option<NaiveDate>,
  pub tags: Vec<String>,
  pub description: String,
  pub nutritional_focus: Vec<String>,
}

impl MealPlan {
  pub fn schedule_for(&mut self, date: NaiveDate) {
    self.scheduled = true;
    self.scheduled_for = Some(date);
  }

  pub fn unschedule(&mut self) {
    self.scheduled = false;
    self.scheduled_for = None;
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
