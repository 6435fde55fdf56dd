//! Generation pipeline: phase -> prompt -> completion -> typed plan
//!
//! Each method is an independent future the caller owns; dropping it
//! cancels the in-flight request. Requests share nothing mutable, so
//! workout and meal-plan generation can run concurrently.

use crate::cycle::{self, CyclePhase};
use crate::llm::{GenerationClient, GenerationError};
use crate::models::{JournalEntry, MealPlan, UserProfile, WorkoutPlan};
use crate::parser::{self, ParseReport};
use crate::prompts;
use chrono::{Local, NaiveDate};
use tracing::debug;

pub struct PlanGenerator {
  client: GenerationClient,
}

impl PlanGenerator {
  pub fn new(client: GenerationClient) -> Self {
    Self { client }
  }

  /// Convenience constructor reading the API credential from the environment
  pub fn from_env() -> Result<Self, GenerationError> {
    Ok(Self::new(GenerationClient::from_env()?))
  }

  /// Generate a workout plan for the user's current cycle phase.
  ///
  /// `entries` must be newest-first. Transport and API failures surface
  /// as errors; an unusable reply degrades to the phase fallback and is
  /// visible in the report, never an error.
  pub async fn generate_workout(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
  ) -> Result<(WorkoutPlan, ParseReport), GenerationError> {
    self
      .generate_workout_for_date(profile, entries, Local::now().date_naive())
      .await
  }

  /// Date-explicit variant for deterministic callers and tests
  pub async fn generate_workout_for_date(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
    today: NaiveDate,
  ) -> Result<(WorkoutPlan, ParseReport), GenerationError> {
    let (phase, cycle_day) = self.phase_for(profile, today);
    debug!(phase = phase.as_str(), cycle_day, "generating workout");

    let prompt = prompts::build_workout_prompt(phase, profile, entries);
    let reply = self
      .client
      .complete(prompts::WORKOUT_SYSTEM_PROMPT, &prompt)
      .await?;

    Ok(parser::parse_workout(&reply, phase))
  }

  /// Generate a one-day meal plan for the user's current cycle phase.
  pub async fn generate_meal_plan(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
  ) -> Result<(MealPlan, ParseReport), GenerationError> {
    self
      .generate_meal_plan_for_date(profile, entries, Local::now().date_naive())
      .await
  }

  pub async fn generate_meal_plan_for_date(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
    today: NaiveDate,
  ) -> Result<(MealPlan, ParseReport), GenerationError> {
    let (phase, cycle_day) = self.phase_for(profile, today);
    debug!(phase = phase.as_str(), cycle_day, "generating meal plan");

    let prompt = prompts::build_meal_plan_prompt(phase, profile, entries);
    let reply = self
      .client
      .complete(prompts::NUTRITION_SYSTEM_PROMPT, &prompt)
      .await?;

    Ok(parser::parse_meal_plan(&reply, phase))
  }

  /// Generate a free-text reflection over the recent journal window.
  /// Insights are prose, not a typed record, so the reply passes through.
  pub async fn generate_insight(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
  ) -> Result<String, GenerationError> {
    self
      .generate_insight_for_date(profile, entries, Local::now().date_naive())
      .await
  }

  pub async fn generate_insight_for_date(
    &self,
    profile: &UserProfile,
    entries: &[JournalEntry],
    today: NaiveDate,
  ) -> Result<String, GenerationError> {
    let (phase, _) = self.phase_for(profile, today);

    let prompt = prompts::build_insight_prompt(phase, profile, entries);
    self
      .client
      .complete(prompts::INSIGHTS_SYSTEM_PROMPT, &prompt)
      .await
  }

  fn phase_for(&self, profile: &UserProfile, today: NaiveDate) -> (CyclePhase, i64) {
    cycle::current_phase(profile.last_period_date, profile.average_cycle_length, today)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
