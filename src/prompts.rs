//! Prompt construction for AI content generation
//!
//! Pure string assembly: cycle phase, profile fields, and deterministic
//! aggregates over the recent journal window are interpolated into fixed
//! templates. The LLM interprets pre-computed state rather than raw data.

use crate::cycle::CyclePhase;
use crate::models::{JournalEntry, UserProfile};

/// ---------------------------------------------------------------------------
/// System Instructions
/// ---------------------------------------------------------------------------

pub const WORKOUT_SYSTEM_PROMPT: &str = include_str!("prompts/workout_system.txt");
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("prompts/nutrition_system.txt");
pub const INSIGHTS_SYSTEM_PROMPT: &str = include_str!("prompts/insights_system.txt");

/// Journal window sizes (entries, newest-first; the builder takes a prefix)
const PLAN_WINDOW: usize = 7;
const INSIGHT_WINDOW: usize = 14;

/// Energy level assumed when the journal window is empty
const DEFAULT_ENERGY: i64 = 5;

/// ---------------------------------------------------------------------------
/// Journal Aggregates
/// ---------------------------------------------------------------------------

/// Integer-average energy over the window. Empty window defaults to 5.
pub fn average_energy(entries: &[JournalEntry]) -> i64 {
  if entries.is_empty() {
    return DEFAULT_ENERGY;
  }
  let sum: i64 = entries.iter().map(|e| e.energy).sum();
  sum / entries.len() as i64
}

/// The `n` most frequent symptoms across the window. Stable sort by
/// descending count; ties keep first-encountered order.
pub fn top_symptoms(entries: &[JournalEntry], n: usize) -> Vec<String> {
  let mut counts: Vec<(String, usize)> = Vec::new();

  for entry in entries {
    for symptom in &entry.symptoms {
      match counts.iter_mut().find(|(s, _)| s == symptom) {
        Some((_, count)) => *count += 1,
        None => counts.push((symptom.clone(), 1)),
      }
    }
  }

  counts.sort_by(|a, b| b.1.cmp(&a.1));
  counts.into_iter().take(n).map(|(s, _)| s).collect()
}

fn recent_window(entries: &[JournalEntry], max: usize) -> &[JournalEntry] {
  &entries[..entries.len().min(max)]
}

fn join_or(items: &[String], fallback: &str) -> String {
  if items.is_empty() {
    fallback.to_string()
  } else {
    items.join(", ")
  }
}

/// ---------------------------------------------------------------------------
/// Workout Prompt
/// ---------------------------------------------------------------------------

pub fn build_workout_prompt(
  phase: CyclePhase,
  profile: &UserProfile,
  entries: &[JournalEntry],
) -> String {
  let window = recent_window(entries, PLAN_WINDOW);
  let energy = average_energy(window);
  let symptoms = top_symptoms(window, 3);

  format!(
    r#"Create a workout for a {age}-year-old woman in the {phase} phase of her menstrual cycle.

ABOUT THIS PHASE:
{description}
Recommended workout types: {workouts}

ABOUT HER:
- Trains {days} days per week, preferably in the {time}
- Fitness goals: {goals}
- Workout challenges: {issues}
- Average energy over the last week: {energy}/10
- Most frequent recent symptoms: {symptoms}

Respond with valid JSON in this exact format:
{{
  "title": "Workout name",
  "description": "One or two sentences on what this session is for",
  "duration": 30,
  "difficulty": "Beginner|Moderate|Advanced",
  "exercises": [
    {{
      "name": "Exercise name",
      "sets": 3,
      "reps": "10-12",
      "duration_seconds": null,
      "rest_seconds": 60,
      "instructions": "How to perform it",
      "target_muscles": ["muscle"],
      "equipment": ["item or Bodyweight"],
      "category": "Strength|Cardio|Flexibility|Bodyweight"
    }}
  ]
}}

Match the intensity to her phase and energy level."#,
    age = profile.age,
    phase = phase.as_str(),
    description = phase.description(),
    workouts = phase.recommended_workouts().join(", "),
    days = profile.workout_days_per_week,
    time = profile.preferred_workout_time.as_str(),
    goals = join_or(&profile.fitness_goals, "general fitness"),
    issues = join_or(&profile.major_workout_issues, "none reported"),
    energy = energy,
    symptoms = join_or(&symptoms, "none logged"),
  )
}

/// ---------------------------------------------------------------------------
/// Meal Plan Prompt
/// ---------------------------------------------------------------------------

pub fn build_meal_plan_prompt(
  phase: CyclePhase,
  profile: &UserProfile,
  entries: &[JournalEntry],
) -> String {
  let window = recent_window(entries, PLAN_WINDOW);
  let energy = average_energy(window);
  let symptoms = top_symptoms(window, 3);

  format!(
    r#"Create a one-day meal plan for a {age}-year-old woman in the {phase} phase of her menstrual cycle.

ABOUT THIS PHASE:
{description}
Nutrition focus areas: {focus}

ABOUT HER:
- Diet type: {diet}
- Average energy over the last week: {energy}/10
- Most frequent recent symptoms: {symptoms}

Respond with valid JSON in this exact format:
{{
  "title": "Meal plan name",
  "description": "One or two sentences on the plan's focus",
  "total_calories": 1800,
  "macros": {{"protein_grams": 100, "carbs_grams": 200, "fat_grams": 60}},
  "meals": [
    {{
      "name": "Meal name",
      "meal_type": "Breakfast|Lunch|Dinner|Snack",
      "ingredients": ["ingredient"],
      "instructions": "How to prepare it",
      "prep_minutes": 10,
      "cook_minutes": 20,
      "servings": 1,
      "calories": 450,
      "macros": {{"protein_grams": 30, "carbs_grams": 45, "fat_grams": 15}},
      "allergens": ["allergen"],
      "tags": ["tag"]
    }}
  ]
}}

Cover breakfast, lunch, dinner, and at least one snack, and lean into the phase's nutrition focus."#,
    age = profile.age,
    phase = phase.as_str(),
    description = phase.description(),
    focus = phase.nutrition_focus().join(", "),
    diet = profile.diet_type,
    energy = energy,
    symptoms = join_or(&symptoms, "none logged"),
  )
}

/// ---------------------------------------------------------------------------
/// Insights Prompt
/// ---------------------------------------------------------------------------

pub fn build_insight_prompt(
  phase: CyclePhase,
  profile: &UserProfile,
  entries: &[JournalEntry],
) -> String {
  let window = recent_window(entries, INSIGHT_WINDOW);
  let energy = average_energy(window);
  let symptoms = top_symptoms(window, 3);

  let entry_lines: Vec<String> = window
    .iter()
    .map(|e| {
      format!(
        "- {}: rated {}/10, energy {}/10, sleep {}/10, stress {}/10, moods [{}], symptoms [{}]",
        e.date.format("%Y-%m-%d"),
        e.day_rating,
        e.energy,
        e.sleep_quality,
        e.stress,
        e.moods.join(", "),
        e.symptoms.join(", "),
      )
    })
    .collect();

  let journal_block = if entry_lines.is_empty() {
    "(no journal entries in the last two weeks)".to_string()
  } else {
    entry_lines.join("\n")
  };

  format!(
    r#"Reflect on how this user has been doing lately.

She is {age} years old and currently in the {phase} phase of her cycle.
{description}

Her average energy over this window was {energy}/10, and her most frequent symptoms
were: {symptoms}.

JOURNAL ENTRIES (newest first):
{journal}

Offer two to four short paragraphs of specific, encouraging reflection."#,
    age = profile.age,
    phase = phase.as_str(),
    description = phase.description(),
    energy = energy,
    symptoms = join_or(&symptoms, "none logged"),
    journal = journal_block,
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
