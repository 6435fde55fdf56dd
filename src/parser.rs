//! Best-effort parsing of generated replies into typed plans
//!
//! The model's reply is free-form text that usually, but not always,
//! contains the JSON shape the prompt asked for. Parsing here is total:
//! undecodable input degrades to a deterministic phase-keyed fallback
//! plan, and every defaulted field or dropped item is recorded in a
//! `ParseReport` so callers can see exactly how much degradation
//! happened.

use crate::cycle::CyclePhase;
use crate::models::{Difficulty, Exercise, MacroSummary, Meal, MealPlan, MealType, WorkoutPlan};
use chrono::Utc;
use serde_json::Value;
use tracing::warn;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_DURATION_MINUTES: i64 = 30;
const DEFAULT_TOTAL_CALORIES: i64 = 1800;
const DEFAULT_SETS: i64 = 3;
const DEFAULT_REPS: &str = "10-12";
const DEFAULT_REST_SECONDS: i64 = 60;
const DEFAULT_MACROS: MacroSummary = MacroSummary {
  protein_grams: 100,
  carbs_grams: 200,
  fat_grams: 60,
};

const AI_TAG: &str = "AI Generated";
const FALLBACK_TAG: &str = "Fallback";

/// ---------------------------------------------------------------------------
/// Parse Report
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
  /// The plan came out of the model's reply (possibly with defaults)
  Generated,
  /// The reply was unusable; the plan is the phase-keyed template
  Fallback,
}

/// How a reply was degraded on its way into a typed plan
#[derive(Debug, Clone)]
pub struct ParseReport {
  pub source: ContentSource,
  /// Top-level plan fields that were absent or mistyped and got defaults
  pub defaulted_fields: Vec<&'static str>,
  /// Nested exercise/meal items dropped for missing identifying fields
  pub dropped_items: usize,
}

impl ParseReport {
  fn generated() -> Self {
    Self {
      source: ContentSource::Generated,
      defaulted_fields: Vec::new(),
      dropped_items: 0,
    }
  }

  fn fallback() -> Self {
    Self {
      source: ContentSource::Fallback,
      defaulted_fields: Vec::new(),
      dropped_items: 0,
    }
  }

  pub fn is_fallback(&self) -> bool {
    self.source == ContentSource::Fallback
  }

  pub fn is_clean(&self) -> bool {
    !self.is_fallback() && self.defaulted_fields.is_empty() && self.dropped_items == 0
  }
}

/// ---------------------------------------------------------------------------
/// JSON Extraction
/// ---------------------------------------------------------------------------

/// Extract a JSON object from a model reply (handles markdown code blocks).
/// Returns None when no candidate object can be found; callers fall back.
pub fn extract_json(text: &str) -> Option<String> {
  // Try direct parse first
  if text.trim().starts_with('{') {
    return Some(text.trim().to_string());
  }

  // Look for JSON in code blocks
  if let Some(start) = text.find("```json") {
    let start = start + 7;
    if let Some(end) = text[start..].find("```") {
      return Some(text[start..start + end].trim().to_string());
    }
  }

  // Look for plain code blocks
  if let Some(start) = text.find("```") {
    let start = start + 3;
    // Skip language identifier if present
    let content_start = text[start..]
      .find('\n')
      .map(|i| start + i + 1)
      .unwrap_or(start);
    if let Some(end) = text[content_start..].find("```") {
      return Some(text[content_start..content_start + end].trim().to_string());
    }
  }

  // Last resort: first { to last }
  if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
    if start < end {
      return Some(text[start..=end].to_string());
    }
  }

  None
}

fn decode_object(raw: &str) -> Option<Value> {
  let json = extract_json(raw)?;
  let value: Value = serde_json::from_str(&json).ok()?;
  value.is_object().then_some(value)
}

/// ---------------------------------------------------------------------------
/// Field Extraction Helpers
/// ---------------------------------------------------------------------------

fn read_string(
  v: &Value,
  key: &'static str,
  default: String,
  report: &mut ParseReport,
) -> String {
  match v.get(key).and_then(Value::as_str) {
    Some(s) if !s.trim().is_empty() => s.to_string(),
    _ => {
      report.defaulted_fields.push(key);
      default
    }
  }
}

fn read_i64(v: &Value, key: &'static str, default: i64, report: &mut ParseReport) -> i64 {
  match v.get(key).and_then(Value::as_i64) {
    Some(n) => n,
    None => {
      report.defaulted_fields.push(key);
      default
    }
  }
}

fn read_string_array(v: &Value, key: &str) -> Vec<String> {
  v.get(key)
    .and_then(Value::as_array)
    .map(|items| {
      items
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect()
    })
    .unwrap_or_default()
}

/// Macros are nested; a missing or malformed object gets the fixed default
fn read_macros(
  v: &Value,
  key: &'static str,
  report: &mut ParseReport,
) -> MacroSummary {
  match v.get(key) {
    Some(m) if m.is_object() => MacroSummary {
      protein_grams: m.get("protein_grams").and_then(Value::as_i64).unwrap_or(0),
      carbs_grams: m.get("carbs_grams").and_then(Value::as_i64).unwrap_or(0),
      fat_grams: m.get("fat_grams").and_then(Value::as_i64).unwrap_or(0),
    },
    _ => {
      report.defaulted_fields.push(key);
      DEFAULT_MACROS
    }
  }
}

/// ---------------------------------------------------------------------------
/// Workout Parsing
/// ---------------------------------------------------------------------------

/// Parse a model reply into a workout plan. Total: undecodable input
/// yields the phase fallback.
pub fn parse_workout(raw: &str, phase: CyclePhase) -> (WorkoutPlan, ParseReport) {
  let Some(v) = decode_object(raw) else {
    warn!(phase = phase.as_str(), "workout reply unparseable, using fallback");
    return (fallback_workout(phase), ParseReport::fallback());
  };

  let mut report = ParseReport::generated();

  let title = read_string(
    &v,
    "title",
    format!("{} Phase Workout", phase.as_str()),
    &mut report,
  );
  let description = read_string(&v, "description", phase.description().to_string(), &mut report);
  let duration_minutes = read_i64(&v, "duration", DEFAULT_DURATION_MINUTES, &mut report);

  let difficulty = match v.get("difficulty").and_then(Value::as_str).and_then(Difficulty::parse) {
    Some(d) => d,
    None => {
      report.defaulted_fields.push("difficulty");
      Difficulty::Moderate
    }
  };

  let exercises = match v.get("exercises").and_then(Value::as_array) {
    Some(items) => items
      .iter()
      .filter_map(|item| {
        let parsed = parse_exercise(item, difficulty);
        if parsed.is_none() {
          report.dropped_items += 1;
        }
        parsed
      })
      .collect(),
    None => {
      report.defaulted_fields.push("exercises");
      Vec::new()
    }
  };

  if report.dropped_items > 0 {
    warn!(
      dropped = report.dropped_items,
      "dropped exercises missing a name"
    );
  }

  let plan = WorkoutPlan {
    title,
    exercises,
    duration_minutes,
    difficulty,
    cycle_phase: phase,
    ai_generated: true,
    created_at: Utc::now(),
    scheduled: false,
    scheduled_for: None,
    tags: vec![AI_TAG.to_string()],
    description,
  };

  (plan, report)
}

/// Items without a name are unusable and get dropped; everything else
/// defaults item-locally.
fn parse_exercise(v: &Value, plan_difficulty: Difficulty) -> Option<Exercise> {
  let name = v.get("name").and_then(Value::as_str)?.trim();
  if name.is_empty() {
    return None;
  }

  Some(Exercise {
    name: name.to_string(),
    sets: v.get("sets").and_then(Value::as_i64).unwrap_or(DEFAULT_SETS),
    reps: v
      .get("reps")
      .and_then(Value::as_str)
      .unwrap_or(DEFAULT_REPS)
      .to_string(),
    duration_seconds: v.get("duration_seconds").and_then(Value::as_i64),
    rest_seconds: v
      .get("rest_seconds")
      .and_then(Value::as_i64)
      .unwrap_or(DEFAULT_REST_SECONDS),
    instructions: v
      .get("instructions")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string(),
    target_muscles: read_string_array(v, "target_muscles"),
    equipment: read_string_array(v, "equipment"),
    difficulty: v
      .get("difficulty")
      .and_then(Value::as_str)
      .and_then(Difficulty::parse)
      .unwrap_or(plan_difficulty),
    category: v
      .get("category")
      .and_then(Value::as_str)
      .unwrap_or("General")
      .to_string(),
  })
}

/// ---------------------------------------------------------------------------
/// Meal Plan Parsing
/// ---------------------------------------------------------------------------

/// Parse a model reply into a meal plan. Total: undecodable input yields
/// the phase fallback.
pub fn parse_meal_plan(raw: &str, phase: CyclePhase) -> (MealPlan, ParseReport) {
  let Some(v) = decode_object(raw) else {
    warn!(phase = phase.as_str(), "meal plan reply unparseable, using fallback");
    return (fallback_meal_plan(phase), ParseReport::fallback());
  };

  let mut report = ParseReport::generated();

  let title = read_string(
    &v,
    "title",
    format!("{} Phase Meal Plan", phase.as_str()),
    &mut report,
  );
  let description = read_string(&v, "description", phase.description().to_string(), &mut report);
  let total_calories = read_i64(&v, "total_calories", DEFAULT_TOTAL_CALORIES, &mut report);
  let macros = read_macros(&v, "macros", &mut report);

  let nutritional_focus = match v.get("nutritional_focus").and_then(Value::as_array) {
    Some(_) => read_string_array(&v, "nutritional_focus"),
    None => {
      report.defaulted_fields.push("nutritional_focus");
      phase.nutrition_focus().iter().map(|s| s.to_string()).collect()
    }
  };

  let meals = match v.get("meals").and_then(Value::as_array) {
    Some(items) => items
      .iter()
      .filter_map(|item| {
        let parsed = parse_meal(item);
        if parsed.is_none() {
          report.dropped_items += 1;
        }
        parsed
      })
      .collect(),
    None => {
      report.defaulted_fields.push("meals");
      Vec::new()
    }
  };

  if report.dropped_items > 0 {
    warn!(
      dropped = report.dropped_items,
      "dropped meals missing a name or meal type"
    );
  }

  let plan = MealPlan {
    title,
    meals,
    total_calories,
    macros,
    cycle_phase: phase,
    ai_generated: true,
    created_at: Utc::now(),
    scheduled: false,
    scheduled_for: None,
    tags: vec![AI_TAG.to_string()],
    description,
    nutritional_focus,
  };

  (plan, report)
}

/// A meal needs both a name and a recognizable meal type to be kept.
fn parse_meal(v: &Value) -> Option<Meal> {
  let name = v.get("name").and_then(Value::as_str)?.trim();
  if name.is_empty() {
    return None;
  }
  let meal_type = v.get("meal_type").and_then(Value::as_str).and_then(MealType::parse)?;

  let macros = match v.get("macros") {
    Some(m) if m.is_object() => MacroSummary {
      protein_grams: m.get("protein_grams").and_then(Value::as_i64).unwrap_or(0),
      carbs_grams: m.get("carbs_grams").and_then(Value::as_i64).unwrap_or(0),
      fat_grams: m.get("fat_grams").and_then(Value::as_i64).unwrap_or(0),
    },
    _ => MacroSummary::default(),
  };

  Some(Meal {
    name: name.to_string(),
    meal_type,
    ingredients: read_string_array(v, "ingredients"),
    instructions: v
      .get("instructions")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string(),
    prep_minutes: v.get("prep_minutes").and_then(Value::as_i64).unwrap_or(10),
    cook_minutes: v.get("cook_minutes").and_then(Value::as_i64).unwrap_or(20),
    servings: v.get("servings").and_then(Value::as_i64).unwrap_or(1),
    calories: v.get("calories").and_then(Value::as_i64).unwrap_or(0),
    macros,
    allergens: read_string_array(v, "allergens"),
    tags: read_string_array(v, "tags"),
  })
}

/// ---------------------------------------------------------------------------
/// Fallback Plans
/// ---------------------------------------------------------------------------

/// Deterministic workout built only from the phase's recommendation table:
/// the first five recommended workout types as single-set bodyweight moves.
pub fn fallback_workout(phase: CyclePhase) -> WorkoutPlan {
  let exercises = phase
    .recommended_workouts()
    .iter()
    .take(5)
    .map(|name| Exercise {
      name: (*name).to_string(),
      sets: 1,
      reps: DEFAULT_REPS.to_string(),
      duration_seconds: None,
      rest_seconds: DEFAULT_REST_SECONDS,
      instructions: "Move at an easy, controlled pace.".to_string(),
      target_muscles: vec!["Full body".to_string()],
      equipment: vec!["Bodyweight".to_string()],
      difficulty: Difficulty::Beginner,
      category: "Bodyweight".to_string(),
    })
    .collect();

  WorkoutPlan {
    title: format!("{} Phase Essentials", phase.as_str()),
    exercises,
    duration_minutes: DEFAULT_DURATION_MINUTES,
    difficulty: Difficulty::Beginner,
    cycle_phase: phase,
    ai_generated: true,
    created_at: Utc::now(),
    scheduled: false,
    scheduled_for: None,
    tags: vec![AI_TAG.to_string(), FALLBACK_TAG.to_string()],
    description: phase.description().to_string(),
  }
}

/// Deterministic meal plan: three canned meals themed on the phase's
/// nutrition focus.
pub fn fallback_meal_plan(phase: CyclePhase) -> MealPlan {
  let focus: Vec<String> = phase.nutrition_focus().iter().map(|s| s.to_string()).collect();
  let lead_focus = focus.first().cloned().unwrap_or_default();

  let canned = [
    (
      "Overnight oats with berries and seeds",
      MealType::Breakfast,
      450,
      MacroSummary { protein_grams: 20, carbs_grams: 60, fat_grams: 15 },
    ),
    (
      "Grain bowl with greens, chickpeas, and tahini",
      MealType::Lunch,
      600,
      MacroSummary { protein_grams: 25, carbs_grams: 70, fat_grams: 22 },
    ),
    (
      "Baked salmon with roasted vegetables",
      MealType::Dinner,
      750,
      MacroSummary { protein_grams: 45, carbs_grams: 40, fat_grams: 30 },
    ),
  ];

  let meals: Vec<Meal> = canned
    .into_iter()
    .map(|(name, meal_type, calories, macros)| Meal {
      name: name.to_string(),
      meal_type,
      ingredients: Vec::new(),
      instructions: format!("Prepare simply, emphasizing {}.", lead_focus.to_lowercase()),
      prep_minutes: 10,
      cook_minutes: 20,
      servings: 1,
      calories,
      macros,
      allergens: Vec::new(),
      tags: vec![FALLBACK_TAG.to_string()],
    })
    .collect();

  let total_calories = meals.iter().map(|m| m.calories).sum();

  MealPlan {
    title: format!("{} Phase Staples", phase.as_str()),
    meals,
    total_calories,
    macros: DEFAULT_MACROS,
    cycle_phase: phase,
    ai_generated: true,
    created_at: Utc::now(),
    scheduled: false,
    scheduled_for: None,
    tags: vec![AI_TAG.to_string(), FALLBACK_TAG.to_string()],
    description: phase.description().to_string(),
    nutritional_focus: focus,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_json_direct() {
    let input = r#"{"title": "test"}"#;
    assert_eq!(extract_json(input).unwrap(), input);
  }

  #[test]
  fn test_extract_json_code_block() {
    let input = "Here's your workout:\n\n```json\n{\"title\": \"Morning Flow\"}\n```\n\nEnjoy!";
    assert!(extract_json(input).unwrap().contains("Morning Flow"));
  }

  #[test]
  fn test_extract_json_brace_span() {
    let input = r#"The plan is {"title": "test"} as requested."#;
    assert_eq!(extract_json(input).unwrap(), r#"{"title": "test"}"#);
  }

  #[test]
  fn test_extract_json_none_for_plain_prose() {
    assert!(extract_json("Sorry, I can't help with that.").is_none());
  }

  #[test]
  fn test_parse_workout_well_formed() {
    let raw = r#"{"title":"Test","exercises":[{"name":"Squats","sets":3,"reps":"10"}],"duration":20,"difficulty":"Beginner"}"#;

    let (plan, report) = parse_workout(raw, CyclePhase::Follicular);

    assert_eq!(plan.title, "Test");
    assert_eq!(plan.duration_minutes, 20);
    assert_eq!(plan.difficulty, Difficulty::Beginner);
    assert_eq!(plan.exercises.len(), 1);
    assert_eq!(plan.exercises[0].name, "Squats");
    assert_eq!(plan.exercises[0].sets, 3);
    assert_eq!(plan.exercises[0].reps, "10");
    assert!(plan.ai_generated);
    assert_eq!(plan.tags, vec!["AI Generated"]);

    assert!(!report.is_fallback());
    assert_eq!(report.dropped_items, 0);
    // description was absent and got the phase default
    assert!(report.defaulted_fields.contains(&"description"));
  }

  #[test]
  fn test_parse_workout_total_on_garbage() {
    for raw in ["", "not json at all", "```\nstill not json\n```", "{broken"] {
      let (plan, report) = parse_workout(raw, CyclePhase::Menstrual);

      assert!(report.is_fallback());
      assert!(plan.tags.contains(&"Fallback".to_string()));
      assert_eq!(plan.cycle_phase, CyclePhase::Menstrual);
      assert_eq!(plan.exercises.len(), 5);
      // Fallback exercises come straight from the phase table
      assert_eq!(
        plan.exercises[0].name,
        CyclePhase::Menstrual.recommended_workouts()[0]
      );
      assert!(plan.exercises.iter().all(|e| e.sets == 1));
    }
  }

  #[test]
  fn test_parse_workout_drops_nameless_items_keeps_siblings() {
    let raw = r#"{
      "title": "Mixed",
      "duration": 40,
      "difficulty": "Advanced",
      "exercises": [
        {"name": "Lunges", "sets": 4},
        {"sets": 3, "reps": "12"},
        {"name": "  ", "sets": 2},
        {"name": "Push-ups"}
      ]
    }"#;

    let (plan, report) = parse_workout(raw, CyclePhase::Ovulatory);

    assert_eq!(plan.exercises.len(), 2);
    assert_eq!(plan.exercises[0].name, "Lunges");
    assert_eq!(plan.exercises[1].name, "Push-ups");
    assert_eq!(report.dropped_items, 2);
    // Exercises missing their own difficulty inherit the plan's
    assert_eq!(plan.exercises[1].difficulty, Difficulty::Advanced);
  }

  #[test]
  fn test_parse_workout_defaults_are_reported() {
    let (plan, report) = parse_workout("{}", CyclePhase::Luteal);

    assert!(!report.is_fallback());
    assert_eq!(plan.title, "Luteal Phase Workout");
    assert_eq!(plan.duration_minutes, 30);
    assert_eq!(plan.difficulty, Difficulty::Moderate);
    assert!(plan.exercises.is_empty());

    for key in ["title", "description", "duration", "difficulty", "exercises"] {
      assert!(
        report.defaulted_fields.contains(&key),
        "missing defaulted field {}",
        key
      );
    }
  }

  #[test]
  fn test_parse_meal_plan_well_formed() {
    let raw = r#"{
      "title": "Luteal Comfort",
      "description": "Steady energy",
      "total_calories": 1900,
      "macros": {"protein_grams": 110, "carbs_grams": 210, "fat_grams": 55},
      "nutritional_focus": ["Complex carbohydrates"],
      "meals": [
        {
          "name": "Veggie omelette",
          "meal_type": "Breakfast",
          "ingredients": ["eggs", "spinach"],
          "calories": 420,
          "macros": {"protein_grams": 28, "carbs_grams": 8, "fat_grams": 30}
        }
      ]
    }"#;

    let (plan, report) = parse_meal_plan(raw, CyclePhase::Luteal);

    assert_eq!(plan.title, "Luteal Comfort");
    assert_eq!(plan.total_calories, 1900);
    assert_eq!(plan.macros.protein_grams, 110);
    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].meal_type, MealType::Breakfast);
    assert_eq!(plan.meals[0].ingredients, vec!["eggs", "spinach"]);
    assert!(report.is_clean());
  }

  #[test]
  fn test_parse_meal_plan_drops_items_missing_type_or_name() {
    let raw = r#"{
      "title": "Partial",
      "total_calories": 1700,
      "macros": {"protein_grams": 1, "carbs_grams": 1, "fat_grams": 1},
      "description": "d",
      "meals": [
        {"name": "Smoothie", "meal_type": "brunch"},
        {"meal_type": "Lunch"},
        {"name": "Stir fry", "meal_type": "dinner", "calories": 650}
      ]
    }"#;

    let (plan, report) = parse_meal_plan(raw, CyclePhase::Follicular);

    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].name, "Stir fry");
    assert_eq!(plan.meals[0].meal_type, MealType::Dinner);
    assert_eq!(report.dropped_items, 2);
  }

  #[test]
  fn test_parse_meal_plan_total_on_garbage() {
    let (plan, report) = parse_meal_plan("no json here", CyclePhase::Ovulatory);

    assert!(report.is_fallback());
    assert!(plan.tags.contains(&"Fallback".to_string()));
    assert_eq!(plan.meals.len(), 3);
    assert_eq!(plan.meals[0].meal_type, MealType::Breakfast);
    assert_eq!(plan.meals[1].meal_type, MealType::Lunch);
    assert_eq!(plan.meals[2].meal_type, MealType::Dinner);
    assert_eq!(
      plan.total_calories,
      plan.meals.iter().map(|m| m.calories).sum::<i64>()
    );
    assert_eq!(
      plan.nutritional_focus,
      CyclePhase::Ovulatory
        .nutrition_focus()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
    );
  }

  #[test]
  fn test_numeric_ranges_pass_through_unvalidated() {
    let raw = r#"{
      "title": "Odd",
      "description": "d",
      "total_calories": -200,
      "macros": {"protein_grams": 1, "carbs_grams": 1, "fat_grams": 1},
      "meals": [{"name": "Air", "meal_type": "Snack", "calories": -50}]
    }"#;

    let (plan, _) = parse_meal_plan(raw, CyclePhase::Menstrual);

    assert_eq!(plan.total_calories, -200);
    assert_eq!(plan.meals[0].calories, -50);
  }

  #[test]
  fn test_fallbacks_differ_by_phase() {
    let menstrual = fallback_workout(CyclePhase::Menstrual);
    let ovulatory = fallback_workout(CyclePhase::Ovulatory);

    assert_ne!(menstrual.exercises[0].name, ovulatory.exercises[0].name);
    assert_eq!(menstrual.cycle_phase, CyclePhase::Menstrual);
    assert_eq!(ovulatory.cycle_phase, CyclePhase::Ovulatory);
  }
}
