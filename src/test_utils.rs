//! Test utilities and mock-data factories shared across the test suite

use crate::cycle::CyclePhase;
use crate::models::{Difficulty, JournalEntry, UserProfile, WorkoutPlan, WorkoutTime};
use chrono::{Duration, NaiveDate, Utc};

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A fixed anchor date so cycle math in tests is deterministic
pub fn anchor_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

/// Create a mock user profile for testing
pub fn mock_profile() -> UserProfile {
  UserProfile {
    age: 29,
    diet_type: "Vegetarian".to_string(),
    workout_days_per_week: 4,
    preferred_workout_time: WorkoutTime::Morning,
    major_workout_issues: vec!["Low energy some days".to_string()],
    fitness_goals: vec!["Build strength".to_string(), "Better sleep".to_string()],
    last_period_date: anchor_date(),
    average_cycle_length: 28,
    onboarded: true,
  }
}

/// Create journal entries newest-first, one per day, with the given
/// energy values. Other metrics get steady mid-range values.
pub fn mock_journal_entries(energies: &[i64]) -> Vec<JournalEntry> {
  let newest = anchor_date() + Duration::days(10);

  energies
    .iter()
    .enumerate()
    .map(|(i, &energy)| JournalEntry {
      date: newest - Duration::days(i as i64),
      day_rating: 6,
      note: String::new(),
      moods: vec!["Calm".to_string()],
      symptoms: Vec::new(),
      energy,
      sleep_quality: 6,
      stress: 4,
      exercise: 5,
      nutrition: 6,
      social_connection: 5,
      cycle_day: 11 - i as i64,
      cycle_phase: CyclePhase::Follicular.as_str().to_string(),
      voice_note_path: None,
    })
    .collect()
}

/// Create a minimal unscheduled workout plan for testing
pub fn mock_workout_plan() -> WorkoutPlan {
  WorkoutPlan {
    title: "Test Plan".to_string(),
    exercises: Vec::new(),
    duration_minutes: 30,
    difficulty: Difficulty::Moderate,
    cycle_phase: CyclePhase::Follicular,
    ai_generated: false,
    created_at: Utc::now(),
    scheduled: false,
    scheduled_for: None,
    tags: Vec::new(),
    description: String::new(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_entries_are_newest_first() {
    let entries = mock_journal_entries(&[5, 6, 7]);

    assert_eq!(entries.len(), 3);
    assert!(entries[0].date > entries[1].date);
    assert!(entries[1].date > entries[2].date);
    assert_eq!(entries[0].energy, 5);
    assert_eq!(entries[2].energy, 7);
  }

  #[test]
  fn test_mock_profile_is_onboarded() {
    let profile = mock_profile();
    assert!(profile.onboarded);
    assert_eq!(profile.average_cycle_length, 28);
  }
}
