use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily journal entry. One entry is expected per calendar day; the host
/// application supplies them to the core newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
  pub date: NaiveDate,
  /// Overall day rating, 1-10
  pub day_rating: i64,
  pub note: String,
  /// Moods drawn from the app's fixed vocabulary
  pub moods: Vec<String>,
  /// Symptoms drawn from the app's fixed vocabulary
  pub symptoms: Vec<String>,

  // Wellness metrics, each 1-10
  pub energy: i64,
  pub sleep_quality: i64,
  pub stress: i64,
  pub exercise: i64,
  pub nutrition: i64,
  pub social_connection: i64,

  /// Cycle position at the time the entry was written
  pub cycle_day: i64,
  pub cycle_phase: String,

  pub voice_note_path: Option<String>,
}
