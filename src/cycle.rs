//! Deterministic cycle-phase calculator
//!
//! This module maps a last-period date and cycle length onto the four
//! menstrual-cycle phases. All recommendations downstream (prompts,
//! fallback plans) key off these pre-computed values rather than
//! asking the LLM to do the math.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Cycle Phases
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
  Menstrual,  // Days 1-5
  Follicular, // Days 6-13
  Ovulatory,  // Days 14-16
  Luteal,     // Days 17-28
}

impl CyclePhase {
  /// Look up the phase for a 1-based cycle day.
  ///
  /// The boundary table is fixed to a 28-day scheme. Days outside 1-28
  /// (possible when the configured cycle length exceeds 28) map to
  /// Follicular.
  pub fn for_cycle_day(day: i64) -> Self {
    match day {
      1..=5 => CyclePhase::Menstrual,
      6..=13 => CyclePhase::Follicular,
      14..=16 => CyclePhase::Ovulatory,
      17..=28 => CyclePhase::Luteal,
      _ => CyclePhase::Follicular,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      CyclePhase::Menstrual => "Menstrual",
      CyclePhase::Follicular => "Follicular",
      CyclePhase::Ovulatory => "Ovulatory",
      CyclePhase::Luteal => "Luteal",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      CyclePhase::Menstrual => {
        "Energy is typically at its lowest as hormone levels dip. Gentle movement and rest support recovery."
      }
      CyclePhase::Follicular => {
        "Rising estrogen brings increasing energy and quicker recovery. A good window for building strength and trying new training."
      }
      CyclePhase::Ovulatory => {
        "Energy and power output tend to peak around ovulation. High-intensity work lands best here."
      }
      CyclePhase::Luteal => {
        "Progesterone rises and energy gradually declines. Favor steady, moderate work and wind down toward the next cycle."
      }
    }
  }

  /// Ordered workout recommendations. The first five seed the fallback
  /// workout plan when a generated reply cannot be parsed.
  pub fn recommended_workouts(&self) -> &'static [&'static str] {
    match self {
      CyclePhase::Menstrual => &[
        "Gentle yoga",
        "Walking",
        "Stretching",
        "Light pilates",
        "Breathing exercises",
        "Restorative yoga",
      ],
      CyclePhase::Follicular => &[
        "Strength training",
        "Running",
        "Dance cardio",
        "Cycling",
        "Bodyweight circuits",
        "Rock climbing",
      ],
      CyclePhase::Ovulatory => &[
        "HIIT",
        "Sprint intervals",
        "Heavy lifting",
        "Boxing",
        "Spin class",
        "Plyometrics",
      ],
      CyclePhase::Luteal => &[
        "Moderate strength training",
        "Swimming",
        "Pilates",
        "Steady-state cardio",
        "Hiking",
        "Barre",
      ],
    }
  }

  /// Ordered nutrition focus areas for the phase.
  pub fn nutrition_focus(&self) -> &'static [&'static str] {
    match self {
      CyclePhase::Menstrual => &[
        "Iron-rich foods",
        "Warm, comforting meals",
        "Hydration",
        "Magnesium sources",
      ],
      CyclePhase::Follicular => &[
        "Lean protein",
        "Fermented foods",
        "Fresh vegetables",
        "Complex carbohydrates",
      ],
      CyclePhase::Ovulatory => &[
        "Antioxidant-rich produce",
        "Fiber",
        "Light, fresh meals",
        "Anti-inflammatory foods",
      ],
      CyclePhase::Luteal => &[
        "Complex carbohydrates",
        "B vitamins",
        "Calcium sources",
        "Blood-sugar-steady snacks",
      ],
    }
  }

  /// Hex display color used by the host UI.
  pub fn display_color(&self) -> &'static str {
    match self {
      CyclePhase::Menstrual => "#E57373",
      CyclePhase::Follicular => "#81C784",
      CyclePhase::Ovulatory => "#FFD54F",
      CyclePhase::Luteal => "#9575CD",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Phase Calculation
/// ---------------------------------------------------------------------------

/// Compute the current phase and 1-based cycle day for a given date.
///
/// The cycle day uses floor-mod (`rem_euclid`) on the whole-day difference,
/// so a `last_period` in the future still yields a day in
/// [1, cycle_length] rather than a negative count.
pub fn current_phase(
  last_period: NaiveDate,
  cycle_length: i64,
  today: NaiveDate,
) -> (CyclePhase, i64) {
  let days_since = (today - last_period).num_days();
  let cycle_day = days_since.rem_euclid(cycle_length.max(1)) + 1;

  (CyclePhase::for_cycle_day(cycle_day), cycle_day)
}

/// Compute the current phase and cycle day as of today (local calendar day).
pub fn current_phase_today(last_period: NaiveDate, cycle_length: i64) -> (CyclePhase, i64) {
  current_phase(last_period, cycle_length, Local::now().date_naive())
}

/// Predicted start date of the next period.
pub fn predict_next_period(last_period: NaiveDate, cycle_length: i64) -> NaiveDate {
  last_period + Duration::days(cycle_length)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
