//! Core of a cycle-aware workout and nutrition planner.
//!
//! The host application owns UI and persistence. It hands this crate a
//! [`UserProfile`] and a newest-first window of [`JournalEntry`] records,
//! and gets back typed [`WorkoutPlan`] / [`MealPlan`] records produced by
//! a deterministic cycle-phase calculator feeding an LLM generation
//! pipeline with phase-keyed fallbacks.

pub mod cycle;
pub mod generator;
pub mod llm;
pub mod models;
pub mod parser;
pub mod prompts;

#[cfg(test)]
pub mod test_utils;

pub use cycle::{current_phase, current_phase_today, predict_next_period, CyclePhase};
pub use generator::PlanGenerator;
pub use llm::{GenerationClient, GenerationError};
pub use models::{JournalEntry, MealPlan, UserProfile, WorkoutPlan};
pub use parser::{ContentSource, ParseReport};
