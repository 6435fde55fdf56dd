pub mod journal;
pub mod plan;
pub mod profile;

pub use journal::JournalEntry;
pub use plan::{Difficulty, Exercise, MacroSummary, Meal, MealPlan, MealType, WorkoutPlan};
pub use profile::{UserProfile, WorkoutTime};
