//! Data models
//!
//! Nutrient vectors, catalog foods, RDA profiles, and persisted log state.

mod food_item;
mod log_entry;
mod nutrient;
mod preferences;
mod profile;

pub use food_item::{FoodItem, FoodUnit, ServingSize};
pub use log_entry::{today, LogEntry, LogEntryCreate, MealSlot, DATE_FORMAT};
pub use nutrient::{Nutrient, NutrientVector};
pub use preferences::{Favorite, Settings};
pub use profile::{Profile, Target, TargetCategory};
