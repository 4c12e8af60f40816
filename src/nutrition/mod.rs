//! Nutrition calculation module
//!
//! Unit normalization, contribution and daily totals, RDA progress.

pub mod calculator;
pub mod error;
pub mod rda;
pub mod share;
pub mod units;

pub use calculator::{aggregate, calculate_contribution, meal_totals, MealTotals};
pub use error::{NutritionError, NutritionResult};
pub use rda::{
    display_percent, nutrient_progress, overall_progress, percent_of, resolve_target,
    NutrientProgress, ProgressReport, ProgressTier, DISPLAY_CAP, OVERALL_CAP,
};
pub use share::{share_message, share_progress, ShareSummary};
pub use units::{adjust_quantity, normalize_to_grams, validate_quantity, DEFAULT_DENSITY};
