//! Nutrition calculator and daily aggregation
//!
//! Scales per-gram vectors by normalized mass and folds log entries into totals.

use serde::Serialize;

use crate::models::{FoodItem, LogEntry, MealSlot, NutrientVector};

use super::error::NutritionResult;
use super::units::normalize_to_grams;

/// Absolute nutrients contributed by `quantity` (in the food's unit) of a food
///
/// Returns a complete vector; nutrients the food doesn't carry are 0.
pub fn calculate_contribution(food: &FoodItem, quantity: f64) -> NutritionResult<NutrientVector> {
    let grams = normalize_to_grams(food, quantity)?;
    tracing::debug!("{} x {} {} = {:.2} g", food.name, quantity, food.unit.symbol(), grams);
    Ok(food.nutrients_per_gram.scale(grams))
}

/// Total nutrients across a day's log entries
///
/// An empty log is the zero vector.
pub fn aggregate(entries: &[LogEntry]) -> NutritionResult<NutrientVector> {
    let mut total = NutrientVector::zero();
    for entry in entries {
        total += calculate_contribution(&entry.food, entry.quantity)?;
    }
    Ok(total)
}

/// Totals for one meal slot
#[derive(Debug, Clone, Serialize)]
pub struct MealTotals {
    pub meal_slot: MealSlot,
    pub entry_count: usize,
    pub nutrition: NutrientVector,
}

/// Per-slot totals, one row per meal slot in display order
pub fn meal_totals(entries: &[LogEntry]) -> NutritionResult<Vec<MealTotals>> {
    MealSlot::ALL
        .into_iter()
        .map(|slot| {
            let slot_entries: Vec<LogEntry> = entries
                .iter()
                .filter(|e| e.meal_slot == slot)
                .cloned()
                .collect();
            Ok(MealTotals {
                meal_slot: slot,
                entry_count: slot_entries.len(),
                nutrition: aggregate(&slot_entries)?,
            })
        })
        .collect()
}
