//! Unit normalization
//!
//! Converts a quantity in a food's declared unit into grams.

use crate::models::{FoodItem, FoodUnit};

use super::error::{NutritionError, NutritionResult};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per milliliter when a food declares no density (water)
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Smallest quantity `adjust_quantity` will step down to
pub const MIN_ADJUSTED_QUANTITY: f64 = 1.0;

// ============================================================================
// Normalization
// ============================================================================

/// Convert a quantity in the food's unit to grams
///
/// - Gram: unchanged
/// - Milliliter: quantity x density (1.0 g/ml when absent)
/// - Piece: quantity x piece weight
///
/// The quantity itself is not validated; zero or negative input scales
/// proportionally. Use [`validate_quantity`] at the point where a quantity
/// is accepted from a user.
pub fn normalize_to_grams(food: &FoodItem, quantity: f64) -> NutritionResult<f64> {
    match food.unit {
        FoodUnit::Gram => Ok(quantity),
        FoodUnit::Milliliter => Ok(quantity * food.density.unwrap_or(DEFAULT_DENSITY)),
        FoodUnit::Piece => match food.piece_weight {
            Some(weight) if weight.is_finite() && weight > 0.0 => Ok(quantity * weight),
            _ => Err(NutritionError::MissingPieceWeight {
                food: food.name.clone(),
            }),
        },
    }
}

/// Reject quantities that are not finite and strictly positive
pub fn validate_quantity(quantity: f64) -> NutritionResult<f64> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(quantity)
    } else {
        Err(NutritionError::InvalidQuantity(quantity))
    }
}

/// Apply a +/- step to a quantity, never going below [`MIN_ADJUSTED_QUANTITY`]
pub fn adjust_quantity(current: f64, delta: f64) -> f64 {
    (current + delta).max(MIN_ADJUSTED_QUANTITY)
}
