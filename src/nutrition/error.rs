//! Nutrition error types

use thiserror::Error;

/// Errors raised by the nutrition core and the catalog lookups around it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    #[error("Quantity must be a finite number greater than 0 (got {0})")]
    InvalidQuantity(f64),

    #[error("Food '{food}' is measured in pieces but has no positive piece weight")]
    MissingPieceWeight { food: String },

    #[error("Unknown food: {0}")]
    UnknownFood(String),

    #[error("Unknown RDA profile: {0}")]
    UnknownProfile(String),
}

/// Result type for nutrition operations
pub type NutritionResult<T> = Result<T, NutritionError>;
