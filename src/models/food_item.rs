//! Food Item model
//!
//! A catalog food with its per-gram nutrient vector and input unit.

use serde::{Deserialize, Serialize};

use super::NutrientVector;

/// The unit a user enters quantities in for a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodUnit {
    #[serde(alias = "g")]
    Gram,
    #[serde(alias = "ml")]
    Milliliter,
    Piece,
}

impl FoodUnit {
    /// Short unit label used in serving descriptions
    pub fn symbol(&self) -> &'static str {
        match self {
            FoodUnit::Gram => "g",
            FoodUnit::Milliliter => "ml",
            FoodUnit::Piece => "piece",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodUnit::Gram => "gram",
            FoodUnit::Milliliter => "milliliter",
            FoodUnit::Piece => "piece",
        }
    }
}

/// A labelled common serving, e.g. "1 scoop" = 30 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSize {
    pub label: String,
    pub grams: f64,
}

/// A food item. Nutrient amounts are always per gram, whatever the input unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub category: String,
    pub unit: FoodUnit,
    /// Grams per piece; required when unit is Piece
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_weight: Option<f64>,
    /// Grams per milliliter; 1.0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Suggested quantity to pre-fill, in the food's unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servings: Vec<ServingSize>,
    #[serde(default)]
    pub nutrients_per_gram: NutrientVector,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit: FoodUnit,
        nutrients_per_gram: NutrientVector,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit,
            piece_weight: None,
            density: None,
            default_quantity: None,
            servings: Vec::new(),
            nutrients_per_gram,
        }
    }

    pub fn with_piece_weight(mut self, grams: f64) -> Self {
        self.piece_weight = Some(grams);
        self
    }

    pub fn with_density(mut self, grams_per_ml: f64) -> Self {
        self.density = Some(grams_per_ml);
        self
    }

    /// Label for the food's default serving
    ///
    /// First labelled serving if any, then "1 piece (~Ng)" for piece foods,
    /// otherwise "100g" / "100ml".
    pub fn default_serving_label(&self) -> String {
        if let Some(serving) = self.servings.first() {
            return serving.label.clone();
        }
        match (self.unit, self.piece_weight) {
            (FoodUnit::Piece, Some(weight)) => format!("1 piece (~{}g)", weight),
            (FoodUnit::Milliliter, _) => "100ml".to_string(),
            _ => "100g".to_string(),
        }
    }
}
