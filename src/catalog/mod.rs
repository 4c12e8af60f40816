//! Food catalog
//!
//! The compiled-in food table. Parsed once on first use and read-only after.

mod profiles;

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::{FoodItem, FoodUnit};
use crate::nutrition::{NutritionError, NutritionResult};

pub use profiles::{find_profile, profiles, require_profile, DEFAULT_PROFILE_ID};

const FOODS_JSON: &str = include_str!("data/foods.json");

#[derive(Deserialize)]
struct FoodFile {
    foods: Vec<FoodItem>,
}

static FOODS: LazyLock<Vec<FoodItem>> = LazyLock::new(|| {
    let file: FoodFile =
        serde_json::from_str(FOODS_JSON).expect("embedded foods.json is not valid food data");
    tracing::debug!("Loaded {} catalog foods", file.foods.len());
    file.foods
});

/// Every food, in catalog order
pub fn foods() -> &'static [FoodItem] {
    &FOODS
}

/// Exact, case-sensitive lookup by name
pub fn find_food_by_name(name: &str) -> Option<&'static FoodItem> {
    FOODS.iter().find(|f| f.name == name)
}

/// Lookup that fails with `UnknownFood`
pub fn require_food(name: &str) -> NutritionResult<&'static FoodItem> {
    find_food_by_name(name).ok_or_else(|| NutritionError::UnknownFood(name.to_string()))
}

/// Case-insensitive substring search on name
///
/// An empty (or whitespace) query returns the first `limit` foods.
pub fn search_foods(query: &str, limit: usize) -> Vec<&'static FoodItem> {
    let query = query.trim().to_lowercase();
    FOODS
        .iter()
        .filter(|f| query.is_empty() || f.name.to_lowercase().contains(&query))
        .take(limit)
        .collect()
}

pub fn foods_by_category(category: &str) -> Vec<&'static FoodItem> {
    FOODS
        .iter()
        .filter(|f| f.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Distinct categories in first-seen order
pub fn categories() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    FOODS
        .iter()
        .map(|f| f.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// One data-integrity finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogProblem {
    pub food: String,
    pub issue: String,
}

impl CatalogProblem {
    fn new(food: &str, issue: impl Into<String>) -> Self {
        Self {
            food: food.to_string(),
            issue: issue.into(),
        }
    }
}

/// Check a set of foods for values the calculator can't use
pub fn check_foods(foods: &[FoodItem]) -> Vec<CatalogProblem> {
    let mut problems = Vec::new();
    let mut names = BTreeSet::new();

    for food in foods {
        if !names.insert(food.name.as_str()) {
            problems.push(CatalogProblem::new(&food.name, "duplicate name"));
        }

        for (nutrient, value) in food.nutrients_per_gram.iter() {
            if !value.is_finite() || value < 0.0 {
                problems.push(CatalogProblem::new(
                    &food.name,
                    format!("{} per gram is {}", nutrient.key(), value),
                ));
            }
        }

        if food.unit == FoodUnit::Piece {
            match food.piece_weight {
                Some(w) if w.is_finite() && w > 0.0 => {}
                _ => problems.push(CatalogProblem::new(
                    &food.name,
                    "piece food has no positive piece weight",
                )),
            }
        }

        if let Some(density) = food.density {
            if !density.is_finite() || density <= 0.0 {
                problems.push(CatalogProblem::new(
                    &food.name,
                    format!("density {} is not positive", density),
                ));
            }
        }

        for serving in &food.servings {
            if !serving.grams.is_finite() || serving.grams <= 0.0 {
                problems.push(CatalogProblem::new(
                    &food.name,
                    format!("serving '{}' has non-positive weight", serving.label),
                ));
            }
        }
    }

    problems
}

/// Check the embedded catalog
pub fn validate_catalog() -> Vec<CatalogProblem> {
    check_foods(&FOODS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Nutrient, NutrientVector};
    use crate::nutrition::calculate_contribution;

    #[test]
    fn test_catalog_loads_every_food() {
        assert_eq!(foods().len(), 125);
        assert_eq!(categories().len(), 10);
    }

    #[test]
    fn test_embedded_catalog_is_clean() {
        assert_eq!(validate_catalog(), Vec::<CatalogProblem>::new());
    }

    #[test]
    fn test_find_food_is_exact() {
        assert!(find_food_by_name("Whey Protein Powder").is_some());
        assert!(find_food_by_name("whey protein powder").is_none());
        assert!(matches!(
            require_food("Unicorn Steak"),
            Err(NutritionError::UnknownFood(_))
        ));
    }

    #[test]
    fn test_search() {
        let hits = search_foods("PANEER", 10);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|f| f.name.to_lowercase().contains("paneer")));

        let first = search_foods("", 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].name, foods()[0].name);

        assert!(search_foods("zzzz-no-such-food", 10).is_empty());
    }

    #[test]
    fn test_search_ignores_category() {
        assert!(search_foods("dairy", 50).is_empty());
        assert!(search_foods("beverages", 50).is_empty());
        assert!(!foods_by_category("Dairy & Eggs").is_empty());
    }

    #[test]
    fn test_foods_by_category() {
        let beverages = foods_by_category("beverages");
        assert_eq!(beverages.len(), 6);
        assert!(beverages.iter().all(|f| f.category == "Beverages"));
    }

    #[test]
    fn test_every_food_computes() {
        for food in foods() {
            let result = calculate_contribution(food, 1.0).unwrap();
            assert!(result.iter().all(|(_, v)| v.is_finite()), "{}", food.name);
        }
    }

    #[test]
    fn test_density_folded_into_milk() {
        let milk = find_food_by_name("Whole Milk").unwrap();
        assert_eq!(milk.unit, FoodUnit::Milliliter);
        assert_eq!(milk.density, Some(1.03));
    }

    #[test]
    fn test_check_foods_reports_problems() {
        let mut bad = FoodItem::new(
            "Broken",
            "Test",
            FoodUnit::Piece,
            NutrientVector::from_pairs([(Nutrient::Protein, -1.0), (Nutrient::Iron, f64::NAN)]),
        );
        bad.density = Some(0.0);
        let dup = FoodItem::new("Broken", "Test", FoodUnit::Gram, NutrientVector::zero());

        let problems = check_foods(&[bad, dup]);
        let issues: Vec<&str> = problems.iter().map(|p| p.issue.as_str()).collect();

        assert!(issues.iter().any(|i| i.starts_with("protein")));
        assert!(issues.iter().any(|i| i.starts_with("iron")));
        assert!(issues.contains(&"piece food has no positive piece weight"));
        assert!(issues.iter().any(|i| i.starts_with("density")));
        assert!(issues.contains(&"duplicate name"));
    }
}
