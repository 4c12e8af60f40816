//! FDC nutrient name mapping
//!
//! FoodData Central reports amounts per 100 g under long descriptive names.
//! These map onto our per-gram nutrient keys.

use serde::Deserialize;

use crate::models::{FoodItem, Nutrient, NutrientVector};

/// Nutrients FDC can supply. Creatine has no FDC counterpart.
pub const CANONICAL_NUTRIENTS: [Nutrient; 16] = [
    Nutrient::Calories,
    Nutrient::Protein,
    Nutrient::Carbs,
    Nutrient::Fat,
    Nutrient::Omega3,
    Nutrient::Fiber,
    Nutrient::VitaminA,
    Nutrient::VitaminC,
    Nutrient::VitaminD,
    Nutrient::VitaminE,
    Nutrient::VitaminK,
    Nutrient::Calcium,
    Nutrient::Iron,
    Nutrient::Magnesium,
    Nutrient::Potassium,
    Nutrient::Zinc,
];

/// Name fragments per nutrient, checked in order. Fat is matched on
/// "Total lipid (fat)" only; the "Fatty acids, total ..." rows are subtotals.
const NAME_MAP: &[(&[&str], Nutrient)] = &[
    (&["Energy"], Nutrient::Calories),
    (&["Protein"], Nutrient::Protein),
    (&["Carbohydrate, by difference"], Nutrient::Carbs),
    (&["Fatty acids, total polyunsaturated n-3"], Nutrient::Omega3),
    (&["Total lipid (fat)"], Nutrient::Fat),
    (&["Fiber, total dietary"], Nutrient::Fiber),
    (&["Vitamin A, RAE"], Nutrient::VitaminA),
    (&["Vitamin C, total ascorbic acid"], Nutrient::VitaminC),
    (&["Vitamin D (D2 + D3)", "Vitamin D"], Nutrient::VitaminD),
    (&["Vitamin E (alpha-tocopherol)"], Nutrient::VitaminE),
    (&["Vitamin K (phylloquinone)"], Nutrient::VitaminK),
    (&["Calcium, Ca"], Nutrient::Calcium),
    (&["Iron, Fe"], Nutrient::Iron),
    (&["Magnesium, Mg"], Nutrient::Magnesium),
    (&["Potassium, K"], Nutrient::Potassium),
    (&["Zinc, Zn"], Nutrient::Zinc),
];

/// Map an FDC nutrient name to our key
pub fn canonical_nutrient(name: &str) -> Option<Nutrient> {
    NAME_MAP
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
        .map(|(_, nutrient)| *nutrient)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcNutrientRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

/// One entry of a food's `foodNutrients`. Both the nested and flat shapes occur.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFoodNutrient {
    #[serde(default)]
    pub nutrient: Option<FdcNutrientRef>,
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl FdcFoodNutrient {
    fn name(&self) -> &str {
        self.nutrient
            .as_ref()
            .and_then(|n| n.name.as_deref())
            .or(self.nutrient_name.as_deref())
            .unwrap_or("")
    }

    fn unit(&self) -> &str {
        self.nutrient
            .as_ref()
            .and_then(|n| n.unit_name.as_deref())
            .or(self.unit_name.as_deref())
            .unwrap_or("")
    }
}

/// Food details from `/v1/food/{fdcId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFoodDetails {
    pub fdc_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FdcFoodNutrient>,
}

/// Per-gram vector from per-100 g FDC amounts
///
/// Energy reported in kJ is skipped in favour of the kcal entry. Vitamin D in
/// IU is skipped so the mcg entry wins. Missing or non-finite amounts are 0.
pub fn extract_per_gram(details: &FdcFoodDetails) -> NutrientVector {
    let mut per_gram = NutrientVector::zero();

    for entry in &details.food_nutrients {
        let Some(nutrient) = canonical_nutrient(entry.name()) else {
            continue;
        };

        let unit = entry.unit().to_lowercase();
        if nutrient == Nutrient::Calories && unit == "kj" {
            continue;
        }
        if nutrient == Nutrient::VitaminD && unit == "iu" {
            continue;
        }

        per_gram[nutrient] = match entry.amount {
            Some(amount) if amount.is_finite() => amount / 100.0,
            _ => 0.0,
        };
    }

    per_gram
}

/// Merge imported values into a food
///
/// With `overwrite`, every canonical nutrient takes the incoming finite value.
/// Otherwise only nutrients that are currently zero (or non-finite) are filled.
/// Creatine is never touched.
pub fn merge_per_gram(food: &FoodItem, per_gram: &NutrientVector, overwrite: bool) -> FoodItem {
    let mut merged = food.clone();

    for nutrient in CANONICAL_NUTRIENTS {
        let existing = merged.nutrients_per_gram[nutrient];
        let incoming = per_gram[nutrient];
        let has_value = existing.is_finite() && existing != 0.0;

        if overwrite {
            if incoming.is_finite() {
                merged.nutrients_per_gram[nutrient] = incoming;
            }
        } else if !has_value {
            merged.nutrients_per_gram[nutrient] = if incoming.is_finite() { incoming } else { 0.0 };
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodUnit;

    fn details(json: &str) -> FdcFoodDetails {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_name_mapping() {
        assert_eq!(canonical_nutrient("Total lipid (fat)"), Some(Nutrient::Fat));
        assert_eq!(
            canonical_nutrient("Fatty acids, total polyunsaturated n-3"),
            Some(Nutrient::Omega3)
        );
        assert_eq!(canonical_nutrient("Vitamin D (D2 + D3)"), Some(Nutrient::VitaminD));
        assert_eq!(canonical_nutrient("Energy (Atwater General Factors)"), Some(Nutrient::Calories));
        assert_eq!(canonical_nutrient("Sodium, Na"), None);
        assert_eq!(canonical_nutrient("Fatty acids, total saturated"), None);
        assert_eq!(canonical_nutrient("Fatty acids, total trans"), None);
    }

    #[test]
    fn test_fat_subtotals_do_not_replace_total_lipid() {
        let d = details(
            r#"{"fdcId": 2, "foodNutrients": [
                {"nutrient": {"name": "Total lipid (fat)", "unitName": "g"}, "amount": 3.57},
                {"nutrient": {"name": "Fatty acids, total saturated", "unitName": "g"}, "amount": 1.01},
                {"nutrient": {"name": "Fatty acids, total monounsaturated", "unitName": "g"}, "amount": 1.24},
                {"nutrient": {"name": "Fatty acids, total polyunsaturated", "unitName": "g"}, "amount": 0.76},
                {"nutrient": {"name": "Fatty acids, total polyunsaturated n-3", "unitName": "g"}, "amount": 0.1}
            ]}"#,
        );
        let per_gram = extract_per_gram(&d);
        assert!((per_gram[Nutrient::Fat] - 0.0357).abs() < 1e-9);
        assert!((per_gram[Nutrient::Omega3] - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_extract_skips_kj_and_divides_by_100() {
        let d = details(
            r#"{
                "fdcId": 171077,
                "description": "Chicken, broiler, breast, roasted",
                "foodNutrients": [
                    {"nutrient": {"name": "Energy", "unitName": "kJ"}, "amount": 690},
                    {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 165},
                    {"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 31.0},
                    {"nutrientName": "Iron, Fe", "unitName": "mg", "amount": 1.04},
                    {"nutrient": {"name": "Sodium, Na", "unitName": "mg"}, "amount": 74}
                ]
            }"#,
        );
        let per_gram = extract_per_gram(&d);
        assert!((per_gram[Nutrient::Calories] - 1.65).abs() < 1e-9);
        assert!((per_gram[Nutrient::Protein] - 0.31).abs() < 1e-9);
        assert!((per_gram[Nutrient::Iron] - 0.0104).abs() < 1e-9);
        assert_eq!(per_gram[Nutrient::Zinc], 0.0);
    }

    #[test]
    fn test_extract_kj_only_leaves_calories_zero() {
        let d = details(
            r#"{"fdcId": 1, "foodNutrients": [
                {"nutrient": {"name": "Energy", "unitName": "kJ"}, "amount": 690},
                {"nutrient": {"name": "Protein", "unitName": "g"}}
            ]}"#,
        );
        let per_gram = extract_per_gram(&d);
        assert_eq!(per_gram[Nutrient::Calories], 0.0);
        assert_eq!(per_gram[Nutrient::Protein], 0.0);
    }

    #[test]
    fn test_merge_fill_only() {
        let food = FoodItem::new(
            "Test",
            "Test",
            FoodUnit::Gram,
            NutrientVector::from_pairs([(Nutrient::Protein, 0.2), (Nutrient::Creatine, 0.5)]),
        );
        let incoming = NutrientVector::from_pairs([
            (Nutrient::Protein, 0.3),
            (Nutrient::Iron, 0.01),
            (Nutrient::Creatine, 9.0),
        ]);

        let merged = merge_per_gram(&food, &incoming, false);
        assert_eq!(merged.nutrients_per_gram[Nutrient::Protein], 0.2);
        assert_eq!(merged.nutrients_per_gram[Nutrient::Iron], 0.01);
        assert_eq!(merged.nutrients_per_gram[Nutrient::Creatine], 0.5);

        let overwritten = merge_per_gram(&food, &incoming, true);
        assert_eq!(overwritten.nutrients_per_gram[Nutrient::Protein], 0.3);
        assert_eq!(overwritten.nutrients_per_gram[Nutrient::Creatine], 0.5);
    }
}
