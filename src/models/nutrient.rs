//! Nutrient keys and the fixed-size nutrient vector
//!
//! Used by catalog foods (per gram), log contributions, and daily totals.

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The closed set of tracked nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Omega3,
    Fiber,
    Creatine,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Calcium,
    Iron,
    Magnesium,
    Potassium,
    Zinc,
}

impl Nutrient {
    pub const COUNT: usize = 17;

    pub const ALL: [Nutrient; Nutrient::COUNT] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Omega3,
        Nutrient::Fiber,
        Nutrient::Creatine,
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

    /// Position in `Nutrient::ALL` and in `NutrientVector`
    pub fn index(self) -> usize {
        self as usize
    }

    /// The data-format key (camelCase)
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
            Nutrient::Omega3 => "omega3",
            Nutrient::Fiber => "fiber",
            Nutrient::Creatine => "creatine",
            Nutrient::VitaminA => "vitaminA",
            Nutrient::VitaminC => "vitaminC",
            Nutrient::VitaminD => "vitaminD",
            Nutrient::VitaminE => "vitaminE",
            Nutrient::VitaminK => "vitaminK",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Potassium => "potassium",
            Nutrient::Zinc => "zinc",
        }
    }

    /// Parse a data-format key. Unknown keys return None.
    pub fn from_key(key: &str) -> Option<Self> {
        Nutrient::ALL.iter().copied().find(|n| n.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbohydrates",
            Nutrient::Fat => "Fat",
            Nutrient::Omega3 => "Omega-3",
            Nutrient::Fiber => "Fiber",
            Nutrient::Creatine => "Creatine",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminE => "Vitamin E",
            Nutrient::VitaminK => "Vitamin K",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Zinc => "Zinc",
        }
    }

    /// Display unit for amounts of this nutrient
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein
            | Nutrient::Carbs
            | Nutrient::Fat
            | Nutrient::Omega3
            | Nutrient::Fiber
            | Nutrient::Creatine => "g",
            Nutrient::VitaminA | Nutrient::VitaminD | Nutrient::VitaminK => "mcg",
            Nutrient::VitaminC
            | Nutrient::VitaminE
            | Nutrient::Calcium
            | Nutrient::Iron
            | Nutrient::Magnesium
            | Nutrient::Potassium
            | Nutrient::Zinc => "mg",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Amounts for every tracked nutrient
///
/// Always complete: a key missing from source data is 0. Serializes as a
/// camelCase map in `Nutrient::ALL` order; deserializing ignores unknown keys
/// and non-numeric or non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct NutrientVector([f64; Nutrient::COUNT]);

impl NutrientVector {
    /// Create a vector with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from (nutrient, amount) pairs; unspecified nutrients are 0
    pub fn from_pairs<I: IntoIterator<Item = (Nutrient, f64)>>(pairs: I) -> Self {
        let mut v = Self::zero();
        for (n, amount) in pairs {
            v[n] = amount;
        }
        v
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0[nutrient.index()]
    }

    /// Scale every amount by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut out = *self;
        for v in out.0.iter_mut() {
            *v *= multiplier;
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.0[n.index()]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl Index<Nutrient> for NutrientVector {
    type Output = f64;

    fn index(&self, nutrient: Nutrient) -> &f64 {
        &self.0[nutrient.index()]
    }
}

impl IndexMut<Nutrient> for NutrientVector {
    fn index_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        &mut self.0[nutrient.index()]
    }
}

impl AddAssign for NutrientVector {
    fn add_assign(&mut self, other: NutrientVector) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += *b;
        }
    }
}

impl Add for NutrientVector {
    type Output = NutrientVector;

    fn add(mut self, other: NutrientVector) -> NutrientVector {
        self += other;
        self
    }
}

impl Mul<f64> for NutrientVector {
    type Output = NutrientVector;

    fn mul(self, multiplier: f64) -> NutrientVector {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutrientVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientVector::zero(), |acc, n| acc + n)
    }
}

impl From<HashMap<String, serde_json::Value>> for NutrientVector {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        let mut v = NutrientVector::zero();
        for (key, value) in raw {
            let Some(nutrient) = Nutrient::from_key(&key) else {
                tracing::debug!("Ignoring unknown nutrient key '{}'", key);
                continue;
            };
            match value.as_f64() {
                Some(amount) if amount.is_finite() => v[nutrient] = amount,
                _ => tracing::debug!("Non-numeric value for '{}' treated as 0", key),
            }
        }
        v
    }
}

impl Serialize for NutrientVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Nutrient::COUNT))?;
        for (n, amount) in self.iter() {
            map.serialize_entry(n.key(), &amount)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_serde_names() {
        for n in Nutrient::ALL {
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, format!("\"{}\"", n.key()));
            assert_eq!(Nutrient::from_key(n.key()), Some(n));
        }
        assert_eq!(Nutrient::from_key("sodium"), None);
    }

    #[test]
    fn test_all_matches_index_order() {
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(n.index(), i);
        }
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let v: NutrientVector =
            serde_json::from_str(r#"{"calories": 1.4, "protein": 0.12}"#).unwrap();
        assert_eq!(v[Nutrient::Calories], 1.4);
        assert_eq!(v[Nutrient::Protein], 0.12);
        assert_eq!(v[Nutrient::Zinc], 0.0);
    }

    #[test]
    fn test_unknown_and_non_numeric_values_are_ignored() {
        let v: NutrientVector =
            serde_json::from_str(r#"{"sodium": 4.0, "iron": null, "fat": "x", "zinc": 0.01}"#)
                .unwrap();
        assert_eq!(v[Nutrient::Iron], 0.0);
        assert_eq!(v[Nutrient::Fat], 0.0);
        assert_eq!(v[Nutrient::Zinc], 0.01);
    }

    #[test]
    fn test_serializes_every_key() {
        let json = serde_json::to_value(NutrientVector::zero()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), Nutrient::COUNT);
        assert!(obj.contains_key("vitaminA"));
        assert!(obj.contains_key("omega3"));
    }

    #[test]
    fn test_add_and_scale() {
        let a = NutrientVector::from_pairs([(Nutrient::Protein, 10.0)]);
        let b = NutrientVector::from_pairs([(Nutrient::Protein, 5.0), (Nutrient::Fat, 2.0)]);
        let sum = a + b;
        assert_eq!(sum[Nutrient::Protein], 15.0);
        assert_eq!(sum[Nutrient::Fat], 2.0);
        assert_eq!((sum * 2.0)[Nutrient::Protein], 30.0);
        let total: NutrientVector = vec![a, b].into_iter().sum();
        assert_eq!(total, sum);
    }

    #[test]
    fn test_units() {
        assert_eq!(Nutrient::Calories.unit(), "kcal");
        assert_eq!(Nutrient::VitaminD.unit(), "mcg");
        assert_eq!(Nutrient::Iron.unit(), "mg");
        assert_eq!(Nutrient::Omega3.unit(), "g");
    }
}
