//! RDA profile model
//!
//! Daily targets per nutrient, partitioned by category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Nutrient;

/// A daily target: a single amount or an acceptable range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Scalar(f64),
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

impl Target {
    pub fn range(min: f64, max: f64) -> Self {
        Target::Range {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Target category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCategory {
    Macros,
    Minerals,
    Vitamins,
    Fats,
}

impl TargetCategory {
    pub const ALL: [TargetCategory; 4] = [
        TargetCategory::Macros,
        TargetCategory::Minerals,
        TargetCategory::Vitamins,
        TargetCategory::Fats,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TargetCategory::Macros => "Macronutrients",
            TargetCategory::Minerals => "Minerals",
            TargetCategory::Vitamins => "Vitamins",
            TargetCategory::Fats => "Essential Fats",
        }
    }
}

/// An RDA profile. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(rename = "macros", default)]
    pub macro_targets: BTreeMap<Nutrient, Target>,
    #[serde(rename = "minerals", default)]
    pub mineral_targets: BTreeMap<Nutrient, Target>,
    #[serde(rename = "vitamins", default)]
    pub vitamin_targets: BTreeMap<Nutrient, Target>,
    #[serde(rename = "fats", default)]
    pub fat_targets: BTreeMap<Nutrient, Target>,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            gender: None,
            activity: None,
            macro_targets: BTreeMap::new(),
            mineral_targets: BTreeMap::new(),
            vitamin_targets: BTreeMap::new(),
            fat_targets: BTreeMap::new(),
        }
    }

    pub fn category(&self, category: TargetCategory) -> &BTreeMap<Nutrient, Target> {
        match category {
            TargetCategory::Macros => &self.macro_targets,
            TargetCategory::Minerals => &self.mineral_targets,
            TargetCategory::Vitamins => &self.vitamin_targets,
            TargetCategory::Fats => &self.fat_targets,
        }
    }

    pub fn category_mut(&mut self, category: TargetCategory) -> &mut BTreeMap<Nutrient, Target> {
        match category {
            TargetCategory::Macros => &mut self.macro_targets,
            TargetCategory::Minerals => &mut self.mineral_targets,
            TargetCategory::Vitamins => &mut self.vitamin_targets,
            TargetCategory::Fats => &mut self.fat_targets,
        }
    }

    /// Builder-style insert, mainly for tests and ad hoc profiles
    pub fn with_target(mut self, category: TargetCategory, nutrient: Nutrient, target: Target) -> Self {
        self.category_mut(category).insert(nutrient, target);
        self
    }

    /// Every (category, nutrient, target) across all four categories
    pub fn targets(&self) -> impl Iterator<Item = (TargetCategory, Nutrient, &Target)> + '_ {
        TargetCategory::ALL.into_iter().flat_map(move |category| {
            self.category(category)
                .iter()
                .map(move |(nutrient, target)| (category, *nutrient, target))
        })
    }

    /// First target found for a nutrient, searching categories in order
    pub fn target_for(&self, nutrient: Nutrient) -> Option<&Target> {
        TargetCategory::ALL
            .into_iter()
            .find_map(|category| self.category(category).get(&nutrient))
    }

    pub fn tracked_count(&self) -> usize {
        TargetCategory::ALL
            .into_iter()
            .map(|category| self.category(category).len())
            .sum()
    }
}
