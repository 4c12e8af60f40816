//! Share summary
//!
//! The headline numbers for a shareable progress card. Only the text is
//! produced here; rendering an image is left to the client.

use serde::Serialize;

use crate::models::{Nutrient, NutrientVector, Profile};

use super::rda::{percent_of, resolve_target};

/// Nutrients the share headline averages over
pub const SHARE_NUTRIENTS: [Nutrient; 4] = [
    Nutrient::Calories,
    Nutrient::Protein,
    Nutrient::Carbs,
    Nutrient::Fat,
];

#[derive(Debug, Clone, Serialize)]
pub struct ShareSummary {
    pub date: String,
    pub profile_name: String,
    /// Whole-number headline, 0..=100
    pub progress: u32,
    pub message: &'static str,
    pub share_text: String,
    pub calories: f64,
    pub protein: f64,
    pub entry_count: usize,
}

impl ShareSummary {
    pub fn build(date: &str, totals: &NutrientVector, profile: &Profile, entry_count: usize) -> Self {
        let progress = share_progress(totals, profile);
        Self {
            date: date.to_string(),
            profile_name: profile.name.clone(),
            progress,
            message: share_message(progress),
            share_text: format!("Hit {}% of my daily nutrition goals!", progress),
            calories: totals[Nutrient::Calories],
            protein: totals[Nutrient::Protein],
            entry_count,
        }
    }
}

/// Mean macro progress, uncapped per nutrient, rounded and capped at 100
///
/// Macros the profile doesn't target count as 0.
pub fn share_progress(totals: &NutrientVector, profile: &Profile) -> u32 {
    let sum: f64 = SHARE_NUTRIENTS
        .iter()
        .map(|n| {
            let target = profile.target_for(*n).map(resolve_target).unwrap_or(0.0);
            percent_of(totals[*n], target)
        })
        .sum();
    let mean = sum / SHARE_NUTRIENTS.len() as f64;
    mean.round().clamp(0.0, 100.0) as u32
}

pub fn share_message(progress: u32) -> &'static str {
    match progress {
        90.. => "Crushing it!",
        70..=89 => "On track",
        50..=69 => "Getting there",
        _ => "Keep going",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Target, TargetCategory};

    fn profile() -> Profile {
        Profile::new("p", "Active Female Adult")
            .with_target(TargetCategory::Macros, Nutrient::Calories, Target::Scalar(2000.0))
            .with_target(TargetCategory::Macros, Nutrient::Protein, Target::Scalar(100.0))
            .with_target(TargetCategory::Macros, Nutrient::Carbs, Target::Scalar(250.0))
            .with_target(TargetCategory::Macros, Nutrient::Fat, Target::range(60.0, 70.0))
    }

    #[test]
    fn test_empty_day() {
        let summary = ShareSummary::build("2025-01-09", &NutrientVector::zero(), &profile(), 0);
        assert_eq!(summary.progress, 0);
        assert_eq!(summary.message, "Keep going");
        assert_eq!(summary.share_text, "Hit 0% of my daily nutrition goals!");
    }

    #[test]
    fn test_over_consumption_caps_at_100() {
        let totals = NutrientVector::from_pairs([
            (Nutrient::Calories, 10000.0),
            (Nutrient::Protein, 500.0),
            (Nutrient::Carbs, 1000.0),
            (Nutrient::Fat, 400.0),
        ]);
        assert_eq!(share_progress(&totals, &profile()), 100);
    }

    #[test]
    fn test_one_macro_can_carry_the_headline() {
        // calories 300%, others 0% -> 75
        let totals = NutrientVector::from_pairs([(Nutrient::Calories, 6000.0)]);
        assert_eq!(share_progress(&totals, &profile()), 75);
        assert_eq!(share_message(75), "On track");
    }

    #[test]
    fn test_messages() {
        assert_eq!(share_message(95), "Crushing it!");
        assert_eq!(share_message(90), "Crushing it!");
        assert_eq!(share_message(55), "Getting there");
        assert_eq!(share_message(49), "Keep going");
    }
}
