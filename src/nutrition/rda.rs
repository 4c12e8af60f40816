//! RDA target resolution and progress evaluation

use serde::Serialize;

use crate::models::{Nutrient, NutrientVector, Profile, Target, TargetCategory};

/// Upper bound for per-nutrient progress bars
pub const DISPLAY_CAP: f64 = 200.0;

/// A nutrient can contribute at most "fully met" to the overall average
pub const OVERALL_CAP: f64 = 100.0;

/// Resolve a target to one comparable number
///
/// Ranges resolve to their midpoint, or to whichever bound is finite when
/// only one is. A range with no finite bound resolves to 0.
pub fn resolve_target(target: &Target) -> f64 {
    match *target {
        Target::Scalar(value) => value,
        Target::Range { min, max } => {
            let min = min.filter(|v| v.is_finite());
            let max = max.filter(|v| v.is_finite());
            match (min, max) {
                (Some(min), Some(max)) => (min + max) / 2.0,
                (Some(bound), None) | (None, Some(bound)) => bound,
                (None, None) => 0.0,
            }
        }
    }
}

/// Consumed amount as a percentage of target, uncapped
///
/// A target of zero or less means no tracked goal and yields 0. Non-finite
/// inputs also yield 0 so NaN never reaches a caller's average.
pub fn percent_of(consumed: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() || !consumed.is_finite() {
        return 0.0;
    }
    consumed / target * 100.0
}

/// Percentage capped for progress-bar rendering
pub fn display_percent(percent: f64) -> f64 {
    percent.min(DISPLAY_CAP)
}

/// Unweighted mean of per-nutrient progress, each capped at 100
///
/// Every nutrient in the profile's four categories counts once. A profile
/// with no targets yields 0.
pub fn overall_progress(consumed: &NutrientVector, profile: &Profile) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (_, nutrient, target) in profile.targets() {
        let percent = percent_of(consumed[nutrient], resolve_target(target));
        sum += percent.min(OVERALL_CAP);
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Coarse status bucket for a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    /// 100% or more
    Met,
    /// 75% or more
    Close,
    /// 50% or more
    Halfway,
    Low,
}

impl ProgressTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            ProgressTier::Met
        } else if percent >= 75.0 {
            ProgressTier::Close
        } else if percent >= 50.0 {
            ProgressTier::Halfway
        } else {
            ProgressTier::Low
        }
    }
}

/// Progress for one tracked nutrient
#[derive(Debug, Clone, Serialize)]
pub struct NutrientProgress {
    pub category: TargetCategory,
    pub nutrient: Nutrient,
    pub label: &'static str,
    pub unit: &'static str,
    pub consumed: f64,
    pub target: f64,
    pub percent: f64,
    pub display_percent: f64,
    pub tier: ProgressTier,
}

/// One row per nutrient the profile tracks, in category order
pub fn nutrient_progress(consumed: &NutrientVector, profile: &Profile) -> Vec<NutrientProgress> {
    profile
        .targets()
        .map(|(category, nutrient, target)| {
            let target = resolve_target(target);
            let percent = percent_of(consumed[nutrient], target);
            NutrientProgress {
                category,
                nutrient,
                label: nutrient.label(),
                unit: nutrient.unit(),
                consumed: consumed[nutrient],
                target,
                percent,
                display_percent: display_percent(percent),
                tier: ProgressTier::from_percent(percent),
            }
        })
        .collect()
}

/// Totals, per-nutrient rows, and the overall score for a profile
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub profile_id: String,
    pub profile_name: String,
    pub totals: NutrientVector,
    pub nutrients: Vec<NutrientProgress>,
    pub overall_progress: f64,
    pub overall_tier: ProgressTier,
}

impl ProgressReport {
    pub fn build(totals: NutrientVector, profile: &Profile) -> Self {
        let overall = overall_progress(&totals, profile);
        Self {
            profile_id: profile.id.clone(),
            profile_name: profile.name.clone(),
            totals,
            nutrients: nutrient_progress(&totals, profile),
            overall_progress: overall,
            overall_tier: ProgressTier::from_percent(overall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new("test", "Test")
            .with_target(TargetCategory::Macros, Nutrient::Calories, Target::Scalar(2000.0))
            .with_target(TargetCategory::Macros, Nutrient::Protein, Target::Scalar(100.0))
            .with_target(TargetCategory::Macros, Nutrient::Fat, Target::range(60.0, 70.0))
            .with_target(TargetCategory::Minerals, Nutrient::Iron, Target::Scalar(18.0))
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target(&Target::range(60.0, 70.0)), 65.0);
        assert_eq!(resolve_target(&Target::Scalar(2500.0)), 2500.0);
        assert_eq!(resolve_target(&Target::Range { min: Some(60.0), max: None }), 60.0);
        assert_eq!(resolve_target(&Target::Range { min: None, max: Some(70.0) }), 70.0);
        assert_eq!(resolve_target(&Target::Range { min: Some(f64::NAN), max: Some(70.0) }), 70.0);
        assert_eq!(resolve_target(&Target::Range { min: None, max: None }), 0.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(50.0, 0.0), 0.0);
        assert_eq!(percent_of(50.0, -5.0), 0.0);
        assert_eq!(percent_of(50.0, f64::NAN), 0.0);
        assert!((percent_of(330.0, 2000.0) - 16.5).abs() < 1e-9);
        // Not capped at this level
        assert_eq!(percent_of(500.0, 100.0), 500.0);
    }

    #[test]
    fn test_display_percent_caps_at_200() {
        assert_eq!(display_percent(450.0), 200.0);
        assert_eq!(display_percent(75.0), 75.0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ProgressTier::from_percent(120.0), ProgressTier::Met);
        assert_eq!(ProgressTier::from_percent(100.0), ProgressTier::Met);
        assert_eq!(ProgressTier::from_percent(75.0), ProgressTier::Close);
        assert_eq!(ProgressTier::from_percent(50.0), ProgressTier::Halfway);
        assert_eq!(ProgressTier::from_percent(49.9), ProgressTier::Low);
    }

    #[test]
    fn test_overall_progress_caps_each_nutrient() {
        let consumed = NutrientVector::from_pairs([
            (Nutrient::Calories, 10000.0),
            (Nutrient::Protein, 300.0),
            (Nutrient::Fat, 650.0),
            (Nutrient::Iron, 180.0),
        ]);
        assert_eq!(overall_progress(&consumed, &profile()), 100.0);
    }

    #[test]
    fn test_overall_progress_is_unweighted_mean() {
        // calories 50%, protein 100%, fat 0%, iron 0%
        let consumed = NutrientVector::from_pairs([
            (Nutrient::Calories, 1000.0),
            (Nutrient::Protein, 100.0),
        ]);
        assert!((overall_progress(&consumed, &profile()) - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_overall_progress_over_consumption_cannot_mask_deficits() {
        let consumed = NutrientVector::from_pairs([(Nutrient::Calories, 10000.0)]);
        assert!((overall_progress(&consumed, &profile()) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_progress_empty_profile() {
        let consumed = NutrientVector::from_pairs([(Nutrient::Calories, 1000.0)]);
        assert_eq!(overall_progress(&consumed, &Profile::new("empty", "Empty")), 0.0);
    }

    #[test]
    fn test_zero_target_counts_as_zero() {
        let p = Profile::new("z", "Z")
            .with_target(TargetCategory::Macros, Nutrient::Calories, Target::Scalar(0.0))
            .with_target(TargetCategory::Macros, Nutrient::Protein, Target::Scalar(100.0));
        let consumed = NutrientVector::from_pairs([(Nutrient::Calories, 500.0), (Nutrient::Protein, 100.0)]);
        let overall = overall_progress(&consumed, &p);
        assert!(overall.is_finite());
        assert_eq!(overall, 50.0);
    }

    #[test]
    fn test_untracked_nutrients_are_excluded() {
        let consumed = NutrientVector::from_pairs([(Nutrient::Creatine, 5.0)]);
        let rows = nutrient_progress(&consumed, &profile());
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.nutrient != Nutrient::Creatine));
    }

    #[test]
    fn test_report_rows() {
        let consumed = NutrientVector::from_pairs([(Nutrient::Fat, 130.0)]);
        let report = ProgressReport::build(consumed, &profile());
        let fat = report.nutrients.iter().find(|r| r.nutrient == Nutrient::Fat).unwrap();
        assert_eq!(fat.target, 65.0);
        assert_eq!(fat.percent, 200.0);
        assert_eq!(fat.display_percent, 200.0);
        assert_eq!(fat.tier, ProgressTier::Met);
        assert_eq!(fat.unit, "g");
        assert_eq!(report.overall_tier, ProgressTier::Low);
    }
}
