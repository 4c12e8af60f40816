//! Built-in RDA profiles

use std::sync::LazyLock;

use serde::Deserialize;

use crate::models::Profile;
use crate::nutrition::{NutritionError, NutritionResult};

/// Profile used until one is selected
pub const DEFAULT_PROFILE_ID: &str = "male_adult";

const PROFILES_JSON: &str = include_str!("data/profiles.json");

#[derive(Deserialize)]
struct ProfileFile {
    profiles: Vec<Profile>,
}

static PROFILES: LazyLock<Vec<Profile>> = LazyLock::new(|| {
    let file: ProfileFile =
        serde_json::from_str(PROFILES_JSON).expect("embedded profiles.json is not valid profile data");
    file.profiles
});

pub fn profiles() -> &'static [Profile] {
    &PROFILES
}

pub fn find_profile(id: &str) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.id == id)
}

/// Lookup that fails with `UnknownProfile`
pub fn require_profile(id: &str) -> NutritionResult<&'static Profile> {
    find_profile(id).ok_or_else(|| NutritionError::UnknownProfile(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Nutrient, Target, TargetCategory};
    use crate::nutrition::resolve_target;

    #[test]
    fn test_builtin_profiles() {
        assert_eq!(profiles().len(), 2);
        let male = find_profile(DEFAULT_PROFILE_ID).unwrap();
        assert_eq!(male.name, "Active Male Adult");
        assert_eq!(male.gender.as_deref(), Some("Male"));

        let female = require_profile("female_adult").unwrap();
        assert_eq!(female.name, "Active Female Adult");
        assert!(require_profile("toddler").is_err());
    }

    #[test]
    fn test_profile_targets() {
        let male = find_profile("male_adult").unwrap();
        assert_eq!(
            male.category(TargetCategory::Macros).get(&Nutrient::Calories),
            Some(&Target::Scalar(2500.0))
        );
        assert_eq!(
            male.category(TargetCategory::Fats).get(&Nutrient::Omega3),
            Some(&Target::Scalar(1.6))
        );
        let iron = male.target_for(Nutrient::Iron).map(resolve_target);
        assert_eq!(iron, Some(8.0));
        assert_eq!(male.tracked_count(), 14);
    }
}
