//! RDA Profile MCP Tools

use serde::Serialize;

use crate::catalog;
use crate::db::Database;
use crate::models::{Profile, Settings, Target};
use crate::nutrition::resolve_target;

/// Profile row for listing
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub activity: Option<String>,
    pub tracked_nutrients: usize,
    pub active: bool,
}

/// Response for list_profiles
#[derive(Debug, Serialize)]
pub struct ListProfilesResponse {
    pub active_profile: String,
    pub profiles: Vec<ProfileSummary>,
}

/// One resolved target
#[derive(Debug, Serialize)]
pub struct TargetDetail {
    pub category: &'static str,
    pub nutrient: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Single comparable value (range midpoint)
    pub target: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Response for get_profile
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub id: String,
    pub name: String,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub activity: Option<String>,
    pub active: bool,
    pub targets: Vec<TargetDetail>,
}

impl ProfileDetail {
    fn build(profile: &Profile, active: bool) -> Self {
        let targets = profile
            .targets()
            .map(|(category, nutrient, target)| {
                let (min, max) = match *target {
                    Target::Scalar(_) => (None, None),
                    Target::Range { min, max } => (min, max),
                };
                TargetDetail {
                    category: category.title(),
                    nutrient: nutrient.key(),
                    label: nutrient.label(),
                    unit: nutrient.unit(),
                    target: resolve_target(target),
                    min,
                    max,
                }
            })
            .collect();

        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            age: profile.age.clone(),
            gender: profile.gender.clone(),
            activity: profile.activity.clone(),
            active,
            targets,
        }
    }
}

/// The active profile, falling back to `default_profile`
pub fn active_profile(db: &Database, default_profile: &str) -> Result<&'static Profile, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Settings::active_profile(&conn, default_profile).map_err(|e| format!("Failed to load profile: {}", e))
}

pub fn list_profiles(db: &Database, default_profile: &str) -> Result<ListProfilesResponse, String> {
    let active = active_profile(db, default_profile)?;
    let profiles = catalog::profiles()
        .iter()
        .map(|p| ProfileSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            age: p.age.clone(),
            gender: p.gender.clone(),
            activity: p.activity.clone(),
            tracked_nutrients: p.tracked_count(),
            active: p.id == active.id,
        })
        .collect();

    Ok(ListProfilesResponse {
        active_profile: active.id.clone(),
        profiles,
    })
}

/// Targets for a profile; the active one when `id` is None
pub fn get_profile(
    db: &Database,
    id: Option<&str>,
    default_profile: &str,
) -> Result<Option<ProfileDetail>, String> {
    let active = active_profile(db, default_profile)?;
    let profile = match id {
        Some(id) => match catalog::find_profile(id) {
            Some(p) => p,
            None => return Ok(None),
        },
        None => active,
    };
    Ok(Some(ProfileDetail::build(profile, profile.id == active.id)))
}

pub fn select_profile(db: &Database, id: &str) -> Result<ProfileDetail, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Settings::set_active_profile(&conn, id).map_err(|e| e.to_string())?;
    Ok(ProfileDetail::build(profile, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_list_marks_active() {
        let db = setup();
        let list = list_profiles(&db, "male_adult").unwrap();
        assert_eq!(list.active_profile, "male_adult");
        assert_eq!(list.profiles.iter().filter(|p| p.active).count(), 1);
    }

    #[test]
    fn test_select_and_get() {
        let db = setup();
        let selected = select_profile(&db, "female_adult").unwrap();
        assert!(selected.active);

        let detail = get_profile(&db, None, "male_adult").unwrap().unwrap();
        assert_eq!(detail.id, "female_adult");
        let iron = detail.targets.iter().find(|t| t.nutrient == "iron").unwrap();
        assert_eq!(iron.target, 18.0);
        assert_eq!(iron.unit, "mg");

        let other = get_profile(&db, Some("male_adult"), "male_adult").unwrap().unwrap();
        assert!(!other.active);

        assert!(get_profile(&db, Some("toddler"), "male_adult").unwrap().is_none());
        assert!(select_profile(&db, "toddler").is_err());
    }
}
