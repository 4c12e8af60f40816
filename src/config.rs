//! Runtime configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;

use crate::catalog::DEFAULT_PROFILE_ID;

pub const DATABASE_PATH_VAR: &str = "RDA_DATABASE_PATH";
pub const DEFAULT_PROFILE_VAR: &str = "RDA_DEFAULT_PROFILE";
pub const FDC_API_KEY_VAR: &str = "FDC_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    /// Profile used until one is selected
    pub default_profile: String,
    pub fdc_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        let default_profile = std::env::var(DEFAULT_PROFILE_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_ID.to_string());

        let fdc_api_key = std::env::var(FDC_API_KEY_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            database_path,
            default_profile,
            fdc_api_key,
        }
    }
}

/// Project root when running from target/{debug,release}, else the exe directory
pub fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }
    path
}

fn default_database_path() -> PathBuf {
    let mut path = project_root();
    path.push("data");
    path.push("rda_tracker.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path_shape() {
        let path = default_database_path();
        assert!(path.ends_with("data/rda_tracker.db"));
    }
}
