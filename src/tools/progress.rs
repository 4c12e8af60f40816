//! Progress MCP Tools
//!
//! Daily RDA progress and the share summary.

use serde::Serialize;

use crate::catalog;
use crate::db::Database;
use crate::models::DATE_FORMAT;
use crate::nutrition::{aggregate, ProgressReport, ShareSummary};

use super::log::{load_day, resolve_date};
use super::profiles::active_profile;

/// Response for get_progress
#[derive(Debug, Serialize)]
pub struct DayProgress {
    pub date: String,
    pub entry_count: usize,
    #[serde(flatten)]
    pub report: ProgressReport,
}

/// Progress for a day against a profile (the active one unless given)
pub fn get_progress(
    db: &Database,
    date: Option<&str>,
    profile_id: Option<&str>,
    default_profile: &str,
) -> Result<DayProgress, String> {
    let log_date = resolve_date(date)?;
    let profile = match profile_id {
        Some(id) => catalog::require_profile(id).map_err(|e| e.to_string())?,
        None => active_profile(db, default_profile)?,
    };

    let entries = load_day(db, log_date)?;
    let totals = aggregate(&entries).map_err(|e| e.to_string())?;

    Ok(DayProgress {
        date: log_date.format(DATE_FORMAT).to_string(),
        entry_count: entries.len(),
        report: ProgressReport::build(totals, profile),
    })
}

/// Headline numbers for sharing a day's progress
pub fn get_share_summary(
    db: &Database,
    date: Option<&str>,
    default_profile: &str,
) -> Result<ShareSummary, String> {
    let log_date = resolve_date(date)?;
    let profile = active_profile(db, default_profile)?;
    let entries = load_day(db, log_date)?;
    let totals = aggregate(&entries).map_err(|e| e.to_string())?;

    Ok(ShareSummary::build(
        &log_date.format(DATE_FORMAT).to_string(),
        &totals,
        profile,
        entries.len(),
    ))
}
