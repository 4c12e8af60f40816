//! RDA Tracker Status Tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog;

/// Food logging instructions for AI assistants
pub const LOGGING_INSTRUCTIONS: &str = r#"
# RDA Tracker Logging Instructions

This guide explains how to log food and read progress with the RDA Tracker tools.

## Overview

- Foods come from a fixed catalog. Nutrients are stored per gram.
- Each food has a unit: **gram**, **milliliter**, or **piece**. Quantities are always entered in that unit.
- A day's log is a list of (food, quantity, meal slot) entries. Totals and RDA progress are derived from it.

---

## Logging a Food

1. `search_foods` with a name fragment ("paneer", "rice") or a category.
2. Check the food's `unit` and `default_serving`.
3. `add_food` with the exact catalog `food_name` and a `quantity` in the food's unit.

| Unit | Quantity means | Example |
|------|----------------|---------|
| gram | grams | 150 g chicken → `quantity: 150` |
| milliliter | milliliters (converted with the food's density) | a glass of milk → `quantity: 250` |
| piece | count (converted with the piece weight) | 2 eggs → `quantity: 2` |

Do not convert pieces or milliliters to grams yourself.

If `quantity` is omitted the food's suggested quantity is used (when it has one).
If `meal_slot` is omitted it defaults from the local time: before 11:00 breakfast,
before 16:00 lunch, before 19:00 snack, otherwise dinner.

Quantities must be greater than 0.

---

## Editing

- `update_quantity` sets a new quantity.
- `adjust_quantity` steps by a delta (e.g. +1 / -1 scoop) and never goes below 1.
- `remove_food` deletes one entry; `reset_day` clears a whole day.

---

## Dates

All date parameters are `YYYY-MM-DD` and default to today (local time) when omitted.

---

## Progress

- `get_progress` reports totals, per-nutrient percent of target, and overall progress.
- Ranged targets (e.g. fat 60-70 g) are compared against their midpoint.
- Overall progress caps each nutrient at 100% before averaging, so over-eating one
  nutrient never hides a deficit in another.
- `display_percent` is capped at 200 for progress bars.
- `get_share_summary` gives a single headline over calories, protein, carbs and fat.

---

## Profiles

`list_profiles` / `select_profile` switch between the built-in RDA profiles.
The selection persists across sessions.
"#;

/// Service status information
#[derive(Debug, Serialize)]
pub struct RdaStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Catalog information
    pub catalog_foods: usize,
    pub rda_profiles: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> RdaStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        RdaStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            catalog_foods: catalog::foods().len(),
            rda_profiles: catalog::profiles().len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/rda_tracker.db"));
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.catalog_foods, 125);
        assert_eq!(status.process_id, std::process::id());
    }
}
