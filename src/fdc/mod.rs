//! USDA FoodData Central importer
//!
//! Looks up catalog foods in FDC and merges the per-gram values it reports.
//! Results are returned for review; nothing is written back to the catalog.

pub mod client;
pub mod mapping;

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::models::{FoodItem, NutrientVector};

pub use client::{best_hit, FdcClient, FdcSearchHit, FDC_BASE_URL};
pub use mapping::{
    canonical_nutrient, extract_per_gram, merge_per_gram, FdcFoodDetails, CANONICAL_NUTRIENTS,
};

#[derive(Debug, Error)]
pub enum FdcError {
    #[error("FDC API key is required")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },
}

pub type FdcResult<T> = Result<T, FdcError>;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Replace existing values instead of only filling zeros
    pub overwrite: bool,
    /// Pause between foods
    pub delay: Duration,
    /// Stop after this many foods
    pub limit: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            delay: Duration::from_millis(150),
            limit: None,
        }
    }
}

/// A candidate update for one catalog food
#[derive(Debug, Clone, Serialize)]
pub struct FoodUpdate {
    pub name: String,
    pub fdc_id: i64,
    pub fdc_description: String,
    pub per_gram: NutrientVector,
    pub updated: FoodItem,
}

/// A food that couldn't be looked up
#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub updates: Vec<FoodUpdate>,
    /// Foods with no search hit
    pub unmatched: Vec<String>,
    pub failures: Vec<ImportFailure>,
}

/// Look up one food and build its merged update. `Ok(None)` when FDC has no match.
pub fn import_food(client: &FdcClient, food: &FoodItem, overwrite: bool) -> FdcResult<Option<FoodUpdate>> {
    let Some(hit) = client.search(&food.name)? else {
        return Ok(None);
    };
    let details = client.food_details(hit.fdc_id)?;
    let per_gram = extract_per_gram(&details);

    Ok(Some(FoodUpdate {
        name: food.name.clone(),
        fdc_id: details.fdc_id,
        fdc_description: details.description,
        updated: merge_per_gram(food, &per_gram, overwrite),
        per_gram,
    }))
}

/// Run the import over a list of foods
///
/// Individual failures are logged and collected; the batch continues.
pub fn run_import(client: &FdcClient, foods: &[FoodItem], options: &ImportOptions) -> ImportReport {
    let mut report = ImportReport::default();
    let limit = options.limit.unwrap_or(foods.len());

    for (i, food) in foods.iter().take(limit).enumerate() {
        if i > 0 && !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }

        match import_food(client, food, options.overwrite) {
            Ok(Some(update)) => {
                tracing::info!("{} -> FDC {} ({})", food.name, update.fdc_id, update.fdc_description);
                report.updates.push(update);
            }
            Ok(None) => {
                tracing::warn!("No FDC match for {}", food.name);
                report.unmatched.push(food.name.clone());
            }
            Err(e) => {
                tracing::warn!("FDC lookup failed for {}: {}", food.name, e);
                report.failures.push(ImportFailure {
                    name: food.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
