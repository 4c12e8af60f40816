//! RDA Tracker MCP Server Implementation
//!
//! Exposes the catalog, daily log, and progress tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::db::Database;
use crate::tools::status::StatusTracker;
use crate::tools::{foods, log, profiles, progress};

/// RDA Tracker MCP Service
#[derive(Clone)]
pub struct RdaService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    default_profile: String,
    tool_router: ToolRouter<RdaService>,
}

impl RdaService {
    pub fn new(config: &Config, database: Database) -> Self {
        Self::with_parts(config.database_path.clone(), config.default_profile.clone(), database)
    }

    pub fn with_parts(database_path: PathBuf, default_profile: String, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            default_profile,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, key: impl std::fmt::Display) -> Result<CallToolResult, McpError> {
    let body = serde_json::json!({ "error": format!("{} not found", what), "key": key.to_string() });
    to_json(&body)
}

// ============================================================================
// Catalog Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Name fragment (case-insensitive). Empty lists the first foods in the catalog.
    #[serde(default)]
    pub query: String,
    /// Restrict to one category (e.g. "Dairy & Eggs")
    pub category: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodNameParams {
    /// Exact catalog food name
    pub food_name: String,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProfileParams {
    /// Profile id (e.g. "male_adult"); defaults to the active profile
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectProfileParams {
    /// Profile id to make active
    pub id: String,
}

// ============================================================================
// Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodParams {
    /// Exact catalog food name
    pub food_name: String,
    /// Amount in the food's unit (grams, milliliters, or pieces). Defaults to the food's suggested quantity.
    pub quantity: Option<f64>,
    /// breakfast, lunch, dinner, or snack. Defaults from the time of day.
    pub meal_slot: Option<String>,
    /// Date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateQuantityParams {
    /// Log entry ID
    pub id: i64,
    /// New quantity in the food's unit (must be greater than 0)
    pub quantity: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdjustQuantityParams {
    /// Log entry ID
    pub id: i64,
    /// Amount to add (negative to subtract). The result never goes below 1.
    pub delta: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EntryIdParams {
    /// Log entry ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// Date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProgressParams {
    /// Date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Profile id to compare against; defaults to the active profile
    pub profile_id: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl RdaService {
    // --- Status ---

    #[tool(description = "Get the current status of the RDA Tracker service including build info, database status, catalog size, and process information")]
    async fn rda_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for logging food and reading RDA progress. Call this when starting a logging session or when unsure about units.")]
    fn logging_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LOGGING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LOGGING_INSTRUCTIONS)]))
    }

    // --- Catalog ---

    #[tool(description = "Search the food catalog by name or category")]
    fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        to_json(&foods::search_foods(&p.query, p.category.as_deref(), p.limit))
    }

    #[tool(description = "Get full details for a catalog food: unit, piece weight, density, servings, and per-gram nutrients")]
    fn get_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::get_food(&self.database, &p.food_name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => not_found("Food", &p.food_name),
        }
    }

    #[tool(description = "List food categories with the number of foods in each")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        to_json(&foods::list_categories())
    }

    #[tool(description = "Add or remove a food from favorites")]
    fn toggle_favorite(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::toggle_favorite(&self.database, &p.food_name).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List favorite foods")]
    fn list_favorites(&self) -> Result<CallToolResult, McpError> {
        let result = foods::list_favorites(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Profiles ---

    #[tool(description = "List the built-in RDA profiles and which one is active")]
    fn list_profiles(&self) -> Result<CallToolResult, McpError> {
        let result = profiles::list_profiles(&self.database, &self.default_profile)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the daily targets of an RDA profile (the active one by default)")]
    fn get_profile(&self, Parameters(p): Parameters<GetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile(&self.database, p.id.as_deref(), &self.default_profile)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => not_found("Profile", p.id.unwrap_or_default()),
        }
    }

    #[tool(description = "Select the active RDA profile. The selection persists.")]
    fn select_profile(&self, Parameters(p): Parameters<SelectProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::select_profile(&self.database, &p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Daily Log ---

    #[tool(description = "Add a catalog food to a day's log. Quantity is in the food's own unit (grams, milliliters, or pieces).")]
    fn add_food(&self, Parameters(p): Parameters<AddFoodParams>) -> Result<CallToolResult, McpError> {
        let result = log::add_food(&self.database, &p.food_name, p.quantity, p.meal_slot.as_deref(), p.date.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Set the quantity of a log entry (must be greater than 0)")]
    fn update_quantity(&self, Parameters(p): Parameters<UpdateQuantityParams>) -> Result<CallToolResult, McpError> {
        let result = log::update_quantity(&self.database, p.id, p.quantity).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(entry) => to_json(&entry),
            None => not_found("Log entry", p.id),
        }
    }

    #[tool(description = "Step a log entry's quantity up or down by a delta. Never goes below 1.")]
    fn adjust_quantity(&self, Parameters(p): Parameters<AdjustQuantityParams>) -> Result<CallToolResult, McpError> {
        let result = log::adjust_quantity(&self.database, p.id, p.delta).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(entry) => to_json(&entry),
            None => not_found("Log entry", p.id),
        }
    }

    #[tool(description = "Remove one entry from the log")]
    fn remove_food(&self, Parameters(p): Parameters<EntryIdParams>) -> Result<CallToolResult, McpError> {
        let result = log::remove_food(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Clear every entry for a day")]
    fn reset_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = log::reset_day(&self.database, p.date.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a day's log grouped by meal, with per-meal and daily nutrient totals")]
    fn get_day_log(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = log::get_day_log(&self.database, p.date.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Progress ---

    #[tool(description = "Get RDA progress for a day: per-nutrient percent of target and overall progress")]
    fn get_progress(&self, Parameters(p): Parameters<ProgressParams>) -> Result<CallToolResult, McpError> {
        let result = progress::get_progress(&self.database, p.date.as_deref(), p.profile_id.as_deref(), &self.default_profile)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a shareable one-line summary of a day's progress on calories, protein, carbs and fat")]
    fn get_share_summary(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let result = progress::get_share_summary(&self.database, p.date.as_deref(), &self.default_profile)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for RdaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "rda-tracker".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("RDA Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "RDA Tracker - daily nutrition logging against RDA targets. \
                 IMPORTANT: Call logging_instructions before logging food. \
                 Catalog: search_foods, get_food, list_categories, toggle_favorite, list_favorites. \
                 Profiles: list_profiles, get_profile, select_profile. \
                 Log: add_food, update_quantity, adjust_quantity, remove_food, reset_day, get_day_log. \
                 Progress: get_progress, get_share_summary. \
                 Quantities are in each food's own unit; dates are YYYY-MM-DD and default to today."
                    .into(),
            ),
        }
    }
}
