//! Catalog MCP Tools
//!
//! Food search and lookup, categories, and favorites.

use serde::Serialize;

use crate::catalog;
use crate::db::Database;
use crate::models::{Favorite, FoodItem, Nutrient, NutrientVector, ServingSize};
use crate::nutrition::calculate_contribution;

/// Food row for search results
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub name: String,
    pub category: String,
    pub unit: &'static str,
    pub default_serving: String,
    pub default_quantity: Option<f64>,
    pub calories_per_gram: f64,
}

impl From<&FoodItem> for FoodSummary {
    fn from(food: &FoodItem) -> Self {
        Self {
            name: food.name.clone(),
            category: food.category.clone(),
            unit: food.unit.as_str(),
            default_serving: food.default_serving_label(),
            default_quantity: food.default_quantity,
            calories_per_gram: food.nutrients_per_gram[Nutrient::Calories],
        }
    }
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub query: String,
    pub category: Option<String>,
    pub foods: Vec<FoodSummary>,
    pub count: usize,
}

/// A labelled serving with its nutrients
#[derive(Debug, Serialize)]
pub struct ServingNutrition {
    pub label: String,
    pub grams: f64,
    pub nutrition: NutrientVector,
}

/// Response for get_food
#[derive(Debug, Serialize)]
pub struct FoodDetail {
    #[serde(flatten)]
    pub food: FoodItem,
    pub default_serving: String,
    pub is_favorite: bool,
    /// Nutrients for the default quantity, when the food has one
    pub default_quantity_nutrition: Option<NutrientVector>,
    pub serving_nutrition: Vec<ServingNutrition>,
}

/// Category with food count
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub food_count: usize,
}

/// Response for toggle_favorite
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub food_name: String,
    pub is_favorite: bool,
}

/// Search the catalog by name or category, optionally within one category
pub fn search_foods(query: &str, category: Option<&str>, limit: usize) -> SearchFoodsResponse {
    let foods: Vec<FoodSummary> = match category {
        Some(category) => {
            let query = query.trim().to_lowercase();
            catalog::foods_by_category(category)
                .into_iter()
                .filter(|f| query.is_empty() || f.name.to_lowercase().contains(&query))
                .take(limit)
                .map(FoodSummary::from)
                .collect()
        }
        None => catalog::search_foods(query, limit)
            .into_iter()
            .map(FoodSummary::from)
            .collect(),
    };

    SearchFoodsResponse {
        query: query.to_string(),
        category: category.map(str::to_string),
        count: foods.len(),
        foods,
    }
}

/// Full details for one food
pub fn get_food(db: &Database, name: &str) -> Result<Option<FoodDetail>, String> {
    let Some(food) = catalog::find_food_by_name(name) else {
        return Ok(None);
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let is_favorite = Favorite::is_favorite(&conn, &food.name)
        .map_err(|e| format!("Failed to check favorites: {}", e))?;

    let default_quantity_nutrition = match food.default_quantity {
        Some(q) => Some(calculate_contribution(food, q).map_err(|e| e.to_string())?),
        None => None,
    };

    let serving_nutrition = food
        .servings
        .iter()
        .map(|ServingSize { label, grams }| ServingNutrition {
            label: label.clone(),
            grams: *grams,
            nutrition: food.nutrients_per_gram.scale(*grams),
        })
        .collect();

    Ok(Some(FoodDetail {
        food: food.clone(),
        default_serving: food.default_serving_label(),
        is_favorite,
        default_quantity_nutrition,
        serving_nutrition,
    }))
}

pub fn list_categories() -> Vec<CategorySummary> {
    catalog::categories()
        .into_iter()
        .map(|name| CategorySummary {
            name: name.to_string(),
            food_count: catalog::foods_by_category(name).len(),
        })
        .collect()
}

pub fn toggle_favorite(db: &Database, food_name: &str) -> Result<ToggleFavoriteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let is_favorite = Favorite::toggle(&conn, food_name).map_err(|e| e.to_string())?;
    Ok(ToggleFavoriteResponse {
        food_name: food_name.to_string(),
        is_favorite,
    })
}

/// Favorited foods, oldest first
pub fn list_favorites(db: &Database) -> Result<Vec<FoodSummary>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let favorites = Favorite::list(&conn).map_err(|e| format!("Failed to list favorites: {}", e))?;

    Ok(favorites
        .iter()
        .filter_map(|f| catalog::find_food_by_name(&f.food_name))
        .map(FoodSummary::from)
        .collect())
}
