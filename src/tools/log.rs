//! Daily Log MCP Tools
//!
//! Adding, editing and removing foods in a day's log.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog;
use crate::db::Database;
use crate::models::{today, LogEntry, LogEntryCreate, MealSlot, NutrientVector, DATE_FORMAT};
use crate::nutrition::{aggregate, calculate_contribution, meal_totals, MealTotals};

/// Parse an optional YYYY-MM-DD date, defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, DATE_FORMAT)
            .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", d)),
        None => Ok(today()),
    }
}

/// A log entry with its computed contribution
#[derive(Debug, Serialize)]
pub struct LogEntryDetail {
    pub id: i64,
    pub date: String,
    pub food_name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: &'static str,
    pub meal_slot: MealSlot,
    pub logged_at: String,
    pub nutrition: NutrientVector,
}

impl LogEntryDetail {
    fn from_entry(entry: &LogEntry) -> Result<Self, String> {
        let nutrition =
            calculate_contribution(&entry.food, entry.quantity).map_err(|e| e.to_string())?;
        Ok(Self {
            id: entry.id,
            date: entry.log_date.format(DATE_FORMAT).to_string(),
            food_name: entry.food.name.clone(),
            category: entry.food.category.clone(),
            quantity: entry.quantity,
            unit: entry.food.unit.symbol(),
            meal_slot: entry.meal_slot,
            logged_at: entry.logged_at.clone(),
            nutrition,
        })
    }
}

/// Entries grouped by meal slot
#[derive(Debug, Default, Serialize)]
pub struct DayMeals {
    pub breakfast: Vec<LogEntryDetail>,
    pub lunch: Vec<LogEntryDetail>,
    pub dinner: Vec<LogEntryDetail>,
    pub snack: Vec<LogEntryDetail>,
}

impl DayMeals {
    fn push(&mut self, detail: LogEntryDetail) {
        match detail.meal_slot {
            MealSlot::Breakfast => self.breakfast.push(detail),
            MealSlot::Lunch => self.lunch.push(detail),
            MealSlot::Dinner => self.dinner.push(detail),
            MealSlot::Snack => self.snack.push(detail),
        }
    }
}

/// Response for get_day_log
#[derive(Debug, Serialize)]
pub struct DayLog {
    pub date: String,
    pub entry_count: usize,
    pub meals: DayMeals,
    pub meal_totals: Vec<MealTotals>,
    pub totals: NutrientVector,
}

/// Response for remove_food
#[derive(Debug, Serialize)]
pub struct RemoveFoodResponse {
    pub id: i64,
    pub removed: bool,
}

/// Response for reset_day
#[derive(Debug, Serialize)]
pub struct ResetDayResponse {
    pub date: String,
    pub removed: usize,
}

/// Add a food to a day's log
///
/// Quantity defaults to the food's suggested quantity; the meal slot to the
/// current time of day.
pub fn add_food(
    db: &Database,
    food_name: &str,
    quantity: Option<f64>,
    meal_slot: Option<&str>,
    date: Option<&str>,
) -> Result<LogEntryDetail, String> {
    let log_date = resolve_date(date)?;

    let food = catalog::find_food_by_name(food_name)
        .ok_or_else(|| format!("Food not found in catalog: {}", food_name))?;

    let quantity = quantity
        .or(food.default_quantity)
        .ok_or_else(|| format!("quantity is required for {} (in {})", food.name, food.unit.symbol()))?;

    let meal_slot = match meal_slot {
        Some(s) => MealSlot::from_str(s).ok_or_else(|| {
            format!("Invalid meal_slot '{}'. Use breakfast, lunch, dinner, or snack", s)
        })?,
        None => MealSlot::current(),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = LogEntry::create(
        &conn,
        &LogEntryCreate {
            log_date,
            food_name: food.name.clone(),
            quantity,
            meal_slot,
        },
    )
    .map_err(|e| format!("Failed to add food: {}", e))?;

    LogEntryDetail::from_entry(&entry)
}

/// Set an entry's quantity
pub fn update_quantity(db: &Database, id: i64, quantity: f64) -> Result<Option<LogEntryDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = LogEntry::update_quantity(&conn, id, quantity)
        .map_err(|e| format!("Failed to update quantity: {}", e))?;
    entry.as_ref().map(LogEntryDetail::from_entry).transpose()
}

/// Step an entry's quantity up or down (never below 1)
pub fn adjust_quantity(db: &Database, id: i64, delta: f64) -> Result<Option<LogEntryDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = LogEntry::adjust_quantity(&conn, id, delta)
        .map_err(|e| format!("Failed to adjust quantity: {}", e))?;
    entry.as_ref().map(LogEntryDetail::from_entry).transpose()
}

pub fn remove_food(db: &Database, id: i64) -> Result<RemoveFoodResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let removed = LogEntry::delete(&conn, id).map_err(|e| format!("Failed to remove entry: {}", e))?;
    Ok(RemoveFoodResponse { id, removed })
}

pub fn reset_day(db: &Database, date: Option<&str>) -> Result<ResetDayResponse, String> {
    let log_date = resolve_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let removed = LogEntry::reset_day(&conn, log_date)
        .map_err(|e| format!("Failed to reset day: {}", e))?;
    Ok(ResetDayResponse {
        date: log_date.format(DATE_FORMAT).to_string(),
        removed,
    })
}

/// Load a day's entries
pub fn load_day(db: &Database, date: NaiveDate) -> Result<Vec<LogEntry>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    LogEntry::for_day(&conn, date).map_err(|e| format!("Failed to load log: {}", e))
}

/// A day's entries grouped by meal, with per-meal and daily totals
pub fn get_day_log(db: &Database, date: Option<&str>) -> Result<DayLog, String> {
    let log_date = resolve_date(date)?;
    let entries = load_day(db, log_date)?;

    let mut meals = DayMeals::default();
    for entry in &entries {
        meals.push(LogEntryDetail::from_entry(entry)?);
    }

    Ok(DayLog {
        date: log_date.format(DATE_FORMAT).to_string(),
        entry_count: entries.len(),
        meals,
        meal_totals: meal_totals(&entries).map_err(|e| e.to_string())?,
        totals: aggregate(&entries).map_err(|e| e.to_string())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::Nutrient;

    const DAY: Option<&str> = Some("2025-01-09");

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("2025-01-09")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
        );
        assert_eq!(resolve_date(None).unwrap(), today());
        assert_eq!(resolve_date(Some("  ")).unwrap(), today());
        assert!(resolve_date(Some("01/09/2025")).is_err());
    }

    #[test]
    fn test_add_food_defaults() {
        let db = setup();
        // Whey has a suggested quantity of one scoop
        let entry = add_food(&db, "Whey Protein Powder", None, Some("snack"), DAY).unwrap();
        assert_eq!(entry.quantity, 1.0);
        assert_eq!(entry.unit, "piece");
        assert!((entry.nutrition[Nutrient::Protein] - 23.22).abs() < 1e-9);

        // Honey has none, so a quantity is required
        assert!(add_food(&db, "Honey", None, None, DAY).is_err());
        assert!(add_food(&db, "Honey", Some(20.0), Some("elevenses"), DAY).is_err());
        assert!(add_food(&db, "Honey", Some(0.0), None, DAY).is_err());
    }

    #[test]
    fn test_day_log_totals() {
        let db = setup();
        add_food(&db, "Chicken Breast (Grilled)", Some(200.0), Some("lunch"), DAY).unwrap();
        add_food(&db, "Honey", Some(21.0), Some("breakfast"), DAY).unwrap();
        add_food(&db, "Honey", Some(21.0), Some("breakfast"), Some("2025-01-10")).unwrap();

        let log = get_day_log(&db, DAY).unwrap();
        assert_eq!(log.entry_count, 2);
        assert_eq!(log.meals.breakfast.len(), 1);
        assert_eq!(log.meals.lunch.len(), 1);
        assert!(log.meals.dinner.is_empty());

        let expected: f64 = log.meals.breakfast[0].nutrition[Nutrient::Calories]
            + log.meals.lunch[0].nutrition[Nutrient::Calories];
        assert!((log.totals[Nutrient::Calories] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_edit_remove_reset() {
        let db = setup();
        let entry = add_food(&db, "Honey", Some(10.0), None, DAY).unwrap();

        let updated = update_quantity(&db, entry.id, 30.0).unwrap().unwrap();
        assert_eq!(updated.quantity, 30.0);
        assert!(update_quantity(&db, entry.id, -1.0).is_err());
        assert!(update_quantity(&db, 9999, 5.0).unwrap().is_none());

        let adjusted = adjust_quantity(&db, entry.id, -100.0).unwrap().unwrap();
        assert_eq!(adjusted.quantity, 1.0);

        assert!(remove_food(&db, entry.id).unwrap().removed);
        assert!(!remove_food(&db, entry.id).unwrap().removed);

        add_food(&db, "Honey", Some(10.0), None, DAY).unwrap();
        add_food(&db, "Honey", Some(10.0), None, DAY).unwrap();
        assert_eq!(reset_day(&db, DAY).unwrap().removed, 2);
        assert_eq!(get_day_log(&db, DAY).unwrap().entry_count, 0);
    }
}
