//! Log entry model
//!
//! One food added to one calendar day's log.

use chrono::{Local, NaiveDate, Timelike};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::db::{DbError, DbResult};
use crate::nutrition::{adjust_quantity, validate_quantity};

use super::FoodItem;

/// Storage format for `log_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Meal slot, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snack" => Some(MealSlot::Snack),
            _ => None,
        }
    }

    /// Default slot for a local hour of day
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=10 => MealSlot::Breakfast,
            11..=15 => MealSlot::Lunch,
            16..=18 => MealSlot::Snack,
            _ => MealSlot::Dinner,
        }
    }

    /// Default slot for the current local time
    pub fn current() -> Self {
        Self::for_hour(Local::now().hour())
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A persisted log entry with its catalog food attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub log_date: NaiveDate,
    pub food: FoodItem,
    /// In the food's own unit
    pub quantity: f64,
    pub meal_slot: MealSlot,
    pub logged_at: String,
}

/// Data for creating a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryCreate {
    pub log_date: NaiveDate,
    pub food_name: String,
    pub quantity: f64,
    pub meal_slot: MealSlot,
}

/// Raw row before the food is looked up
struct LogRow {
    id: i64,
    log_date: String,
    food_name: String,
    quantity: f64,
    meal_slot: String,
    logged_at: String,
}

impl LogRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            log_date: row.get("log_date")?,
            food_name: row.get("food_name")?,
            quantity: row.get("quantity")?,
            meal_slot: row.get("meal_slot")?,
            logged_at: row.get("logged_at")?,
        })
    }

    /// Attach the catalog food. `Ok(None)` when the food is no longer in the catalog.
    fn hydrate(self) -> DbResult<Option<LogEntry>> {
        let Some(food) = catalog::find_food_by_name(&self.food_name) else {
            tracing::warn!(
                "Skipping log entry {}: '{}' is not in the catalog",
                self.id,
                self.food_name
            );
            return Ok(None);
        };
        let log_date = NaiveDate::parse_from_str(&self.log_date, DATE_FORMAT)
            .map_err(|e| DbError::InvalidData(format!("log_date '{}': {}", self.log_date, e)))?;
        let meal_slot = MealSlot::from_str(&self.meal_slot)
            .ok_or_else(|| DbError::InvalidData(format!("meal_slot '{}'", self.meal_slot)))?;

        Ok(Some(LogEntry {
            id: self.id,
            log_date,
            food: food.clone(),
            quantity: self.quantity,
            meal_slot,
            logged_at: self.logged_at,
        }))
    }
}

const SELECT_COLUMNS: &str = "SELECT id, log_date, food_name, quantity, meal_slot, logged_at FROM log_entries";

impl LogEntry {
    /// Add a food to a day's log
    pub fn create(conn: &Connection, data: &LogEntryCreate) -> DbResult<Self> {
        let quantity = validate_quantity(data.quantity)?;
        let food = catalog::require_food(&data.food_name)?;

        conn.execute(
            "INSERT INTO log_entries (log_date, food_name, quantity, meal_slot) VALUES (?1, ?2, ?3, ?4)",
            params![
                data.log_date.format(DATE_FORMAT).to_string(),
                food.name,
                quantity,
                data.meal_slot.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(
            "Logged {} {} of {} ({}) on {}",
            quantity,
            food.unit.symbol(),
            food.name,
            data.meal_slot.as_str(),
            data.log_date
        );

        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("log entry {}", id)))
    }

    /// Get an entry by id
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;
        let mut rows = stmt.query_map([id], LogRow::from_row)?;

        match rows.next() {
            Some(row) => row?.hydrate(),
            None => Ok(None),
        }
    }

    /// Entries for one day, in the order they were added
    pub fn for_day(conn: &Connection, date: NaiveDate) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{} WHERE log_date = ?1 ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([date.format(DATE_FORMAT).to_string()], LogRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(entry) = row.hydrate()? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Set a new quantity. `None` if the entry doesn't exist.
    ///
    /// Entries whose food has left the catalog are not edited.
    pub fn update_quantity(conn: &Connection, id: i64, quantity: f64) -> DbResult<Option<Self>> {
        let quantity = validate_quantity(quantity)?;

        let result = conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            [id],
            LogRow::from_row,
        );
        let row = match result {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let Some(mut entry) = row.hydrate()? else {
            return Err(DbError::NotFound(format!("catalog food for log entry {}", id)));
        };

        conn.execute(
            "UPDATE log_entries SET quantity = ?1 WHERE id = ?2",
            params![quantity, id],
        )?;

        tracing::info!("Log entry {} quantity set to {}", id, quantity);
        entry.quantity = quantity;
        Ok(Some(entry))
    }

    /// Step the quantity by `delta`, never below 1
    pub fn adjust_quantity(conn: &Connection, id: i64, delta: f64) -> DbResult<Option<Self>> {
        if !delta.is_finite() {
            return Err(DbError::InvalidData(format!("quantity step {}", delta)));
        }

        let result = conn.query_row(
            "SELECT quantity FROM log_entries WHERE id = ?1",
            [id],
            |row| row.get::<_, f64>(0),
        );
        match result {
            Ok(current) => Self::update_quantity(conn, id, adjust_quantity(current, delta)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove one entry. Returns false if it didn't exist.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let deleted = conn.execute("DELETE FROM log_entries WHERE id = ?1", [id])?;
        if deleted > 0 {
            tracing::info!("Removed log entry {}", id);
        }
        Ok(deleted > 0)
    }

    /// Clear every entry for one day. Returns the number removed.
    pub fn reset_day(conn: &Connection, date: NaiveDate) -> DbResult<usize> {
        let deleted = conn.execute(
            "DELETE FROM log_entries WHERE log_date = ?1",
            [date.format(DATE_FORMAT).to_string()],
        )?;
        tracing::info!("Reset {}: removed {} entries", date, deleted);
        Ok(deleted)
    }
}
