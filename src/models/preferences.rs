//! Favorites and settings
//!
//! Small per-user state that outlives a day's log.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::db::DbResult;
use crate::models::Profile;

const ACTIVE_PROFILE_KEY: &str = "active_profile";

/// A favorited catalog food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub food_name: String,
    pub added_at: String,
}

impl Favorite {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            food_name: row.get("food_name")?,
            added_at: row.get("added_at")?,
        })
    }

    /// All favorites, oldest first
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT food_name, added_at FROM favorites ORDER BY added_at, rowid")?;
        let favorites = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(favorites)
    }

    pub fn is_favorite(conn: &Connection, food_name: &str) -> DbResult<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE food_name = ?1",
            [food_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Add or remove a favorite. Returns the new state (true = now a favorite).
    pub fn toggle(conn: &Connection, food_name: &str) -> DbResult<bool> {
        let food = catalog::require_food(food_name)?;

        if Self::is_favorite(conn, &food.name)? {
            conn.execute("DELETE FROM favorites WHERE food_name = ?1", [&food.name])?;
            tracing::info!("Removed favorite: {}", food.name);
            Ok(false)
        } else {
            conn.execute("INSERT INTO favorites (food_name) VALUES (?1)", [&food.name])?;
            tracing::info!("Added favorite: {}", food.name);
            Ok(true)
        }
    }
}

/// Key/value settings
pub struct Settings;

impl Settings {
    pub fn get(conn: &Connection, key: &str) -> DbResult<Option<String>> {
        let result = conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        });
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value (upsert)
    pub fn set(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO settings (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now', 'localtime')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// The selected profile, falling back to `default_id`
    ///
    /// A stored id that no longer names a profile also falls back.
    pub fn active_profile(conn: &Connection, default_id: &str) -> DbResult<&'static Profile> {
        if let Some(id) = Self::get(conn, ACTIVE_PROFILE_KEY)? {
            if let Some(profile) = catalog::find_profile(&id) {
                return Ok(profile);
            }
            tracing::warn!("Stored profile '{}' no longer exists; using '{}'", id, default_id);
        }
        Ok(catalog::require_profile(default_id)?)
    }

    pub fn set_active_profile(conn: &Connection, id: &str) -> DbResult<&'static Profile> {
        let profile = catalog::require_profile(id)?;
        Self::set(conn, ACTIVE_PROFILE_KEY, &profile.id)?;
        tracing::info!("Active profile set to {}", profile.id);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::DbError;
    use crate::nutrition::NutritionError;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_toggle_favorite() {
        let conn = setup();
        assert!(Favorite::toggle(&conn, "Honey").unwrap());
        assert!(Favorite::toggle(&conn, "Greek Yogurt (Plain)").unwrap());
        assert_eq!(Favorite::list(&conn).unwrap().len(), 2);

        assert!(!Favorite::toggle(&conn, "Honey").unwrap());
        let names: Vec<String> = Favorite::list(&conn).unwrap().into_iter().map(|f| f.food_name).collect();
        assert_eq!(names, vec!["Greek Yogurt (Plain)".to_string()]);
    }

    #[test]
    fn test_toggle_unknown_food() {
        let conn = setup();
        let result = Favorite::toggle(&conn, "Unicorn Steak");
        assert!(matches!(result, Err(DbError::Nutrition(NutritionError::UnknownFood(_)))));
    }

    #[test]
    fn test_settings_upsert() {
        let conn = setup();
        assert_eq!(Settings::get(&conn, "k").unwrap(), None);
        Settings::set(&conn, "k", "a").unwrap();
        Settings::set(&conn, "k", "b").unwrap();
        assert_eq!(Settings::get(&conn, "k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_active_profile_falls_back_to_default() {
        let conn = setup();
        assert_eq!(Settings::active_profile(&conn, "male_adult").unwrap().id, "male_adult");

        Settings::set_active_profile(&conn, "female_adult").unwrap();
        assert_eq!(Settings::active_profile(&conn, "male_adult").unwrap().id, "female_adult");

        assert!(Settings::set_active_profile(&conn, "toddler").is_err());

        Settings::set(&conn, ACTIVE_PROFILE_KEY, "retired").unwrap();
        assert_eq!(Settings::active_profile(&conn, "male_adult").unwrap().id, "male_adult");
    }
}
