use std::collections::BTreeSet;
use std::path::Path;

use chrono::{Local, NaiveDate};
use log::{debug, info};
use rusqlite::{Connection, params};

use crate::error::{Error, Result};
use crate::models::{
    CustomFood, FoodChoice, MealSlot, PlannedMeal, Task, TaskStatus, validate_name,
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'not_done',
                    due_date TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS planned_meals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    food_name TEXT NOT NULL,
                    plan_date TEXT NOT NULL,
                    meal_slot TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS custom_foods (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    food_name TEXT NOT NULL,
                    meal_slot TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date);
                CREATE INDEX IF NOT EXISTS idx_planned_meals_date ON planned_meals(plan_date);
                CREATE INDEX IF NOT EXISTS idx_custom_foods_slot ON custom_foods(meal_slot);

                PRAGMA user_version = 1;",
            )?;
            info!("initialized schema at version 1");
        }

        if version < 2 {
            // Stores restored from elsewhere may already carry the column;
            // the probe keeps this step re-runnable.
            if !self.has_column("custom_foods", "image_url") {
                self.conn
                    .execute_batch("ALTER TABLE custom_foods ADD COLUMN image_url TEXT;")?;
            }
            self.conn.execute_batch("PRAGMA user_version = 2;")?;
            info!("applied schema migration v2 (custom food images)");
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> bool {
        self.conn
            .prepare(&format!("SELECT {column} FROM {table} LIMIT 0"))
            .is_ok()
    }

    // --- Row mapping helpers ---

    fn task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_text: String = row.get(2)?;
        let status = status_from_text(2, &status_text)?;
        // A malformed due date degrades to "no due date" rather than failing
        // the whole listing.
        let due_text: Option<String> = row.get(3)?;
        let due_date = due_text.and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok());
        Ok(Task {
            id: row.get(0)?,
            description: row.get(1)?,
            status,
            due_date,
            created_at: row.get(4)?,
        })
    }

    fn meal_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlannedMeal> {
        let date_text: String = row.get(2)?;
        let slot_text: String = row.get(3)?;
        Ok(PlannedMeal {
            id: row.get(0)?,
            food_name: row.get(1)?,
            plan_date: date_from_text(2, &date_text)?,
            meal_slot: slot_from_text(3, &slot_text)?,
        })
    }

    fn custom_food_from_row(row: &rusqlite::Row) -> rusqlite::Result<CustomFood> {
        let slot_text: String = row.get(2)?;
        Ok(CustomFood {
            id: row.get(0)?,
            food_name: row.get(1)?,
            meal_slot: slot_from_text(2, &slot_text)?,
            image_url: row.get(3)?,
        })
    }

    // --- Tasks ---

    pub fn insert_task(&self, description: &str, due_date: Option<NaiveDate>) -> Result<Task> {
        let description = validate_name(description, "task description")?;
        let now = Local::now().to_rfc3339();
        let due_text = due_date.map(|date| date.format("%Y-%m-%d").to_string());
        self.conn.execute(
            "INSERT INTO tasks (description, status, due_date, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![description, TaskStatus::NotDone.as_str(), due_text, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("added task {id}");
        Ok(Task {
            id,
            description,
            status: TaskStatus::NotDone,
            due_date,
            created_at: now,
        })
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, status, due_date, created_at
             FROM tasks ORDER BY created_at DESC, id DESC",
        )?;
        let tasks = stmt
            .query_map([], Self::task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn list_tasks_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let date_text = date.format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT id, description, status, due_date, created_at
             FROM tasks WHERE due_date = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let tasks = stmt
            .query_map(params![date_text], Self::task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, status, due_date, created_at FROM tasks WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::task_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Missing ids are a quiet no-op. Returns whether a row changed.
    pub fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        Ok(rows > 0)
    }

    /// Idempotent: deleting an id that is already gone returns false.
    pub fn delete_task(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if rows > 0 {
            debug!("deleted task {id}");
        }
        Ok(rows > 0)
    }

    /// Distinct due dates across all tasks, for the calendar.
    pub fn list_task_dates(&self) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT due_date FROM tasks WHERE due_date IS NOT NULL")?;
        let texts = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(texts
            .iter()
            .filter_map(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
            .collect())
    }

    // --- Planned meals ---

    pub fn insert_meal(
        &self,
        food_name: &str,
        plan_date: NaiveDate,
        meal_slot: MealSlot,
    ) -> Result<PlannedMeal> {
        let food_name = validate_name(food_name, "food name")?;
        let date_text = plan_date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO planned_meals (food_name, plan_date, meal_slot) VALUES (?1, ?2, ?3)",
            params![food_name, date_text, meal_slot.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("planned meal {id} for {date_text} {meal_slot}");
        Ok(PlannedMeal {
            id,
            food_name,
            plan_date,
            meal_slot,
        })
    }

    /// Meals for one day in the fixed breakfast, lunch, dinner order,
    /// regardless of insertion order.
    pub fn list_meals_by_date(&self, date: NaiveDate) -> Result<Vec<PlannedMeal>> {
        let date_text = date.format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, plan_date, meal_slot FROM planned_meals
             WHERE plan_date = ?1
             ORDER BY CASE meal_slot
                 WHEN 'breakfast' THEN 0
                 WHEN 'lunch' THEN 1
                 ELSE 2
             END, id",
        )?;
        let meals = stmt
            .query_map(params![date_text], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    /// Idempotent: deleting an id that is already gone returns false.
    pub fn delete_meal(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM planned_meals WHERE id = ?1", params![id])?;
        if rows > 0 {
            debug!("deleted planned meal {id}");
        }
        Ok(rows > 0)
    }

    /// Distinct dates that have at least one planned meal, for the calendar.
    pub fn list_plan_dates(&self) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT plan_date FROM planned_meals")?;
        let texts = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(texts
            .iter()
            .filter_map(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
            .collect())
    }

    // --- Custom foods ---

    /// `image_url` is stored as given; callers normalize blanks to `None`
    /// first (see `models::normalize_image_url`).
    pub fn insert_custom_food(
        &self,
        food_name: &str,
        meal_slot: MealSlot,
        image_url: Option<&str>,
    ) -> Result<CustomFood> {
        let food_name = validate_name(food_name, "food name")?;
        self.conn.execute(
            "INSERT INTO custom_foods (food_name, meal_slot, image_url) VALUES (?1, ?2, ?3)",
            params![food_name, meal_slot.as_str(), image_url],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("added custom food {id} ({meal_slot})");
        Ok(CustomFood {
            id,
            food_name,
            meal_slot,
            image_url: image_url.map(ToString::to_string),
        })
    }

    pub fn list_custom_foods(&self) -> Result<Vec<CustomFood>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, meal_slot, image_url FROM custom_foods ORDER BY id",
        )?;
        let foods = stmt
            .query_map([], Self::custom_food_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(foods)
    }

    /// Name and image pairs for one slot, the shape the spinner consumes.
    pub fn custom_foods_for_slot(&self, slot: MealSlot) -> Result<Vec<FoodChoice>> {
        let mut stmt = self.conn.prepare(
            "SELECT food_name, image_url FROM custom_foods WHERE meal_slot = ?1 ORDER BY id",
        )?;
        let choices = stmt
            .query_map(params![slot.as_str()], |row| {
                Ok(FoodChoice {
                    food_name: row.get(0)?,
                    image_url: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(choices)
    }

    /// Idempotent: deleting an id that is already gone returns false.
    pub fn delete_custom_food(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM custom_foods WHERE id = ?1", params![id])?;
        if rows > 0 {
            debug!("deleted custom food {id}");
        }
        Ok(rows > 0)
    }
}

fn date_from_text(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn slot_from_text(idx: usize, text: &str) -> rusqlite::Result<MealSlot> {
    text.parse().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn status_from_text(idx: usize, text: &str) -> rusqlite::Result<TaskStatus> {
    text.parse().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}
