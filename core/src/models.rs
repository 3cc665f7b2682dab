use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, Result};

/// A to-do item. Description and due date are fixed at creation; only the
/// status changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: String,
}

impl Task {
    /// An open task whose due date has passed. Derived, never stored.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::NotDone && self.due_date.is_some_and(|due| due < today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotDone,
    Done,
}

impl TaskStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NotDone => "not_done",
            TaskStatus::Done => "done",
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid task status '{0}'; expected not_done or done")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "not_done" => Ok(TaskStatus::NotDone),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

/// A food assigned to one date and meal slot. Never edited in place; replace
/// by delete and add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub id: i64,
    pub food_name: String,
    pub plan_date: NaiveDate,
    pub meal_slot: MealSlot,
}

/// Meal-time category. Declaration order is the fixed breakfast, lunch,
/// dinner order used everywhere meals are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("invalid meal slot '{0}'; expected breakfast, lunch, or dinner")]
pub struct ParseMealSlotError(String);

impl FromStr for MealSlot {
    type Err = ParseMealSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            _ => Err(ParseMealSlotError(s.to_string())),
        }
    }
}

/// A user-defined spinner entry for one slot, with an optional image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFood {
    pub id: i64,
    pub food_name: String,
    pub meal_slot: MealSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A food name with an optional image, as the spinner offers it. Built-in
/// and custom entries both reduce to this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodChoice {
    pub food_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Trim a user-entered name, rejecting input that is empty afterwards.
pub fn validate_name(name: &str, field: &'static str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Blank or whitespace-only image references count as absent.
#[must_use]
pub fn normalize_image_url(image_url: Option<&str>) -> Option<String> {
    image_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_meal_slot_parse() {
        assert_eq!("breakfast".parse::<MealSlot>().unwrap(), MealSlot::Breakfast);
        assert_eq!("lunch".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert_eq!("dinner".parse::<MealSlot>().unwrap(), MealSlot::Dinner);
    }

    #[test]
    fn test_meal_slot_parse_case_insensitive() {
        assert_eq!("Lunch".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert_eq!("BREAKFAST".parse::<MealSlot>().unwrap(), MealSlot::Breakfast);
    }

    #[test]
    fn test_meal_slot_parse_invalid() {
        assert!("brunch".parse::<MealSlot>().is_err());
        assert!("".parse::<MealSlot>().is_err());
    }

    #[test]
    fn test_meal_slot_fixed_order() {
        assert!(MealSlot::Breakfast < MealSlot::Lunch);
        assert!(MealSlot::Lunch < MealSlot::Dinner);
        assert_eq!(
            MealSlot::ALL,
            [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
        );
    }

    #[test]
    fn test_meal_slot_roundtrip() {
        for slot in MealSlot::ALL {
            assert_eq!(slot.as_str().parse::<MealSlot>().unwrap(), slot);
        }
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!("not_done".parse::<TaskStatus>().unwrap(), TaskStatus::NotDone);
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("finished".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::NotDone).unwrap(),
            "\"not_done\""
        );
        assert_eq!(
            serde_json::to_string(&MealSlot::Breakfast).unwrap(),
            "\"breakfast\""
        );
    }

    #[test]
    fn test_is_overdue() {
        let today = date(2024, 6, 15);
        let task = Task {
            id: 1,
            description: "Pay rent".to_string(),
            status: TaskStatus::NotDone,
            due_date: Some(date(2024, 6, 14)),
            created_at: String::new(),
        };
        assert!(task.is_overdue(today));
    }

    #[test]
    fn test_done_task_is_not_overdue() {
        let today = date(2024, 6, 15);
        let task = Task {
            id: 1,
            description: "Pay rent".to_string(),
            status: TaskStatus::Done,
            due_date: Some(date(2024, 6, 1)),
            created_at: String::new(),
        };
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let today = date(2024, 6, 15);
        let task = Task {
            id: 1,
            description: "Pay rent".to_string(),
            status: TaskStatus::NotDone,
            due_date: Some(today),
            created_at: String::new(),
        };
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_undated_task_is_not_overdue() {
        let task = Task {
            id: 1,
            description: "Someday".to_string(),
            status: TaskStatus::NotDone,
            due_date: None,
            created_at: String::new(),
        };
        assert!(!task.is_overdue(date(2024, 6, 15)));
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Tacos  ", "food name").unwrap(), "Tacos");
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(validate_name("", "task description").is_err());
        assert!(validate_name("   ", "task description").is_err());
    }

    #[test]
    fn test_normalize_image_url() {
        assert_eq!(normalize_image_url(None), None);
        assert_eq!(normalize_image_url(Some("")), None);
        assert_eq!(normalize_image_url(Some("   ")), None);
        assert_eq!(
            normalize_image_url(Some(" https://example.com/taco.jpg ")),
            Some("https://example.com/taco.jpg".to_string())
        );
    }
}
