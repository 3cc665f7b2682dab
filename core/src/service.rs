use std::path::Path;

use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::calendar::{self, MonthGrid};
use crate::db::Database;
use crate::error::Result;
use crate::models::{
    CustomFood, FoodChoice, MealSlot, PlannedMeal, Task, TaskStatus, normalize_image_url,
};
use crate::selector;

/// Facade over the planner stores. Owns the database connection; the
/// interactive layer talks only to this.
pub struct DaybookService {
    db: Database,
}

impl DaybookService {
    pub fn new(path: &Path) -> Result<Self> {
        let db = Database::open(path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    // --- Tasks ---

    pub fn add_task(&self, description: &str, due_date: Option<NaiveDate>) -> Result<Task> {
        self.db.insert_task(description, due_date)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.db.list_tasks()
    }

    pub fn list_tasks_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        self.db.list_tasks_by_date(date)
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.db.get_task(id)
    }

    pub fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<bool> {
        self.db.set_task_status(id, status)
    }

    pub fn delete_task(&self, id: i64) -> Result<bool> {
        self.db.delete_task(id)
    }

    // --- Meal plan ---

    pub fn add_meal(
        &self,
        food_name: &str,
        plan_date: NaiveDate,
        meal_slot: MealSlot,
    ) -> Result<PlannedMeal> {
        self.db.insert_meal(food_name, plan_date, meal_slot)
    }

    pub fn list_meals_by_date(&self, date: NaiveDate) -> Result<Vec<PlannedMeal>> {
        self.db.list_meals_by_date(date)
    }

    pub fn delete_meal(&self, id: i64) -> Result<bool> {
        self.db.delete_meal(id)
    }

    // --- Custom foods ---

    pub fn add_custom_food(
        &self,
        food_name: &str,
        meal_slot: MealSlot,
        image_url: Option<&str>,
    ) -> Result<CustomFood> {
        let image_url = normalize_image_url(image_url);
        self.db
            .insert_custom_food(food_name, meal_slot, image_url.as_deref())
    }

    pub fn list_custom_foods(&self) -> Result<Vec<CustomFood>> {
        self.db.list_custom_foods()
    }

    pub fn custom_foods_for_slot(&self, slot: MealSlot) -> Result<Vec<FoodChoice>> {
        self.db.custom_foods_for_slot(slot)
    }

    pub fn delete_custom_food(&self, id: i64) -> Result<bool> {
        self.db.delete_custom_food(id)
    }

    // --- Spinner ---

    /// One spin over the built-ins plus this user's catalog for the slot.
    pub fn spin(&self, slot: MealSlot) -> Result<FoodChoice> {
        self.spin_with_rng(slot, &mut rand::rng())
    }

    pub fn spin_with_rng<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        rng: &mut R,
    ) -> Result<FoodChoice> {
        let customs = self.db.custom_foods_for_slot(slot)?;
        selector::spin(slot, &customs, rng)
    }

    /// Every candidate a spin for this slot would draw from.
    pub fn wheel(&self, slot: MealSlot) -> Result<Vec<FoodChoice>> {
        let customs = self.db.custom_foods_for_slot(slot)?;
        Ok(selector::wheel_for(slot, &customs))
    }

    /// Commits a transient pick to the plan for a date and slot.
    pub fn commit_pick(
        &self,
        pick: &FoodChoice,
        date: NaiveDate,
        slot: MealSlot,
    ) -> Result<PlannedMeal> {
        self.db.insert_meal(&pick.food_name, date, slot)
    }

    // --- Calendar ---

    pub fn month_overview(&self, year: i32, month: u32) -> Result<MonthGrid> {
        let task_dates = self.db.list_task_dates()?;
        let meal_dates = self.db.list_plan_dates()?;
        let today = Local::now().date_naive();
        calendar::month_grid(year, month, today, &task_dates, &meal_dates)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::calendar::DayMark;
    use crate::error::Error;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_lifecycle() {
        let svc = DaybookService::new_in_memory().unwrap();
        let task = svc.add_task("Buy milk", Some(date(2024, 3, 1))).unwrap();

        assert!(svc.set_task_status(task.id, TaskStatus::Done).unwrap());
        assert_eq!(
            svc.get_task(task.id).unwrap().unwrap().status,
            TaskStatus::Done
        );

        assert!(svc.set_task_status(task.id, TaskStatus::NotDone).unwrap());
        assert_eq!(
            svc.get_task(task.id).unwrap().unwrap().status,
            TaskStatus::NotDone
        );

        assert!(svc.delete_task(task.id).unwrap());
        assert!(!svc.delete_task(task.id).unwrap());
        assert!(svc.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_add_task_rejects_blank_description() {
        let svc = DaybookService::new_in_memory().unwrap();
        assert!(matches!(
            svc.add_task("   ", None),
            Err(Error::EmptyField { .. })
        ));
    }

    #[test]
    fn test_meals_come_back_slot_ordered() {
        let svc = DaybookService::new_in_memory().unwrap();
        let day = date(2024, 3, 1);
        svc.add_meal("Pizza", day, MealSlot::Dinner).unwrap();
        svc.add_meal("Pancakes", day, MealSlot::Breakfast).unwrap();

        let meals = svc.list_meals_by_date(day).unwrap();
        assert_eq!(meals[0].meal_slot, MealSlot::Breakfast);
        assert_eq!(meals[1].meal_slot, MealSlot::Dinner);
    }

    #[test]
    fn test_custom_food_trims_name_and_drops_blank_image() {
        let svc = DaybookService::new_in_memory().unwrap();
        let food = svc
            .add_custom_food("  Tacos  ", MealSlot::Lunch, Some(""))
            .unwrap();
        assert_eq!(food.food_name, "Tacos");
        assert!(food.image_url.is_none());

        let listed = svc.list_custom_foods().unwrap();
        assert_eq!(listed[0].food_name, "Tacos");
        assert!(listed[0].image_url.is_none());
    }

    #[test]
    fn test_spin_draws_from_wheel() {
        let svc = DaybookService::new_in_memory().unwrap();
        svc.add_custom_food("Tacos", MealSlot::Lunch, None).unwrap();

        let wheel = svc.wheel(MealSlot::Lunch).unwrap();
        assert_eq!(wheel.len(), 6);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let pick = svc.spin_with_rng(MealSlot::Lunch, &mut rng).unwrap();
            assert!(wheel.contains(&pick));
        }
    }

    #[test]
    fn test_spin_without_catalog_returns_builtin() {
        let svc = DaybookService::new_in_memory().unwrap();
        let wheel = svc.wheel(MealSlot::Dinner).unwrap();
        assert_eq!(wheel.len(), 5);

        let mut rng = StdRng::seed_from_u64(11);
        let pick = svc.spin_with_rng(MealSlot::Dinner, &mut rng).unwrap();
        assert!(wheel.contains(&pick));
    }

    #[test]
    fn test_commit_pick_lands_in_plan() {
        let svc = DaybookService::new_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let pick = svc.spin_with_rng(MealSlot::Dinner, &mut rng).unwrap();

        let day = date(2024, 3, 1);
        svc.commit_pick(&pick, day, MealSlot::Dinner).unwrap();

        let meals = svc.list_meals_by_date(day).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].food_name, pick.food_name);
        assert_eq!(meals[0].meal_slot, MealSlot::Dinner);
    }

    #[test]
    fn test_month_overview_marks_task_and_meal_days() {
        let svc = DaybookService::new_in_memory().unwrap();
        svc.add_task("Buy milk", Some(date(2024, 3, 1))).unwrap();
        svc.add_meal("Pasta", date(2024, 3, 1), MealSlot::Dinner)
            .unwrap();
        svc.add_task("Dentist", Some(date(2024, 3, 12))).unwrap();

        let grid = svc.month_overview(2024, 3).unwrap();
        assert_eq!(grid.cell(date(2024, 3, 1)).unwrap().mark, DayMark::Both);
        assert_eq!(
            grid.cell(date(2024, 3, 12)).unwrap().mark,
            DayMark::TaskOnly
        );
        assert_eq!(grid.cell(date(2024, 3, 2)).unwrap().mark, DayMark::None);
    }

    #[test]
    fn test_month_overview_rejects_bad_month() {
        let svc = DaybookService::new_in_memory().unwrap();
        assert!(matches!(
            svc.month_overview(2024, 13),
            Err(Error::InvalidMonth { .. })
        ));
    }
}
