mod calendar;
mod food;
mod helpers;
mod meal;
mod task;

pub(crate) use calendar::cmd_calendar;
pub(crate) use food::{cmd_food_add, cmd_food_delete, cmd_food_list};
pub(crate) use meal::{cmd_meal_add, cmd_meal_delete, cmd_meal_list, cmd_spin};
pub(crate) use task::{cmd_task_add, cmd_task_delete, cmd_task_done, cmd_task_list, cmd_task_undo};
