use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};

use daybook_core::calendar::{DayCell, DayMark, MonthGrid};
use daybook_core::models::TaskStatus;
use daybook_core::service::DaybookService;

use super::helpers::{parse_date, parse_month};

pub(crate) fn cmd_calendar(
    svc: &DaybookService,
    month: Option<String>,
    day: Option<String>,
    json: bool,
) -> Result<()> {
    let focus = day.map(Some).map(parse_date).transpose()?;
    // An explicit --month wins; otherwise follow the focused day, then today.
    let (year, month) = match (month, focus) {
        (Some(raw), _) => parse_month(&raw)?,
        (None, Some(day)) => (day.year(), day.month()),
        (None, None) => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let grid = svc.month_overview(year, month)?;

    if json {
        let payload = match focus {
            Some(day) => serde_json::json!({
                "month": grid,
                "day": {
                    "date": day,
                    "tasks": svc.list_tasks_by_date(day)?,
                    "meals": svc.list_meals_by_date(day)?,
                },
            }),
            None => serde_json::to_value(&grid)?,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_grid(&grid)?;

    if let Some(day) = focus {
        print_day(svc, day)?;
    }

    Ok(())
}

fn print_grid(grid: &MonthGrid) -> Result<()> {
    let first = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .context("grid carries an invalid month")?;
    let title = first.format("%B %Y");
    println!("=== {title} ===\n");

    for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
        print!("{name:^5}");
    }
    println!();

    for week in &grid.weeks {
        for cell in week {
            match cell {
                Some(cell) => print!("{}", cell_text(cell)),
                None => print!("     "),
            }
        }
        println!();
    }

    println!("\n  ! task   + meal   * both   [n] today");
    Ok(())
}

/// Five columns per day: the number plus a one-character marker, with
/// brackets around today.
fn cell_text(cell: &DayCell) -> String {
    let day = cell.date.day();
    let mark = match cell.mark {
        DayMark::None => ' ',
        DayMark::TaskOnly => '!',
        DayMark::MealOnly => '+',
        DayMark::Both => '*',
    };
    if cell.is_today {
        format!("[{day:>2}]{mark}")
    } else {
        format!(" {day:>2} {mark}")
    }
}

fn print_day(svc: &DaybookService, day: NaiveDate) -> Result<()> {
    println!("\n--- {day} ---");

    let tasks = svc.list_tasks_by_date(day)?;
    if tasks.is_empty() {
        println!("No tasks due");
    } else {
        println!("Tasks:");
        for task in &tasks {
            let id = task.id;
            let desc = &task.description;
            let status = match task.status {
                TaskStatus::NotDone => "pending",
                TaskStatus::Done => "done",
            };
            println!("  [{id}] {desc} ({status})");
        }
    }

    let meals = svc.list_meals_by_date(day)?;
    if meals.is_empty() {
        println!("No meals planned");
    } else {
        println!("Meals:");
        for meal in &meals {
            let id = meal.id;
            let slot = meal.meal_slot;
            let name = &meal.food_name;
            println!("  {slot}: {name} (entry {id})");
        }
    }

    Ok(())
}
