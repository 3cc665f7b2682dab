use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};

/// What a calendar day carries, for rendering markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    None,
    TaskOnly,
    MealOnly,
    Both,
}

impl DayMark {
    #[must_use]
    pub fn classify(has_task: bool, has_meal: bool) -> Self {
        match (has_task, has_meal) {
            (false, false) => DayMark::None,
            (true, false) => DayMark::TaskOnly,
            (false, true) => DayMark::MealOnly,
            (true, true) => DayMark::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub has_task: bool,
    pub has_meal: bool,
    pub mark: DayMark,
    pub is_today: bool,
}

/// A month partitioned into Monday-first weeks. Cells outside the month are
/// `None`, so every week row is exactly seven columns wide.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    /// In-month cells in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.iter().filter_map(Option::as_ref))
    }

    /// The cell for a date, if it falls in this month.
    #[must_use]
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// Builds the grid for a month. `today` is a parameter so callers control the
/// today marker. Pure computation over the supplied date sets.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    task_dates: &BTreeSet<NaiveDate>,
    meal_dates: &BTreeSet<NaiveDate>,
) -> Result<MonthGrid> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidMonth { year, month })?;

    let mut weeks = Vec::new();
    let mut week: [Option<DayCell>; 7] = [None; 7];
    let mut col = first.weekday().num_days_from_monday() as usize;

    let mut date = first;
    while date.month() == month {
        let has_task = task_dates.contains(&date);
        let has_meal = meal_dates.contains(&date);
        week[col] = Some(DayCell {
            date,
            has_task,
            has_meal,
            mark: DayMark::classify(has_task, has_meal),
            is_today: date == today,
        });
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    if col > 0 {
        weeks.push(week);
    }

    Ok(MonthGrid { year, month, weeks })
}
