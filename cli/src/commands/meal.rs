use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use daybook_core::models::MealSlot;
use daybook_core::service::DaybookService;
use daybook_core::session::Session;

use super::helpers::{SpinAction, json_error, parse_date, prompt_spin_action, truncate};

pub(crate) fn cmd_meal_add(
    svc: &DaybookService,
    food: &str,
    slot: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let slot: MealSlot = slot.parse()?;
    let date = parse_date(date)?;
    let meal = svc.add_meal(food, date, slot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        let id = meal.id;
        let name = &meal.food_name;
        let date = meal.plan_date;
        println!("Planned {name} for {slot} on {date} (entry {id})");
    }
    Ok(())
}

pub(crate) fn cmd_meal_list(svc: &DaybookService, date: Option<String>, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Slot")]
        slot: String,
        #[tabled(rename = "Food")]
        food: String,
    }

    let date = parse_date(date)?;
    let meals = svc.list_meals_by_date(date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    if meals.is_empty() {
        eprintln!("No meals planned for {date}");
        process::exit(2);
    }

    println!("=== {date} ===");
    let rows: Vec<MealRow> = meals
        .iter()
        .map(|meal| MealRow {
            id: meal.id,
            slot: meal.meal_slot.to_string(),
            food: truncate(&meal.food_name, 40),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..1)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_meal_delete(svc: &DaybookService, id: i64, json: bool) -> Result<()> {
    if svc.delete_meal(id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Removed planned meal {id}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Planned meal {id} not found")));
        } else {
            eprintln!("Planned meal {id} not found");
        }
        process::exit(2);
    }
}

pub(crate) fn cmd_spin(
    svc: &DaybookService,
    slot: &str,
    date: Option<String>,
    save: bool,
    json: bool,
) -> Result<()> {
    let slot: MealSlot = slot.parse()?;
    let date = parse_date(date)?;

    if save || json {
        let pick = svc.spin(slot)?;
        if save {
            let meal = svc.commit_pick(&pick, date, slot)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&meal)?);
            } else {
                let name = &meal.food_name;
                let id = meal.id;
                println!("The wheel landed on: {name}");
                println!("Saved for {slot} on {date} (entry {id})");
            }
        } else {
            // Print the pick without committing anything.
            println!("{}", serde_json::to_string_pretty(&pick)?);
        }
        return Ok(());
    }

    let mut session = Session::new();
    session.focus_date(date);

    loop {
        let pick = svc.spin(slot)?;
        let name = &pick.food_name;
        println!("The wheel landed on: {name}");
        if let Some(url) = &pick.image_url {
            println!("  {url}");
        }
        session.set_pick(pick);

        match prompt_spin_action()? {
            SpinAction::Save => {
                let Some(pick) = session.take_pick() else { break };
                let Some(date) = session.focused_date() else { break };
                let meal = svc.commit_pick(&pick, date, slot)?;
                let name = &meal.food_name;
                let id = meal.id;
                println!("Saved {name} for {slot} on {date} (entry {id})");
                break;
            }
            SpinAction::Respin => {}
            SpinAction::Quit => {
                println!("Nothing saved.");
                break;
            }
        }
    }

    Ok(())
}
