use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use daybook_core::models::MealSlot;
use daybook_core::service::DaybookService;

use super::helpers::{json_error, truncate};

pub(crate) fn cmd_food_add(
    svc: &DaybookService,
    name: &str,
    slot: &str,
    image: Option<String>,
    json: bool,
) -> Result<()> {
    let slot: MealSlot = slot.parse()?;
    let food = svc.add_custom_food(name, slot, image.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&food)?);
    } else {
        let id = food.id;
        let name = &food.food_name;
        println!("Added custom food {id}: {name} ({slot})");
    }
    Ok(())
}

pub(crate) fn cmd_food_list(svc: &DaybookService, slot: Option<String>, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct ChoiceRow {
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Image")]
        image: String,
    }

    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Slot")]
        slot: String,
        #[tabled(rename = "Image")]
        image: String,
    }

    match slot {
        Some(slot) => {
            let slot: MealSlot = slot.parse()?;
            let choices = svc.custom_foods_for_slot(slot)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&choices)?);
                return Ok(());
            }

            if choices.is_empty() {
                eprintln!("No custom foods for {slot}");
                process::exit(2);
            }

            let rows: Vec<ChoiceRow> = choices
                .iter()
                .map(|choice| ChoiceRow {
                    food: truncate(&choice.food_name, 30),
                    image: choice
                        .image_url
                        .as_deref()
                        .map_or("-".into(), |url| truncate(url, 44)),
                })
                .collect();

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
        None => {
            let foods = svc.list_custom_foods()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&foods)?);
                return Ok(());
            }

            if foods.is_empty() {
                eprintln!("No custom foods");
                process::exit(2);
            }

            let rows: Vec<FoodRow> = foods
                .iter()
                .map(|food| FoodRow {
                    id: food.id,
                    food: truncate(&food.food_name, 30),
                    slot: food.meal_slot.to_string(),
                    image: food
                        .image_url
                        .as_deref()
                        .map_or("-".into(), |url| truncate(url, 44)),
                })
                .collect();

            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(..1)).with(Alignment::right()))
                .to_string();
            println!("{table}");
        }
    }

    Ok(())
}

pub(crate) fn cmd_food_delete(svc: &DaybookService, id: i64, json: bool) -> Result<()> {
    if svc.delete_custom_food(id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted custom food {id}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Custom food {id} not found")));
        } else {
            eprintln!("Custom food {id} not found");
        }
        process::exit(2);
    }
}
