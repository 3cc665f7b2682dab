mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    cmd_calendar, cmd_food_add, cmd_food_delete, cmd_food_list, cmd_meal_add, cmd_meal_delete,
    cmd_meal_list, cmd_spin, cmd_task_add, cmd_task_delete, cmd_task_done, cmd_task_list,
    cmd_task_undo,
};
use crate::config::Config;
use daybook_core::service::DaybookService;

#[derive(Parser)]
#[command(
    name = "daybook",
    version,
    about = "A simple personal planner CLI",
    long_about = "\n\n  ██████╗  █████╗ ██╗   ██╗██████╗  ██████╗  ██████╗ ██╗  ██╗
  ██╔══██╗██╔══██╗╚██╗ ██╔╝██╔══██╗██╔═══██╗██╔═══██╗██║ ██╔╝
  ██║  ██║███████║ ╚████╔╝ ██████╔╝██║   ██║██║   ██║█████╔╝
  ██║  ██║██╔══██║  ╚██╔╝  ██╔══██╗██║   ██║██║   ██║██╔═██╗
  ██████╔╝██║  ██║   ██║   ██████╔╝╚██████╔╝╚██████╔╝██║  ██╗
  ╚═════╝ ╚═╝  ╚═╝   ╚═╝   ╚═════╝  ╚═════╝  ╚═════╝ ╚═╝  ╚═╝
                 plan the day, spin the meal.
"
)]
struct Cli {
    /// Database file to use (default: the per-user data directory)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage the meal plan
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Spin the wheel to pick a meal
    Spin {
        /// Meal slot: breakfast, lunch, dinner
        slot: String,
        /// Date to plan for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Save the pick to the plan without prompting
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage custom foods for the spinner
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Show a month with task and meal markers
    Calendar {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Also show tasks and meals for one date
        #[arg(long)]
        day: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task
    Add {
        /// What needs doing
        description: String,
        /// Due date (YYYY-MM-DD or today/yesterday/tomorrow)
        #[arg(long)]
        due: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tasks, pending first
    List {
        /// Only tasks due on this date
        #[arg(long)]
        due: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as not done again
    Undo {
        /// Task ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Plan a food for a date and slot
    Add {
        /// Food name
        food: String,
        /// Meal slot: breakfast, lunch, dinner
        #[arg(short, long)]
        slot: String,
        /// Date to plan for (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List planned meals for a date (default: today)
    List {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a planned meal by ID
    Delete {
        /// Planned meal ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a custom food to the spinner catalog
    Add {
        /// Food name
        name: String,
        /// Meal slot: breakfast, lunch, dinner
        #[arg(short, long)]
        slot: String,
        /// Image URL to show with the food
        #[arg(long)]
        image: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List custom foods
    List {
        /// Only foods for this slot (name and image view)
        #[arg(short, long)]
        slot: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a custom food by ID
    Delete {
        /// Custom food ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db)?;
    if let Err(err) = logging::init(&config.data_dir.join("logs")) {
        eprintln!("Warning: file logging disabled: {err}");
    }
    log::debug!("using database at {}", config.db_path.display());
    let svc = DaybookService::new(&config.db_path)?;

    match cli.command {
        Commands::Task { command } => match command {
            TaskCommands::Add {
                description,
                due,
                json,
            } => cmd_task_add(&svc, &description, due, json),
            TaskCommands::List { due, json } => cmd_task_list(&svc, due, json),
            TaskCommands::Done { id, json } => cmd_task_done(&svc, id, json),
            TaskCommands::Undo { id, json } => cmd_task_undo(&svc, id, json),
            TaskCommands::Delete { id, json } => cmd_task_delete(&svc, id, json),
        },
        Commands::Meal { command } => match command {
            MealCommands::Add {
                food,
                slot,
                date,
                json,
            } => cmd_meal_add(&svc, &food, &slot, date, json),
            MealCommands::List { date, json } => cmd_meal_list(&svc, date, json),
            MealCommands::Delete { id, json } => cmd_meal_delete(&svc, id, json),
        },
        Commands::Spin {
            slot,
            date,
            save,
            json,
        } => cmd_spin(&svc, &slot, date, save, json),
        Commands::Food { command } => match command {
            FoodCommands::Add {
                name,
                slot,
                image,
                json,
            } => cmd_food_add(&svc, &name, &slot, image, json),
            FoodCommands::List { slot, json } => cmd_food_list(&svc, slot, json),
            FoodCommands::Delete { id, json } => cmd_food_delete(&svc, id, json),
        },
        Commands::Calendar { month, day, json } => cmd_calendar(&svc, month, day, json),
    }
}
