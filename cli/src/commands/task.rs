use anyhow::Result;
use chrono::Local;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use daybook_core::models::{Task, TaskStatus};
use daybook_core::service::DaybookService;

use super::helpers::{json_error, parse_date, truncate};

pub(crate) fn cmd_task_add(
    svc: &DaybookService,
    description: &str,
    due: Option<String>,
    json: bool,
) -> Result<()> {
    let due_date = due.map(Some).map(parse_date).transpose()?;
    let task = svc.add_task(description, due_date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        let id = task.id;
        let desc = &task.description;
        match task.due_date {
            Some(due) => println!("Added task {id}: {desc} (due {due})"),
            None => println!("Added task {id}: {desc}"),
        }
    }
    Ok(())
}

pub(crate) fn cmd_task_list(svc: &DaybookService, due: Option<String>, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct TaskRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Task")]
        description: String,
        #[tabled(rename = "Due")]
        due: String,
    }

    let tasks = match due {
        Some(date) => svc.list_tasks_by_date(parse_date(Some(date))?)?,
        None => svc.list_tasks()?,
    };

    // Pending before completed, each group most recent first.
    let (pending, done): (Vec<_>, Vec<_>) = tasks
        .into_iter()
        .partition(|task| task.status == TaskStatus::NotDone);
    let ordered: Vec<Task> = pending.into_iter().chain(done).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
        return Ok(());
    }

    if ordered.is_empty() {
        eprintln!("No tasks");
        process::exit(2);
    }

    let today = Local::now().date_naive();
    let rows: Vec<TaskRow> = ordered
        .iter()
        .map(|task| TaskRow {
            id: task.id,
            status: match task.status {
                TaskStatus::NotDone => "pending".to_string(),
                TaskStatus::Done => "done".to_string(),
            },
            description: truncate(&task.description, 40),
            due: match task.due_date {
                Some(due) if task.is_overdue(today) => format!("{due} (overdue)"),
                Some(due) => due.to_string(),
                None => "-".into(),
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..1)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

fn set_status(
    svc: &DaybookService,
    id: i64,
    status: TaskStatus,
    verb: &str,
    json: bool,
) -> Result<()> {
    if svc.set_task_status(id, status)? {
        if let Some(task) = svc.get_task(id)? {
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                let desc = &task.description;
                println!("{verb} task {id}: {desc}");
            }
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Task {id} not found")));
        } else {
            eprintln!("Task {id} not found");
        }
        process::exit(2);
    }
}

pub(crate) fn cmd_task_done(svc: &DaybookService, id: i64, json: bool) -> Result<()> {
    set_status(svc, id, TaskStatus::Done, "Completed", json)
}

pub(crate) fn cmd_task_undo(svc: &DaybookService, id: i64, json: bool) -> Result<()> {
    set_status(svc, id, TaskStatus::NotDone, "Reopened", json)
}

pub(crate) fn cmd_task_delete(svc: &DaybookService, id: i64, json: bool) -> Result<()> {
    if svc.delete_task(id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted task {id}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Task {id} not found")));
        } else {
            eprintln!("Task {id} not found");
        }
        process::exit(2);
    }
}
