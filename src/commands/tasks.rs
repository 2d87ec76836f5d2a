// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{optional, required};
use crate::import::import_tasks;
use crate::models::{NewTask, Priority, Task, TaskEdit};
use crate::storage::TaskStorage;
use crate::todo::{TaskFilter, TaskList};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(storage: &TaskStorage, m: &clap::ArgMatches) -> Result<()> {
    let mut list = storage.load()?;
    let changed = match m.subcommand() {
        Some(("add", sub)) => {
            let t = list.add(NewTask {
                task: required(sub, "task")?.to_string(),
                category: required(sub, "category")?.to_string(),
                priority: optional(sub, "priority").unwrap_or_default(),
            })?;
            println!("Added task #{} '{}' [{}]", t.id, t.task, t.priority);
            true
        }
        Some(("list", sub)) => {
            list_tasks(&list, sub)?;
            false
        }
        Some(("toggle", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            let done = list.toggle(id)?;
            println!(
                "Task #{} marked {}",
                id,
                if done { "done" } else { "pending" }
            );
            true
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            let t = list.edit(
                id,
                TaskEdit {
                    task: optional(sub, "task"),
                    category: optional(sub, "category"),
                    priority: optional(sub, "priority"),
                },
            )?;
            println!("Updated task #{} '{}' [{}] ({})", t.id, t.task, t.priority, t.category);
            true
        }
        Some(("rm", sub)) => {
            let ids: Vec<i64> = sub.get_many::<i64>("id").into_iter().flatten().copied().collect();
            println!("Deleted {} task(s)", list.delete(ids));
            true
        }
        Some(("clear", _)) => {
            println!("Deleted {} task(s)", list.clear());
            true
        }
        Some(("import", sub)) => {
            let path = required(sub, "path")?.trim();
            let n = import_tasks(Path::new(path), &mut list)
                .with_context(|| format!("Failed to import {}", path))?;
            println!("Imported {} tasks from {}", n, path);
            true
        }
        _ => false,
    };
    if changed {
        storage.save(&list)?;
        let totals = list.aggregate_totals();
        println!("{} done, {} pending", totals.done, totals.pending);
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TaskFilter> {
    let priority = optional(sub, "priority")
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<Priority>())
        .transpose()?;
    let done = if sub.get_flag("done") {
        Some(true)
    } else if sub.get_flag("pending") {
        Some(false)
    } else {
        None
    };
    Ok(TaskFilter {
        search: optional(sub, "search"),
        category: optional(sub, "category"),
        priority,
        done,
    })
}

fn list_tasks(list: &TaskList, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_args(sub)?;
    let data: Vec<&Task> = list.filter(&filter);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                if t.done { "x" } else { " " }.to_string(),
                t.task.clone(),
                t.category.clone(),
                t.priority.to_string(),
                t.created.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Done", "Task", "Category", "Priority", "Created"], rows)
    );
    Ok(())
}
