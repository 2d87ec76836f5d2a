// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The to-do list: tasks with a category, a priority and a done flag.

use crate::error::{Error, Result};
use crate::ledger::{has_room, next_after, resume_id};
use crate::models::{NewTask, Priority, Task, TaskEdit, TaskTotals};
use chrono::{Local, NaiveDateTime, Timelike};
use std::collections::HashSet;
use tracing::debug;

/// Categories offered by the front end. Tasks may use any non-empty name.
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Work", "Personal", "Study", "Shopping", "Other"];

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring of the task text.
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub done: Option<bool>,
}

impl TaskFilter {
    pub fn matches(&self, t: &Task) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !t.task.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(cat) = self.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if t.category != cat {
                return false;
            }
        }
        if self.priority.is_some_and(|p| p != t.priority) {
            return false;
        }
        if self.done.is_some_and(|d| d != t.done) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: i64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn from_parts(tasks: Vec<Task>, next_id: Option<i64>) -> Result<Self> {
        Ok(Self {
            next_id: resume_id(tasks.iter().map(|t| t.id), next_id)?,
            tasks,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, input: NewTask) -> Result<Task> {
        let now = Local::now().naive_local();
        self.add_at(input, now.with_nanosecond(0).unwrap_or(now))
    }

    /// Like [`TaskList::add`] with an explicit creation time.
    pub fn add_at(&mut self, input: NewTask, created: NaiveDateTime) -> Result<Task> {
        let task = required_text(&input.task, "Please enter a task")?;
        let category = required_text(&input.category, "Please select a category")?;
        let priority = match input.priority.trim() {
            "" => Priority::default(),
            p => p.parse()?,
        };
        let t = Task {
            id: self.next_id,
            task,
            category,
            priority,
            created,
            done: false,
        };
        self.push(t.clone())?;
        debug!(id = t.id, "added task");
        Ok(t)
    }

    pub(crate) fn push(&mut self, mut t: Task) -> Result<i64> {
        t.id = self.next_id;
        self.next_id = next_after(self.next_id)?;
        let id = t.id;
        self.tasks.push(t);
        Ok(id)
    }

    pub(crate) fn has_room_for(&self, n: usize) -> bool {
        has_room(self.next_id, n)
    }

    pub fn delete<I: IntoIterator<Item = i64>>(&mut self, ids: I) -> usize {
        let ids: HashSet<i64> = ids.into_iter().collect();
        let before = self.tasks.len();
        self.tasks.retain(|t| !ids.contains(&t.id));
        before - self.tasks.len()
    }

    /// Drops every task. Ids keep counting from where they were.
    pub fn clear(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    pub fn filter(&self, f: &TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| f.matches(t)).collect()
    }

    pub fn aggregate_totals(&self) -> TaskTotals {
        let done = self.tasks.iter().filter(|t| t.done).count();
        TaskTotals {
            done,
            pending: self.tasks.len() - done,
        }
    }

    /// Flips the done flag and returns the new value.
    pub fn toggle(&mut self, id: i64) -> Result<bool> {
        let t = self.find_mut(id)?;
        t.done = !t.done;
        Ok(t.done)
    }

    /// Replaces only the supplied fields. All of them are validated before
    /// any is applied.
    pub fn edit(&mut self, id: i64, edit: TaskEdit) -> Result<Task> {
        let task = edit
            .task
            .as_deref()
            .map(|s| required_text(s, "Task text can't be empty"))
            .transpose()?;
        let category = edit
            .category
            .as_deref()
            .map(|s| required_text(s, "Category can't be empty"))
            .transpose()?;
        let priority = edit
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;

        let t = self.find_mut(id)?;
        if let Some(task) = task {
            t.task = task;
        }
        if let Some(category) = category {
            t.category = category;
        }
        if let Some(priority) = priority {
            t.priority = priority;
        }
        Ok(t.clone())
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound { kind: "task", id })
    }
}

fn required_text(s: &str, msg: &str) -> Result<String> {
    match s.trim() {
        "" => Err(Error::validation(msg)),
        s => Ok(s.to_string()),
    }
}
