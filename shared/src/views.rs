//! Read-only projections of store state.
//!
//! Everything here is a pure function of the task list, the category list
//! and the current [`FilterCriteria`]; nothing is cached between calls.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::filter::FilterCriteria;
use crate::model::{Category, Task};

/// Tasks passing every predicate of `filter`, in store order.
pub fn filtered_tasks<'a>(tasks: &'a [Task], filter: &FilterCriteria) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Splits the filtered tasks into `(active, completed)`, keeping order.
pub fn partition<'a>(tasks: &'a [Task], filter: &FilterCriteria) -> (Vec<&'a Task>, Vec<&'a Task>) {
    filtered_tasks(tasks, filter)
        .into_iter()
        .partition(|task| !task.completed)
}

/// Share of completed tasks over the whole, unfiltered collection, rounded
/// half up. Zero for an empty collection.
pub fn completion_percentage(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    // round(100 * completed / total) without floating point
    ((200 * completed + total) / (2 * total)) as u8
}

pub fn category_task_count(tasks: &[Task], category_id: Uuid) -> usize {
    tasks
        .iter()
        .filter(|task| task.category_id == Some(category_id))
        .count()
}

/// Looks up a category, falling back to [`Category::uncategorized`] for
/// missing or unknown ids. Never fails.
pub fn resolve_category(categories: &[Category], category_id: Option<Uuid>) -> Cow<'_, Category> {
    category_id
        .and_then(|id| categories.iter().find(|category| category.id == id))
        .map(Cow::Borrowed)
        .unwrap_or_else(|| Cow::Owned(Category::uncategorized()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub fn stats(tasks: &[Task]) -> TaskStats {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskStats {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    Overdue,
    Upcoming(NaiveDate),
}

impl DueLabel {
    pub fn for_date(due: NaiveDate, today: NaiveDate) -> Self {
        if due == today {
            DueLabel::Today
        } else if due < today {
            DueLabel::Overdue
        } else {
            DueLabel::Upcoming(due)
        }
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Today => f.write_str("Today"),
            DueLabel::Overdue => f.write_str("Overdue"),
            DueLabel::Upcoming(date) => write!(f, "{}", date.format("%b %-d")),
        }
    }
}

pub fn due_label(task: &Task, today: NaiveDate) -> Option<DueLabel> {
    task.due_date.map(|due| DueLabel::for_date(due, today))
}
