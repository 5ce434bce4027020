use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::model::{ParsePriorityError, Priority, Task};

/// Sentinel shared by both filter kinds for "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(Uuid),
}

impl CategoryFilter {
    /// A task passes unless an explicit category is selected and the task
    /// references a different one. Tasks with unresolvable or missing
    /// categories pass under `All`.
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => task.category_id == Some(*id),
        }
    }

    pub fn selected(&self) -> Option<Uuid> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(id) => Some(*id),
        }
    }
}

impl From<Uuid> for CategoryFilter {
    fn from(id: Uuid) -> Self {
        CategoryFilter::Category(id)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Category(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == *priority,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(priority: Priority) -> Self {
        PriorityFilter::Only(priority)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str(ALL),
            PriorityFilter::Only(priority) => priority.fmt(f),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(PriorityFilter::All);
        }
        s.parse().map(PriorityFilter::Only)
    }
}

/// View parameters applied to the task list. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub selected_category: CategoryFilter,
    pub search_query: String,
    pub priority_filter: PriorityFilter,
}

impl FilterCriteria {
    pub fn matches(&self, task: &Task) -> bool {
        self.selected_category.matches(task)
            && self.priority_filter.matches(task)
            && matches_query(task, &self.search_query)
    }
}

// Empty query never excludes; otherwise a case-insensitive substring of
// the title or the description.
fn matches_query(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
}
