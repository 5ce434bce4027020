use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Color token of the synthetic category returned for unresolvable ids.
pub const UNCATEGORIZED_COLOR: &str = "#94a3b8";
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields sent to a collaborator to create a task. Identity and creation
/// time are assigned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update of a task.
///
/// `None` leaves a field unchanged. Clearable fields are doubly optional:
/// `Some(None)` clears the value and travels over the wire as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Patch carrying a completion flip: the flag plus its matching timestamp.
    pub fn completion(completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            completed: Some(completed),
            completed_at: Some(completed.then_some(now)),
            ..Self::default()
        }
    }

    /// Pairs `completed` with its timestamp. A bare flag gets `now` or a
    /// cleared timestamp; a timestamp that disagrees with the flag, or
    /// arrives without one, is rejected.
    pub fn pair_completion(mut self, now: DateTime<Utc>) -> Result<Self, CompletionMismatch> {
        match (self.completed, self.completed_at) {
            (Some(completed), None) => self.completed_at = Some(completed.then_some(now)),
            (Some(completed), Some(at)) if completed != at.is_some() => {
                return Err(CompletionMismatch)
            }
            (None, Some(_)) => return Err(CompletionMismatch),
            _ => {}
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("completedAt must be set exactly when completed is true")]
pub struct CompletionMismatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Fallback returned by category lookup when a task references an id
    /// that is not loaded. Never persisted.
    pub fn uncategorized() -> Self {
        Self {
            id: Uuid::nil(),
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.id.is_nil()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A record kind a persistence collaborator can store.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Short name used for storage keys and URL segments.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn apply(&mut self, patch: Self::Patch);

    /// Order in which `get_all` lists records.
    fn listing_order(&self, other: &Self) -> Ordering;
}

impl Record for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;

    const KIND: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: NewTask) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category_id: draft.category_id,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: draft.completed,
            completed_at: draft.completed_at,
            created_at,
        }
    }

    fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
    }

    // Newest first.
    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Record for Category {
    type Draft = NewCategory;
    type Patch = CategoryPatch;

    const KIND: &'static str = "category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: NewCategory) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
            created_at,
        }
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    // Oldest first, so seeded categories keep their seeding order.
    fn listing_order(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.name.cmp(&other.name))
    }
}

// Present-but-null becomes `Some(None)`; an absent field stays `None` via `default`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
