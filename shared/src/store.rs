//! The task & category store.
//!
//! Owns the in-memory copy of every task and category, runs each command
//! against the persistence collaborators and applies the confirmed result.
//! State is only ever changed after a collaborator call succeeds, so a
//! failed command leaves nothing to roll back.
//!
//! Commands do not serialize against each other. Each one holds the state
//! lock only while reading its preconditions and while applying its result,
//! never across the collaborator round trip. Two commands racing on the
//! same task id resolve as "last response wins".

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, Utc};
use futures::future;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::filter::{CategoryFilter, FilterCriteria, PriorityFilter};
use crate::model::{Category, NewTask, Priority, Task, TaskPatch};
use crate::persistence::{CategoryCollection, PersistenceError, TaskCollection};
use crate::views::{self, TaskStats};

/// Format of due dates submitted through task forms.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Loading,
    Ready,
    Errored(PersistenceError),
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Loading => "loading",
            Status::Ready => "ready",
            Status::Errored(_) => "errored",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Status::Ready)
    }

    pub fn error(&self) -> Option<&PersistenceError> {
        match self {
            Status::Errored(err) => Some(err),
            _ => None,
        }
    }
}

/// Everything the presentation layer renders from, copied out of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub status: Status,
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub filter: FilterCriteria,
}

impl Snapshot {
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        views::filtered_tasks(&self.tasks, &self.filter)
    }

    pub fn active_tasks(&self) -> Vec<&Task> {
        views::partition(&self.tasks, &self.filter).0
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        views::partition(&self.tasks, &self.filter).1
    }

    pub fn completion_percentage(&self) -> u8 {
        views::completion_percentage(&self.tasks)
    }

    pub fn category_task_count(&self, category_id: Uuid) -> usize {
        views::category_task_count(&self.tasks, category_id)
    }

    pub fn resolve_category(&self, category_id: Option<Uuid>) -> Cow<'_, Category> {
        views::resolve_category(&self.categories, category_id)
    }

    pub fn stats(&self) -> TaskStats {
        views::stats(&self.tasks)
    }

    pub fn find_task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Category a new task lands in when the caller picked none: the
    /// selected category if it exists, else the first known one.
    fn default_category(&self) -> Option<Uuid> {
        self.filter
            .selected_category
            .selected()
            .filter(|id| self.categories.iter().any(|category| category.id == *id))
            .or_else(|| self.categories.first().map(|category| category.id))
    }
}

/// Task fields as submitted by a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub priority: Option<Priority>,
    /// `YYYY-MM-DD`, or empty for no due date.
    pub due_date: String,
}

impl TaskInput {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Prefills an edit form from a stored task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category_id: task.category_id,
            priority: Some(task.priority),
            due_date: task
                .due_date
                .map(|date| date.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    fn title(&self) -> Result<String> {
        normalize_title(&self.title)
    }

    fn due_date(&self) -> Result<Option<NaiveDate>> {
        parse_due_date(&self.due_date)
    }
}

fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation("title must not be empty"));
    }
    Ok(trimmed.to_string())
}

pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|err| StoreError::validation(format!("invalid due date {value:?}: {err}")))
}

pub struct Store<T, C> {
    tasks: Arc<T>,
    categories: Arc<C>,
    state: Arc<RwLock<Snapshot>>,
}

impl<T, C> Clone for Store<T, C> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            categories: Arc::clone(&self.categories),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, C> fmt::Debug for Store<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Store")
            .field("status", &state.status)
            .field("tasks", &state.tasks.len())
            .field("categories", &state.categories.len())
            .field("filter", &state.filter)
            .finish_non_exhaustive()
    }
}

impl<T, C> Store<T, C> {
    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Queries ==========

    pub fn status(&self) -> Status {
        self.read().status.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.read().status.is_ready()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    pub fn filter(&self) -> FilterCriteria {
        self.read().filter.clone()
    }

    pub fn find_task(&self, id: Uuid) -> Option<Task> {
        self.read().find_task(id).cloned()
    }

    pub fn filtered_tasks(&self) -> Vec<Task> {
        self.read().filtered_tasks().into_iter().cloned().collect()
    }

    pub fn active_tasks(&self) -> Vec<Task> {
        self.read().active_tasks().into_iter().cloned().collect()
    }

    pub fn completed_tasks(&self) -> Vec<Task> {
        self.read().completed_tasks().into_iter().cloned().collect()
    }

    pub fn completion_percentage(&self) -> u8 {
        self.read().completion_percentage()
    }

    pub fn category_task_count(&self, category_id: Uuid) -> usize {
        self.read().category_task_count(category_id)
    }

    pub fn resolve_category(&self, category_id: Option<Uuid>) -> Category {
        self.read().resolve_category(category_id).into_owned()
    }

    pub fn stats(&self) -> TaskStats {
        self.read().stats()
    }

    // ========== Filter commands ==========

    pub fn set_selected_category(&self, selected: impl Into<CategoryFilter>) {
        self.write().filter.selected_category = selected.into();
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.write().filter.search_query = query.into();
    }

    pub fn set_priority_filter(&self, priority: impl Into<PriorityFilter>) {
        self.write().filter.priority_filter = priority.into();
    }

    // ========== Preconditions ==========

    fn ensure_ready(&self) -> Result<()> {
        let state = self.read();
        if state.status.is_ready() {
            Ok(())
        } else {
            Err(StoreError::NotReady(state.status.label()))
        }
    }

    fn existing(&self, id: Uuid) -> Result<Task> {
        self.read()
            .find_task(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

impl<T, C> Store<T, C>
where
    T: TaskCollection,
    C: CategoryCollection,
{
    pub fn new(tasks: T, categories: C) -> Self {
        Self {
            tasks: Arc::new(tasks),
            categories: Arc::new(categories),
            state: Arc::new(RwLock::new(Snapshot::default())),
        }
    }

    /// Loads both collections concurrently and replaces in-memory state.
    ///
    /// If either read fails the store becomes `Errored` and exposes no
    /// tasks or categories at all. Calling `load` again retries.
    pub async fn load(&self) -> Result<()> {
        self.write().status = Status::Loading;

        let (tasks, categories) =
            future::join(self.tasks.get_all(), self.categories.get_all()).await;

        let mut state = self.write();
        match tasks.and_then(|tasks| categories.map(|categories| (tasks, categories))) {
            Ok((tasks, categories)) => {
                info!(
                    tasks = tasks.len(),
                    categories = categories.len(),
                    "Store loaded"
                );
                state.tasks = tasks;
                state.categories = categories;
                state.status = Status::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Failed to load tasks and categories");
                state.tasks.clear();
                state.categories.clear();
                state.status = Status::Errored(err.clone());
                Err(err.into())
            }
        }
    }

    /// Creates a task and prepends the stored record.
    pub async fn create_task(&self, input: TaskInput) -> Result<Task> {
        self.ensure_ready()?;
        let title = input.title()?;
        let due_date = input.due_date()?;
        let category_id = input
            .category_id
            .or_else(|| self.read().default_category());

        let draft = NewTask {
            title,
            description: input.description,
            category_id,
            priority: input.priority.unwrap_or_default(),
            due_date,
            completed: false,
            completed_at: None,
        };

        let task = self
            .tasks
            .create(draft)
            .await
            .map_err(|err| failed("create", None, err))?;

        let mut state = self.write();
        state.tasks.retain(|existing| existing.id != task.id);
        state.tasks.insert(0, task.clone());
        debug!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Creates a task from a title alone, with every other field defaulted.
    pub async fn quick_add(&self, title: impl Into<String>) -> Result<Task> {
        self.create_task(TaskInput::titled(title)).await
    }

    /// Sends a partial update and replaces the in-memory task with the
    /// collaborator's response.
    pub async fn update_task(&self, id: Uuid, mut patch: TaskPatch) -> Result<Task> {
        self.ensure_ready()?;
        self.existing(id)?;
        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(normalize_title(title)?);
        }
        let patch = patch
            .pair_completion(Utc::now())
            .map_err(|err| StoreError::validation(err.to_string()))?;

        let task = self
            .tasks
            .update(id, patch)
            .await
            .map_err(|err| failed("update", Some(id), err))?;

        let mut state = self.write();
        match state.tasks.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = task.clone();
                debug!(task_id = %id, "Task updated");
            }
            // Deleted while the update was in flight; do not resurrect it.
            None => debug!(task_id = %id, "Updated task no longer present"),
        }
        Ok(task)
    }

    /// Saves an edit form: every editable field is replaced by the input.
    pub async fn edit_task(&self, id: Uuid, input: TaskInput) -> Result<Task> {
        let patch = TaskPatch {
            title: Some(input.title()?),
            due_date: Some(input.due_date()?),
            category_id: Some(input.category_id),
            priority: Some(input.priority.unwrap_or_default()),
            description: Some(input.description),
            ..TaskPatch::default()
        };
        self.update_task(id, patch).await
    }

    /// Flips completion. Toggling twice restores `completed` but leaves
    /// `completed_at` cleared rather than restoring the old timestamp.
    pub async fn toggle_task(&self, id: Uuid) -> Result<Task> {
        self.ensure_ready()?;
        let current = self.existing(id)?;
        let patch = TaskPatch::completion(!current.completed, Utc::now());
        self.update_task(id, patch).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        self.ensure_ready()?;
        self.existing(id)?;

        self.tasks
            .delete(id)
            .await
            .map_err(|err| failed("delete", Some(id), err))?;

        self.write().tasks.retain(|task| task.id != id);
        debug!(task_id = %id, "Task deleted");
        Ok(())
    }

    /// Deletes every completed task, one independent delete per task.
    ///
    /// Returns the outcome for each task; a failed delete leaves only that
    /// task in place.
    pub async fn clear_completed(&self) -> Result<Vec<(Uuid, Result<()>)>> {
        self.ensure_ready()?;
        let ids: Vec<Uuid> = self
            .read()
            .tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.id)
            .collect();

        let outcomes = future::join_all(ids.iter().map(|id| self.delete_task(*id))).await;
        Ok(ids.into_iter().zip(outcomes).collect())
    }
}

fn failed(operation: &'static str, id: Option<Uuid>, err: PersistenceError) -> StoreError {
    match id {
        Some(id) => warn!(task_id = %id, error = %err, "Task {} failed", operation),
        None => warn!(error = %err, "Task {} failed", operation),
    }
    StoreError::Persistence(err)
}
