//! Contract between the store and the collaborators that persist its records.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Category, CategoryPatch, NewCategory, NewTask, Task, TaskPatch};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl PersistenceError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Asynchronous CRUD over one record collection.
///
/// Implementations assign identity on `create` and fail atomically: a
/// failed call leaves no partial write behind.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Collection {
    type Record;
    type Draft;
    type Patch;

    /// Full snapshot of the collection.
    async fn get_all(&self) -> PersistenceResult<Vec<Self::Record>>;

    /// Stores a new record and returns it with its assigned id.
    async fn create(&self, draft: Self::Draft) -> PersistenceResult<Self::Record>;

    /// Applies a partial update and returns the full stored record.
    ///
    /// Fails with [`PersistenceError::NotFound`] when `id` is unknown.
    async fn update(&self, id: Uuid, patch: Self::Patch) -> PersistenceResult<Self::Record>;

    /// Fails with [`PersistenceError::NotFound`] when `id` is unknown.
    async fn delete(&self, id: Uuid) -> PersistenceResult<()>;
}

/// A collection of tasks.
pub trait TaskCollection: Collection<Record = Task, Draft = NewTask, Patch = TaskPatch> {}

impl<T> TaskCollection for T where T: Collection<Record = Task, Draft = NewTask, Patch = TaskPatch> {}

/// A collection of categories.
pub trait CategoryCollection:
    Collection<Record = Category, Draft = NewCategory, Patch = CategoryPatch>
{
}

impl<T> CategoryCollection for T where
    T: Collection<Record = Category, Draft = NewCategory, Patch = CategoryPatch>
{
}
