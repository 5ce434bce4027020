//! TaskFlow core: the task model, the persistence contract and the store
//! that keeps tasks and categories in sync with it.
//!
//! Shared by the backend, which serves the collections over HTTP, and the
//! frontend, which drives a [`Store`] against that API.

pub mod error;
pub mod filter;
pub mod memory;
pub mod model;
pub mod persistence;
pub mod store;
pub mod views;

pub use error::{Result, StoreError};
pub use filter::{CategoryFilter, FilterCriteria, PriorityFilter};
pub use memory::MemoryCollection;
pub use model::{
    Category, CategoryPatch, CompletionMismatch, NewCategory, NewTask, Priority, Record, Task,
    TaskPatch,
};
pub use persistence::{
    CategoryCollection, Collection, PersistenceError, PersistenceResult, TaskCollection,
};
pub use store::{Snapshot, Status, Store, TaskInput};
pub use views::{DueLabel, TaskStats};
