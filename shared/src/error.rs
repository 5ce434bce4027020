//! Error types for store operations

use thiserror::Error;
use uuid::Uuid;

use crate::persistence::PersistenceError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Store is not ready ({0})")]
    NotReady(&'static str),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
