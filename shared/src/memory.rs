//! In-process collection, used when no external storage is configured.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::model::Record;
use crate::persistence::{Collection, PersistenceError, PersistenceResult};

#[derive(Debug)]
pub struct MemoryCollection<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for MemoryCollection<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<R: Record> MemoryCollection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection pre-populated with already identified records.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: Uuid) -> Option<R> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    fn not_found(id: Uuid) -> PersistenceError {
        PersistenceError::NotFound { kind: R::KIND, id }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<R: Record> Collection for MemoryCollection<R> {
    type Record = R;
    type Draft = R::Draft;
    type Patch = R::Patch;

    async fn get_all(&self) -> PersistenceResult<Vec<R>> {
        let mut records = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        records.sort_by(R::listing_order);
        Ok(records)
    }

    async fn create(&self, draft: R::Draft) -> PersistenceResult<R> {
        let record = R::from_draft(Uuid::new_v4(), Utc::now(), draft);
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> PersistenceResult<R> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        record.apply(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> PersistenceResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
