//! Redis-backed collections. Each record is a JSON string under
//! `<kind>:<id>`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use redis::aio::Connection;
use redis::{AsyncCommands, Client};
use shared::{Collection, PersistenceError, PersistenceResult, Record};
use uuid::Uuid;

pub struct RedisCollection<R> {
    client: Arc<Client>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RedisCollection<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RedisCollection<R> {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    fn key(id: Uuid) -> String {
        format!("{}:{}", R::KIND, id)
    }

    fn not_found(id: Uuid) -> PersistenceError {
        PersistenceError::NotFound { kind: R::KIND, id }
    }

    async fn connection(&self) -> PersistenceResult<Connection> {
        self.client
            .get_async_connection()
            .await
            .map_err(PersistenceError::transport)
    }

    async fn load(conn: &mut Connection, key: &str) -> PersistenceResult<Option<R>> {
        let json: Option<String> = conn.get(key).await.map_err(PersistenceError::storage)?;
        json.map(|json| serde_json::from_str(&json).map_err(PersistenceError::storage))
            .transpose()
    }

    async fn store(conn: &mut Connection, record: &R) -> PersistenceResult<()> {
        let json = serde_json::to_string(record).map_err(PersistenceError::storage)?;
        let _: () = conn
            .set(Self::key(record.id()), json)
            .await
            .map_err(PersistenceError::storage)?;
        Ok(())
    }
}

#[async_trait]
impl<R: Record> Collection for RedisCollection<R> {
    type Record = R;
    type Draft = R::Draft;
    type Patch = R::Patch;

    async fn get_all(&self) -> PersistenceResult<Vec<R>> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn
            .keys(format!("{}:*", R::KIND))
            .await
            .map_err(PersistenceError::storage)?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            match Self::load(&mut conn, &key).await {
                Ok(Some(record)) => records.push(record),
                // Removed between KEYS and GET.
                Ok(None) => {}
                Err(err) => tracing::warn!(key = %key, error = %err, "Skipping unreadable record"),
            }
        }
        records.sort_by(R::listing_order);
        Ok(records)
    }

    async fn create(&self, draft: R::Draft) -> PersistenceResult<R> {
        let record = R::from_draft(Uuid::new_v4(), Utc::now(), draft);
        let mut conn = self.connection().await?;
        Self::store(&mut conn, &record).await?;
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> PersistenceResult<R> {
        let mut conn = self.connection().await?;
        let mut record = Self::load(&mut conn, &Self::key(id))
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        record.apply(patch);
        Self::store(&mut conn, &record).await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> PersistenceResult<()> {
        let mut conn = self.connection().await?;
        let deleted: usize = conn
            .del(Self::key(id))
            .await
            .map_err(PersistenceError::storage)?;
        if deleted == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
