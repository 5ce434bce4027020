#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use shared::{
    Category, Collection, MemoryCollection, NewCategory, NewTask, PersistenceError,
    PersistenceResult, Priority, Record, Store, Task,
};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetAll,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Calls {
    get_all: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

impl Calls {
    fn counter(&self, op: Op) -> &AtomicUsize {
        match op {
            Op::GetAll => &self.get_all,
            Op::Create => &self.create,
            Op::Update => &self.update,
            Op::Delete => &self.delete,
        }
    }
}

/// In-memory collaborator with scripted failures and delayed responses.
pub struct ScriptedCollection<R> {
    inner: MemoryCollection<R>,
    calls: Arc<Calls>,
    failing_ops: Arc<Mutex<HashSet<Op>>>,
    failing_ids: Arc<Mutex<HashSet<Uuid>>>,
    update_gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl<R> Clone for ScriptedCollection<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            calls: Arc::clone(&self.calls),
            failing_ops: Arc::clone(&self.failing_ops),
            failing_ids: Arc::clone(&self.failing_ids),
            update_gate: Arc::clone(&self.update_gate),
        }
    }
}

impl<R: Record> ScriptedCollection<R> {
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            inner: MemoryCollection::with_records(records),
            calls: Arc::default(),
            failing_ops: Arc::default(),
            failing_ids: Arc::default(),
            update_gate: Arc::default(),
        }
    }

    pub fn inner(&self) -> &MemoryCollection<R> {
        &self.inner
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.counter(op).load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        [Op::GetAll, Op::Create, Op::Update, Op::Delete]
            .into_iter()
            .map(|op| self.calls(op))
            .sum()
    }

    /// Every later call of `op` fails with a storage error.
    pub fn fail(&self, op: Op) {
        self.failing_ops.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing_ops.lock().unwrap().remove(&op);
    }

    /// Every later update or delete of `id` fails.
    pub fn fail_for(&self, id: Uuid) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    /// The next update is applied to storage but its response is held back
    /// until the returned handle is notified.
    pub fn delay_next_update(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.update_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn enter(&self, op: Op, id: Option<Uuid>) -> PersistenceResult<()> {
        self.calls.counter(op).fetch_add(1, Ordering::SeqCst);
        let op_fails = self.failing_ops.lock().unwrap().contains(&op);
        let id_fails = id.is_some_and(|id| self.failing_ids.lock().unwrap().contains(&id));
        if op_fails || id_fails {
            return Err(PersistenceError::storage(format!("scripted {op:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> Collection for ScriptedCollection<R> {
    type Record = R;
    type Draft = R::Draft;
    type Patch = R::Patch;

    async fn get_all(&self) -> PersistenceResult<Vec<R>> {
        self.enter(Op::GetAll, None)?;
        self.inner.get_all().await
    }

    async fn create(&self, draft: R::Draft) -> PersistenceResult<R> {
        self.enter(Op::Create, None)?;
        self.inner.create(draft).await
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> PersistenceResult<R> {
        self.enter(Op::Update, Some(id))?;
        let result = self.inner.update(id, patch).await;
        let gate = self.update_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn delete(&self, id: Uuid) -> PersistenceResult<()> {
        self.enter(Op::Delete, Some(id))?;
        self.inner.delete(id).await
    }
}

pub type TestStore = Store<ScriptedCollection<Task>, ScriptedCollection<Category>>;

pub struct Fixture {
    pub store: TestStore,
    pub tasks: ScriptedCollection<Task>,
    pub categories: ScriptedCollection<Category>,
}

impl Fixture {
    pub fn new(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        let tasks = ScriptedCollection::new(tasks);
        let categories = ScriptedCollection::new(categories);
        let store = Store::new(tasks.clone(), categories.clone());
        Self {
            store,
            tasks,
            categories,
        }
    }

    pub async fn loaded(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        let fixture = Self::new(tasks, categories);
        fixture.store.load().await.expect("initial load");
        fixture
    }
}

pub fn category(name: &str, age_minutes: i64) -> Category {
    Category::from_draft(
        Uuid::new_v4(),
        Utc::now() - Duration::minutes(age_minutes),
        NewCategory {
            name: name.to_string(),
            color: "#3b82f6".to_string(),
        },
    )
}

pub fn task(title: &str, priority: Priority, category_id: Option<Uuid>, age_minutes: i64) -> Task {
    Task::from_draft(
        Uuid::new_v4(),
        Utc::now() - Duration::minutes(age_minutes),
        NewTask {
            title: title.to_string(),
            description: String::new(),
            category_id,
            priority,
            due_date: None,
            completed: false,
            completed_at: None,
        },
    )
}

pub fn completed(mut task: Task) -> Task {
    task.completed = true;
    task.completed_at = Some(Utc::now());
    task
}
