//! # In-Memory Store
//!
//! Process-local backend for development and tests.
//!
//! Records are kept in insertion order, mirroring a MongoDB collection's
//! natural order for a fresh collection. Updates run read-modify-write under
//! one write lock, so no intermediate state is ever visible.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

use super::errors::{StoreError, StoreResult};
use super::{Connector, Database, TodoCollection};

/// Connector that always succeeds and hands out the same shared database
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    database: MemoryDatabase,
    connects: Arc<AtomicUsize>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The database every connect returns (for inspection in tests)
    pub fn database(&self) -> MemoryDatabase {
        self.database.clone()
    }

    /// How many times `connect` has been called
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Database = MemoryDatabase;

    async fn connect(&self) -> StoreResult<MemoryDatabase> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.database.clone())
    }
}

/// Shared handle to a set of named in-memory collections
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    collections: Arc<RwLock<HashMap<String, Arc<CollectionState>>>>,
}

impl Database for MemoryDatabase {
    type Collection = MemoryCollection;

    fn collection(&self, name: &str) -> MemoryCollection {
        if let Ok(collections) = self.collections.read() {
            if let Some(state) = collections.get(name) {
                return MemoryCollection {
                    state: state.clone(),
                };
            }
        }

        let mut collections = match self.collections.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let state = collections.entry(name.to_string()).or_default().clone();
        MemoryCollection { state }
    }
}

#[derive(Debug, Default)]
struct CollectionState {
    records: RwLock<Vec<Todo>>,
    operations: AtomicUsize,
}

/// Handle to one in-memory collection
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    state: Arc<CollectionState>,
}

impl MemoryCollection {
    /// Number of stored records
    pub fn len(&self) -> usize {
        self.state.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of store operations issued against this collection
    pub fn operation_count(&self) -> usize {
        self.state.operations.load(Ordering::SeqCst)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Todo>>> {
        self.state.operations.fetch_add(1, Ordering::SeqCst);
        self.state
            .records
            .read()
            .map_err(|_| StoreError::operation("in-memory collection lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Todo>>> {
        self.state.operations.fetch_add(1, Ordering::SeqCst);
        self.state
            .records
            .write()
            .map_err(|_| StoreError::operation("in-memory collection lock poisoned"))
    }
}

#[async_trait]
impl TodoCollection for MemoryCollection {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_one(&self, todo: NewTodo) -> StoreResult<TodoId> {
        let id = TodoId::new();
        self.write()?.push(Todo::from_new(id, todo));
        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>> {
        let mut records = self.write()?;
        Ok(records.iter_mut().find(|t| t.id == id).map(|todo| {
            patch.apply(todo, updated_at);
            todo.clone()
        }))
    }

    async fn delete_one(&self, id: TodoId) -> StoreResult<u64> {
        let mut records = self.write()?;
        match records.iter().position(|t| t.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
