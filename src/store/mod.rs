//! # Document Store
//!
//! Abstraction over the document database holding todos.
//!
//! Handlers never open connections themselves: they go through a
//! [`ConnectionProvider`], which connects once via a [`Connector`] and
//! hands out the memoized [`Database`] handle from then on.
//!
//! Two backends are provided:
//! - [`mongo`]: MongoDB through the official driver
//! - [`memory`]: process-local store for development and tests

pub mod config;
pub mod errors;
pub mod memory;
pub mod mongo;
pub mod provider;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryCollection, MemoryConnector, MemoryDatabase};
pub use mongo::{MongoCollection, MongoConnector, MongoDatabase};
pub use provider::ConnectionProvider;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// Establishes a connection to a backend.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Database: Database;

    /// Connect and select the configured database
    async fn connect(&self) -> StoreResult<Self::Database>;
}

/// A connected database handle. Cheap to clone.
pub trait Database: Clone + Send + Sync + 'static {
    type Collection: TodoCollection;

    /// Name-indexed collection accessor, not cached
    fn collection(&self, name: &str) -> Self::Collection;
}

/// The operations handlers perform against a todo collection.
///
/// Each call is a single store round trip.
#[async_trait]
pub trait TodoCollection: Send + Sync {
    /// Every record, unfiltered, in natural order
    async fn find_all(&self) -> StoreResult<Vec<Todo>>;

    /// Look up one record
    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>>;

    /// Insert a record and return the id the store assigned
    async fn insert_one(&self, todo: NewTodo) -> StoreResult<TodoId>;

    /// Atomically set the patch fields plus `updatedAt` and return the
    /// post-update record, or `None` if nothing matched
    async fn find_one_and_update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>>;

    /// Delete by id, returning how many records were removed
    async fn delete_one(&self, id: TodoId) -> StoreResult<u64>;
}
