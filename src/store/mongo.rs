//! # MongoDB Backend
//!
//! Todo collection on top of the official `mongodb` driver.
//!
//! Documents are stored with BSON dates and `ObjectId` keys:
//!
//! ```text
//! { _id: ObjectId, title, description, completed, createdAt: Date, updatedAt: Date }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::{Connector, Database, TodoCollection};

const APP_NAME: &str = "todo-api";

/// Connects with the pool and selection settings from [`StoreConfig`]
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn client_options(&self) -> StoreResult<ClientOptions> {
        let mut options = ClientOptions::parse(self.config.connection_string.as_str())
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(self.config.max_pool_size);
        options.min_pool_size = Some(self.config.min_pool_size);
        options.server_selection_timeout = Some(self.config.server_selection_timeout());

        Ok(options)
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Database = MongoDatabase;

    async fn connect(&self) -> StoreResult<MongoDatabase> {
        let options = self.client_options().await?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::connection(e.to_string()))?;
        let database = client.database(&self.config.database_name);

        // The driver connects lazily; ping so an unreachable server fails here.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        tracing::debug!(database = %self.config.database_name, "ping succeeded");

        Ok(MongoDatabase { client, database })
    }
}

/// Connected client plus the selected database
#[derive(Debug, Clone)]
pub struct MongoDatabase {
    client: Client,
    database: mongodb::Database,
}

impl MongoDatabase {
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Database for MongoDatabase {
    type Collection = MongoCollection;

    fn collection(&self, name: &str) -> MongoCollection {
        MongoCollection {
            inner: self.database.collection(name),
        }
    }
}

/// Stored representation of a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    description: String,
    completed: bool,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

impl From<NewTodo> for TodoDocument {
    fn from(todo: NewTodo) -> Self {
        Self {
            id: None,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: to_bson_date(todo.created_at),
            updated_at: to_bson_date(todo.updated_at),
        }
    }
}

impl TodoDocument {
    fn into_todo(self) -> StoreResult<Todo> {
        let id = self
            .id
            .ok_or_else(|| StoreError::corrupt("document has no _id"))?;

        Ok(Todo {
            id: TodoId::from(id),
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: from_bson_date(self.created_at)?,
            updated_at: from_bson_date(self.updated_at)?,
        })
    }
}

fn to_bson_date(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_date(dt: BsonDateTime) -> StoreResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(dt.timestamp_millis())
        .single()
        .ok_or_else(|| StoreError::corrupt(format!("date out of range: {}", dt.timestamp_millis())))
}

/// Builds the `$set` document for a partial update
fn set_fields(patch: &TodoPatch, updated_at: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.clone());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.clone());
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    set.insert("updatedAt", to_bson_date(updated_at));
    set
}

fn by_id(id: TodoId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// Handle to one MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoCollection {
    inner: Collection<TodoDocument>,
}

impl MongoCollection {
    pub fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl TodoCollection for MongoCollection {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        let cursor = self.inner.find(doc! {}).await?;
        let docs: Vec<TodoDocument> = cursor.try_collect().await?;
        docs.into_iter().map(TodoDocument::into_todo).collect()
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        self.inner
            .find_one(by_id(id))
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    async fn insert_one(&self, todo: NewTodo) -> StoreResult<TodoId> {
        let result = self.inner.insert_one(TodoDocument::from(todo)).await?;
        result
            .inserted_id
            .as_object_id()
            .map(TodoId::from)
            .ok_or_else(|| StoreError::corrupt("inserted _id is not an ObjectId"))
    }

    async fn find_one_and_update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>> {
        self.inner
            .find_one_and_update(by_id(id), doc! { "$set": set_fields(patch, updated_at) })
            .return_document(ReturnDocument::After)
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    async fn delete_one(&self, id: TodoId) -> StoreResult<u64> {
        let result = self.inner.delete_one(by_id(id)).await?;
        Ok(result.deleted_count)
    }
}
