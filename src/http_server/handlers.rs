//! # Todo Handlers
//!
//! One handler per operation. Each validates its input, acquires a
//! collection through the connection provider, performs a single store
//! round trip (create does two: insert then read-back), and maps the
//! outcome to a status plus envelope.
//!
//! Input is validated before the store is touched, so a malformed id or a
//! missing title never costs a connection.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::{ConnectionProvider, Connector, Database, StoreError, StoreResult, TodoCollection};
use crate::todo::{timestamp_now, CreateTodoRequest, Todo, TodoId, TodoPatch};

use super::envelope::Envelope;
use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// State shared by all todo handlers
pub struct TodoState<C: Connector> {
    provider: ConnectionProvider<C>,
    collection_name: String,
}

impl<C: Connector> TodoState<C> {
    pub fn new(connector: C, collection_name: impl Into<String>) -> Self {
        Self {
            provider: ConnectionProvider::new(connector),
            collection_name: collection_name.into(),
        }
    }

    pub fn provider(&self) -> &ConnectionProvider<C> {
        &self.provider
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    async fn todos(&self) -> StoreResult<<C::Database as Database>::Collection> {
        self.provider.collection(&self.collection_name).await
    }
}

type SharedState<C> = State<Arc<TodoState<C>>>;

/// Id segment; a rejected segment (e.g. invalid UTF-8) is just a bad id
type IdParam = Result<Path<String>, PathRejection>;

/// Raw body; rejections still answer with the error envelope
type RawBody = Result<Bytes, BytesRejection>;

// ==================
// Helper Functions
// ==================

fn parse_id(param: IdParam) -> ApiResult<TodoId> {
    let Path(raw) = param.map_err(|_| ApiError::InvalidId)?;
    TodoId::parse(&raw).ok_or(ApiError::InvalidId)
}

// ==================
// Service Description
// ==================

#[derive(Debug, Serialize)]
pub struct ServiceDescription {
    pub message: &'static str,
    pub endpoints: Value,
}

/// `GET /`
pub async fn describe_service() -> Json<ServiceDescription> {
    Json(ServiceDescription {
        message: "MongoDB Todo API",
        endpoints: json!({
            "GET /todos": "Get all todos",
            "GET /todos/:id": "Get todo by ID",
            "POST /todos": "Create new todo",
            "PUT /todos/:id": "Update todo",
            "DELETE /todos/:id": "Delete todo",
        }),
    })
}

// ==================
// Todo Handlers
// ==================

/// `GET /todos`
pub async fn list_todos<C: Connector>(
    State(state): SharedState<C>,
) -> ApiResult<Json<Envelope<Vec<Todo>>>> {
    let todos = state.todos().await?.find_all().await?;
    Ok(Json(Envelope::list(todos)))
}

/// `GET /todos/:id`
pub async fn get_todo<C: Connector>(
    State(state): SharedState<C>,
    id: IdParam,
) -> ApiResult<Json<Envelope<Todo>>> {
    let id = parse_id(id)?;

    let todo = state
        .todos()
        .await?
        .find_by_id(id)
        .await?
        .ok_or(ApiError::TodoNotFound)?;

    Ok(Json(Envelope::data(todo)))
}

/// `POST /todos`
pub async fn create_todo<C: Connector>(
    State(state): SharedState<C>,
    body: RawBody,
) -> ApiResult<impl IntoResponse> {
    let request: CreateTodoRequest = serde_json::from_slice(&body?)?;
    let new_todo = request
        .into_new_todo(timestamp_now())
        .ok_or(ApiError::TitleRequired)?;

    let todos = state.todos().await?;
    let id = todos.insert_one(new_todo).await?;

    // Read back so clients see the stored form, not our local copy.
    let inserted = todos.find_by_id(id).await?.ok_or_else(|| {
        StoreError::operation(format!("inserted todo {id} could not be read back"))
    })?;

    tracing::debug!(id = %id, "todo created");
    Ok((StatusCode::CREATED, Json(Envelope::data(inserted))))
}

/// `PUT /todos/:id`
pub async fn update_todo<C: Connector>(
    State(state): SharedState<C>,
    id: IdParam,
    body: RawBody,
) -> ApiResult<Json<Envelope<Todo>>> {
    let id = parse_id(id)?;
    let patch: TodoPatch = serde_json::from_slice(&body?)?;

    let todo = state
        .todos()
        .await?
        .find_one_and_update(id, &patch, timestamp_now())
        .await?
        .ok_or(ApiError::TodoNotFound)?;

    Ok(Json(Envelope::data(todo)))
}

/// `DELETE /todos/:id`
pub async fn delete_todo<C: Connector>(
    State(state): SharedState<C>,
    id: IdParam,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(id)?;

    let deleted = state.todos().await?.delete_one(id).await?;
    if deleted == 0 {
        return Err(ApiError::TodoNotFound);
    }

    tracing::debug!(id = %id, "todo deleted");
    Ok(Json(Envelope::message("Todo deleted successfully")))
}

/// Fallback for every unmatched method or path
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConnector;

    fn state() -> Arc<TodoState<MemoryConnector>> {
        Arc::new(TodoState::new(MemoryConnector::new(), "todos"))
    }

    #[test]
    fn test_parse_id() {
        let param = |raw: &str| -> IdParam { Ok(Path(raw.to_string())) };
        assert!(parse_id(param("65a1f0c2e4b0a1b2c3d4e5f6")).is_ok());
        assert!(matches!(parse_id(param("123")), Err(ApiError::InvalidId)));
    }

    #[tokio::test]
    async fn test_invalid_id_does_not_connect() {
        let state = state();
        let result = get_todo(State(state.clone()), Ok(Path("nope".to_string()))).await;

        assert!(matches!(result, Err(ApiError::InvalidId)));
        assert!(!state.provider().is_connected());
    }

    #[tokio::test]
    async fn test_missing_title_does_not_connect() {
        let state = state();
        let result = create_todo(State(state.clone()), Ok(Bytes::from_static(b"{}"))).await;

        assert!(matches!(result, Err(ApiError::TitleRequired)));
        assert!(!state.provider().is_connected());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let Json(envelope) = list_todos(State(state())).await.unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.count, Some(0));
        assert_eq!(envelope.data.map(|d| d.len()), Some(0));
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let result = delete_todo(
            State(state()),
            Ok(Path("65a1f0c2e4b0a1b2c3d4e5f6".to_string())),
        )
        .await;
        assert!(matches!(result, Err(ApiError::TodoNotFound)));
    }

    #[tokio::test]
    async fn test_service_description_lists_endpoints() {
        let Json(description) = describe_service().await;
        assert_eq!(description.message, "MongoDB Todo API");
        assert_eq!(description.endpoints.as_object().unwrap().len(), 5);
    }
}
