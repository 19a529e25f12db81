use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use todo_service::{NewTodo, Todo, TodoPatch};
use tracing::info;

use crate::errors::ApiError;
use crate::observability::record_request;
use crate::state::AppState;

pub const COLLECTION_ALLOW: &str = "GET, POST";
pub const ITEM_ALLOW: &str = "GET, PUT, PATCH, DELETE";

#[derive(Serialize, Debug)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Serialize, Debug)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

/// Decode a JSON request body. An empty body or a bare `null` counts as `{}`.
fn decode_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let parsed: Option<T> =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    Ok(parsed.unwrap_or_default())
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>) -> Json<TodoList> {
    record_request("list");
    let todos = state.store.list().await;
    Json(TodoList { todos })
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoEnvelope>), ApiError> {
    record_request("create");
    let input: NewTodo = decode_body(&body)?;
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required"));
    }
    let todo = state.store.add(input).await?;
    info!(id = %todo.id, backend = state.store.backend(), "created todo");
    Ok((StatusCode::CREATED, Json(TodoEnvelope { todo })))
}

/// GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    record_request("get");
    match state.store.get(&id).await {
        Some(todo) => Ok(Json(TodoEnvelope { todo })),
        None => Err(ApiError::NotFound),
    }
}

/// PUT|PATCH /api/todos/:id. Omitted fields keep their values for both verbs.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<TodoEnvelope>, ApiError> {
    record_request("update");
    let patch: TodoPatch = decode_body(&body)?;
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ApiError::Validation("Title cannot be empty"));
    }
    match state.store.update(&id, patch).await? {
        Some(todo) => {
            info!(id = %todo.id, completed = todo.completed, "updated todo");
            Ok(Json(TodoEnvelope { todo }))
        }
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    record_request("delete");
    if state.store.delete(&id).await? {
        info!(%id, "deleted todo");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn collection_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed(COLLECTION_ALLOW)
}

pub async fn item_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed(ITEM_ALLOW)
}
