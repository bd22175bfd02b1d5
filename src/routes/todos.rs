//! Todo API routes
//!
//! Every handler takes `AuthUser`, so nothing here runs without a
//! verified identity, and the owner of every operation is the
//! authenticated user, never a value from the request body or path.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::TodoRecord;
use crate::services::{TodoService, UpdateTodoInput};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", patch(update_todo).delete(delete_todo))
}

/// New todo request
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

/// Patch request; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Todo as serialized to clients. The owner id is intentionally not
/// part of this shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRecord> for TodoResponse {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            completed: record.completed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Deletion confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/todos - list the authenticated user's todos, newest first
async fn list_todos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = TodoService::list(state.db(), auth.user_id).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /api/todos - create a todo owned by the authenticated user
async fn create_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    let todo = TodoService::create(state.db(), auth.user_id, &req.title).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// PATCH /api/todos/:id - partially update one of the user's todos
async fn update_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(todo_id): Path<Uuid>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let input = UpdateTodoInput {
        title: req.title,
        completed: req.completed,
    };
    let todo = TodoService::update(state.db(), auth.user_id, todo_id, input).await?;
    Ok(Json(todo.into()))
}

/// DELETE /api/todos/:id - delete one of the user's todos
async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(todo_id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    TodoService::delete(state.db(), auth.user_id, todo_id).await?;
    Ok(Json(DeleteResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_response_is_camel_case_and_omits_owner() {
        let record = TodoRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "buy milk".to_string(),
            completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let owner = record.user_id.to_string();
        let json = serde_json::to_string(&TodoResponse::from(record)).unwrap();

        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
        assert!(!json.contains("userId"));
        assert!(!json.contains(&owner));
    }
}
