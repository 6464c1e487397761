use crate::error::{ErrorResponse, Result};
use crate::handlers::{ApiJson, ValidId};
use crate::models::{CreateTodoRequest, TodoItem, UpdateTodoRequest};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /api/todo/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoEnvelope {
    pub todo: TodoItem,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    #[schema(example = "Tarea creada exitosamente")]
    pub message: String,
    pub todo: TodoItem,
}

impl TodoResponse {
    fn new(message: &str, todo: TodoItem) -> Json<Self> {
        Json(TodoResponse {
            message: message.to_string(),
            todo,
        })
    }
}

/// GET /api/todo - All items ordered by id
#[utoipa::path(
    get,
    path = "/api/todo",
    tag = "todo",
    responses(
        (status = 200, description = "Items ordered by id", body = [TodoItem]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>> {
    Ok(Json(state.todo_service.list_todos().await?))
}

/// GET /api/todo/{id}
#[utoipa::path(
    get,
    path = "/api/todo/{id}",
    tag = "todo",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = TodoEnvelope),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<TodoEnvelope>> {
    let todo = state.todo_service.get_todo(id).await?;
    Ok(Json(TodoEnvelope { todo }))
}

/// POST /api/todo - Status defaults to "To Do"
#[utoipa::path(
    post,
    path = "/api/todo",
    tag = "todo",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Item created", body = TodoResponse),
        (status = 400, description = "Missing title or invalid status", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>)> {
    let todo = state.todo_service.create_todo(request).await?;
    Ok((
        StatusCode::CREATED,
        TodoResponse::new("Tarea creada exitosamente", todo),
    ))
}

/// PUT /api/todo/{id} - Partial update, only the supplied fields change
#[utoipa::path(
    put,
    path = "/api/todo/{id}",
    tag = "todo",
    params(("id" = i32, Path, description = "Item id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Item updated", body = TodoResponse),
        (status = 400, description = "Invalid id, empty payload or invalid status", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>> {
    let todo = state.todo_service.update_todo(id, request).await?;
    Ok(TodoResponse::new("Tarea actualizada exitosamente", todo))
}

/// DELETE /api/todo/{id} - Responds with the deleted row
#[utoipa::path(
    delete,
    path = "/api/todo/{id}",
    tag = "todo",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted", body = TodoResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<TodoResponse>> {
    let todo = state.todo_service.delete_todo(id).await?;
    Ok(TodoResponse::new("Tarea eliminada exitosamente", todo))
}
