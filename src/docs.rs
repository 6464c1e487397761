use axum::response::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::{health_handlers, todo_handlers, user_handlers};
use crate::models::{
    CreateTodoRequest, CreateUserRequest, TodoItem, TodoStatus, UpdateTodoRequest,
    UpdateUserRequest, User,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "todo-api",
        description = "CRUD API for users and to-do items"
    ),
    paths(
        health_handlers::health_check,
        user_handlers::list_users,
        user_handlers::get_user,
        user_handlers::create_user,
        user_handlers::update_user,
        user_handlers::delete_user,
        todo_handlers::list_todos,
        todo_handlers::get_todo,
        todo_handlers::create_todo,
        todo_handlers::update_todo,
        todo_handlers::delete_todo,
    ),
    components(schemas(
        User,
        CreateUserRequest,
        UpdateUserRequest,
        user_handlers::UserResponse,
        TodoItem,
        TodoStatus,
        CreateTodoRequest,
        UpdateTodoRequest,
        todo_handlers::TodoEnvelope,
        todo_handlers::TodoResponse,
        health_handlers::HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "users", description = "User management"),
        (name = "todo", description = "To-do items")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
