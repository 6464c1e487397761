use crate::error::{ErrorResponse, Result};
use crate::handlers::{ApiJson, ValidId};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "Usuario creado exitosamente")]
    pub message: String,
    pub user: User,
}

impl UserResponse {
    fn new(message: &str, user: User) -> Json<Self> {
        Json(UserResponse {
            message: message.to_string(),
            user,
        })
    }
}

/// GET /api/users - All users ordered by id
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users ordered by id", body = [User]),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_users().await?))
}

/// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<User>> {
    Ok(Json(state.user_service.get_user(id).await?))
}

/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing name or email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(request).await?;
    Ok((
        StatusCode::CREATED,
        UserResponse::new("Usuario creado exitosamente", user),
    ))
}

/// PUT /api/users/{id} - Name and email are required; an omitted password is
/// kept
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid id or missing fields", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 409, description = "Email owned by another user", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.user_service.update_user(id, request).await?;
    Ok(UserResponse::new("Usuario actualizado exitosamente", user))
}

/// DELETE /api/users/{id} - Responds with the deleted row
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<UserResponse>> {
    let user = state.user_service.delete_user(id).await?;
    Ok(UserResponse::new("Usuario eliminado exitosamente", user))
}
