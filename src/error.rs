use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::TodoStatus;
use crate::repositories::RepositoryError;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Entity kinds that can be missing, used to pick the 404 wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Todo,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    IncompleteData(Vec<&'static str>),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("No fields to update")]
    NoUpdateData,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("{0:?} {1} not found")]
    NotFound(Resource, i32),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Datos incompletos")]
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_)
            | AppError::IncompleteData(_)
            | AppError::InvalidStatus(_)
            | AppError::NoUpdateData
            | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short client-facing label, the `error` field of the envelope.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::InvalidId(_) => "ID inválido",
            AppError::IncompleteData(_) => "Datos incompletos",
            AppError::InvalidStatus(_) => "Estado inválido",
            AppError::NoUpdateData => "No hay datos para actualizar",
            AppError::MalformedBody(_) => "JSON inválido",
            AppError::NotFound(Resource::User, _) => "Usuario no encontrado",
            AppError::NotFound(Resource::Todo, _) => "Tarea no encontrada",
            AppError::DuplicateEmail => "El email ya está registrado",
            AppError::Database(_) => "Error interno del servidor",
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::InvalidId(raw) => format!("El ID '{}' debe ser un número entero", raw),
            AppError::IncompleteData(fields) => {
                format!("Campos requeridos: {}", fields.join(", "))
            }
            AppError::InvalidStatus(value) => format!(
                "El estado '{}' no es válido. Valores permitidos: {}",
                value,
                TodoStatus::ALL
                    .iter()
                    .map(TodoStatus::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            AppError::NoUpdateData => {
                "Debe proporcionar al menos un campo para actualizar".to_string()
            }
            AppError::MalformedBody(reason) => reason.clone(),
            AppError::NotFound(Resource::User, id) => {
                format!("No existe un usuario con ID {}", id)
            }
            AppError::NotFound(Resource::Todo, id) => {
                format!("No existe una tarea con ID {}", id)
            }
            AppError::DuplicateEmail => "Ya existe un usuario con ese email".to_string(),
            AppError::Database(_) => "Ocurrió un error al procesar la solicitud".to_string(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => AppError::Database(e),
            RepositoryError::AlreadyExists => AppError::DuplicateEmail,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.label().to_string(),
            message: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}
