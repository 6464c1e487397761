use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    // Stored as given, never echoed back to clients
    #[serde(skip)]
    pub password: Option<String>,
}

/// Body of `POST /api/users`.
///
/// Fields are optional at the serde level so that a missing field surfaces
/// as `IncompleteData` instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `PUT /api/users/{id}`. Name and email are required on every update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Normalized user fields handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

impl NewUser {
    /// Trims the name and lowercases the email. Password is kept verbatim.
    pub fn normalized(name: &str, email: &str, password: Option<String>) -> Self {
        NewUser {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password,
        }
    }
}
