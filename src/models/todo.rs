use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Workflow state of a to-do item, backed by the `todo_status` enum type.
///
/// There are no automatic transitions: any state can be reached from any
/// other through an explicit update.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "todo_status")]
pub enum TodoStatus {
    #[default]
    #[serde(rename = "To Do")]
    #[sqlx(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    #[sqlx(rename = "Done")]
    Done,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [TodoStatus::ToDo, TodoStatus::InProgress, TodoStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::ToDo => "To Do",
            TodoStatus::InProgress => "In Progress",
            TodoStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TodoStatus {
    type Err = UnknownStatus;

    // Exact match only; "done" or "todo" are not accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TodoItem {
    pub id: i32,
    pub title: String,
    pub status: TodoStatus,
    pub description: Option<String>,
    /// Creation time, never updated.
    pub date: DateTime<Utc>,
}

/// Body of `POST /api/todo`.
///
/// `status` stays a raw string here so that unknown values are reported as
/// `InvalidStatus` by the validation layer rather than as a JSON error. An
/// explicit `null` status is kept apart from a missing one and rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    #[schema(example = "Tarea 1")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>, example = "To Do")]
    pub status: Option<Option<String>>,
    pub description: Option<String>,
}

/// Body of `PUT /api/todo/{id}`. Only the supplied fields are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// `null` counts as a supplied, empty title.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    /// `null` is not a valid status.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Option<String>>,
    /// Absent leaves the description alone, `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl UpdateTodoRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.description.is_none()
    }
}

// Distinguishes `"field": null` (Some(None)) from a missing field (None).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validated, normalized fields for an insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub status: TodoStatus,
    pub description: Option<String>,
}

/// Validated, normalized partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub status: Option<TodoStatus>,
    pub description: Option<Option<String>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.description.is_none()
    }
}

/// Trims a description; blank descriptions are stored as null.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_value(TodoStatus::InProgress).unwrap(),
            "In Progress"
        );
        let parsed: TodoStatus = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(parsed, TodoStatus::ToDo);
    }

    #[test]
    fn status_parsing_is_exact() {
        assert_eq!("Done".parse::<TodoStatus>(), Ok(TodoStatus::Done));
        assert!("done".parse::<TodoStatus>().is_err());
        assert!("Bad".parse::<TodoStatus>().is_err());
        assert!("".parse::<TodoStatus>().is_err());
    }

    #[test]
    fn default_status_is_to_do() {
        assert_eq!(TodoStatus::default(), TodoStatus::ToDo);
    }

    #[test]
    fn update_request_distinguishes_null_from_missing() {
        let missing: UpdateTodoRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(missing.description, None);

        let cleared: UpdateTodoRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert!(!cleared.is_empty());

        let empty: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let null_status: UpdateTodoRequest = serde_json::from_str(r#"{"status":null}"#).unwrap();
        assert_eq!(null_status.status, Some(None));
        assert!(!null_status.is_empty());
    }

    #[test]
    fn create_request_keeps_explicit_null_status() {
        let missing: CreateTodoRequest = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(missing.status, None);

        let null: CreateTodoRequest =
            serde_json::from_str(r#"{"title":"T","status":null}"#).unwrap();
        assert_eq!(null.status, Some(None));
    }

    #[test]
    fn blank_descriptions_become_null() {
        assert_eq!(normalize_description(Some("  notes ")), Some("notes".to_string()));
        assert_eq!(normalize_description(Some("   ")), None);
        assert_eq!(normalize_description(None), None);
    }
}
