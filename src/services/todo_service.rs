use crate::error::{AppError, Resource, Result};
use crate::models::todo::normalize_description;
use crate::models::{CreateTodoRequest, NewTodo, TodoChanges, TodoItem, UpdateTodoRequest};
use crate::repositories::TodoRepository;
use crate::validation::{validate_has_update, validate_required, validate_status_field};
use std::sync::Arc;
use tracing::info;

pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        Ok(self.repository.list_todos().await?)
    }

    pub async fn get_todo(&self, id: i32) -> Result<TodoItem> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Todo, id))
    }

    pub async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoItem> {
        validate_required(&[("title", request.title.as_deref())])?;
        let status =
            validate_status_field(request.status.as_ref().map(Option::as_deref))?.unwrap_or_default();

        let todo = NewTodo {
            title: request.title.as_deref().unwrap_or_default().trim().to_string(),
            status,
            description: normalize_description(request.description.as_deref()),
        };

        let created = self.repository.create_todo(&todo).await?;
        info!("Created todo {} ({})", created.id, created.status);
        Ok(created)
    }

    pub async fn update_todo(&self, id: i32, request: UpdateTodoRequest) -> Result<TodoItem> {
        let changes = changes_from(request)?;

        let updated = self
            .repository
            .update_todo(id, &changes)
            .await?
            .ok_or(AppError::NotFound(Resource::Todo, id))?;

        info!("Updated todo {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: i32) -> Result<TodoItem> {
        let deleted = self
            .repository
            .delete_todo(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Todo, id))?;

        info!("Deleted todo {}", deleted.id);
        Ok(deleted)
    }
}

/// Validates an update payload and normalizes each supplied field the same
/// way `create_todo` does.
fn changes_from(request: UpdateTodoRequest) -> Result<TodoChanges> {
    validate_has_update(&[
        request.title.is_some(),
        request.status.is_some(),
        request.description.is_some(),
    ])?;
    let status = validate_status_field(request.status.as_ref().map(Option::as_deref))?;

    let title = match request.title {
        Some(title) => {
            validate_required(&[("title", title.as_deref())])?;
            title.map(|title| title.trim().to_string())
        }
        None => None,
    };

    Ok(TodoChanges {
        title,
        status,
        description: request
            .description
            .map(|description| normalize_description(description.as_deref())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoStatus;
    use crate::repositories::todo_repository::MockTodoRepository;
    use chrono::Utc;

    fn item(id: i32, todo: &NewTodo) -> TodoItem {
        TodoItem {
            id,
            title: todo.title.clone(),
            status: todo.status,
            description: todo.description.clone(),
            date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_todo_defaults_status() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_create_todo()
            .withf(|todo| {
                todo.title == "Tarea 1"
                    && todo.status == TodoStatus::ToDo
                    && todo.description.is_none()
            })
            .times(1)
            .returning(|todo| Ok(item(1, todo)));

        let service = TodoService::new(Arc::new(mock_repo));
        let request = CreateTodoRequest {
            title: Some("  Tarea 1 ".to_string()),
            status: None,
            description: Some("   ".to_string()),
        };

        let todo = service.create_todo(request).await.unwrap();
        assert_eq!(todo.status, TodoStatus::ToDo);
        assert_eq!(todo.title, "Tarea 1");
    }

    #[tokio::test]
    async fn test_create_todo_invalid_status_does_not_write() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_create_todo().never();

        let service = TodoService::new(Arc::new(mock_repo));
        let request = CreateTodoRequest {
            title: Some("Tarea".to_string()),
            status: Some(Some("Bad".to_string())),
            description: None,
        };

        let result = service.create_todo(request).await;
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }

    #[tokio::test]
    async fn test_create_todo_requires_title() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_create_todo().never();

        let service = TodoService::new(Arc::new(mock_repo));
        let result = service.create_todo(CreateTodoRequest::default()).await;
        assert!(matches!(result, Err(AppError::IncompleteData(_))));
    }

    #[tokio::test]
    async fn test_update_todo_empty_payload_does_not_write() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_update_todo().never();

        let service = TodoService::new(Arc::new(mock_repo));
        let result = service.update_todo(1, UpdateTodoRequest::default()).await;
        assert!(matches!(result, Err(AppError::NoUpdateData)));
    }

    #[tokio::test]
    async fn test_update_todo_invalid_status_does_not_write() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_update_todo().never();

        let service = TodoService::new(Arc::new(mock_repo));
        let request = UpdateTodoRequest {
            status: Some(Some("Bad".to_string())),
            ..Default::default()
        };
        let result = service.update_todo(1, request).await;
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }

    #[tokio::test]
    async fn test_update_todo_only_touches_supplied_fields() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo
            .expect_update_todo()
            .withf(|id, changes| {
                *id == 3
                    && changes.title.is_none()
                    && changes.status == Some(TodoStatus::Done)
                    && changes.description == Some(Some("notes".to_string()))
            })
            .times(1)
            .returning(|id, _| {
                Ok(Some(TodoItem {
                    id,
                    title: "Original".to_string(),
                    status: TodoStatus::Done,
                    description: Some("notes".to_string()),
                    date: Utc::now(),
                }))
            });

        let service = TodoService::new(Arc::new(mock_repo));
        let request = UpdateTodoRequest {
            title: None,
            status: Some(Some("Done".to_string())),
            description: Some(Some(" notes ".to_string())),
        };

        let todo = service.update_todo(3, request).await.unwrap();
        assert_eq!(todo.status, TodoStatus::Done);
    }

    #[tokio::test]
    async fn test_update_todo_missing_row() {
        let mut mock_repo = MockTodoRepository::new();
        mock_repo.expect_update_todo().returning(|_, _| Ok(None));

        let service = TodoService::new(Arc::new(mock_repo));
        let request = UpdateTodoRequest {
            title: Some(Some("New".to_string())),
            ..Default::default()
        };

        let result = service.update_todo(9999, request).await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::Todo, 9999))));
    }

    #[test]
    fn blank_title_in_update_is_incomplete() {
        let request = UpdateTodoRequest {
            title: Some(Some("   ".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            changes_from(request),
            Err(AppError::IncompleteData(_))
        ));

        let request = UpdateTodoRequest {
            title: Some(None),
            ..Default::default()
        };
        assert!(matches!(
            changes_from(request),
            Err(AppError::IncompleteData(_))
        ));
    }
}
