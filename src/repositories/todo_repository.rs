use crate::models::{NewTodo, TodoChanges, TodoItem};
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const TODO_COLUMNS: &str = "id, title, status, description, date";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list_todos(&self) -> RepositoryResult<Vec<TodoItem>>;
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<TodoItem>>;
    async fn create_todo(&self, todo: &NewTodo) -> RepositoryResult<TodoItem>;
    /// Touches only the fields set in `changes`. Returns `None` when no row
    /// has that id.
    async fn update_todo(
        &self,
        id: i32,
        changes: &TodoChanges,
    ) -> RepositoryResult<Option<TodoItem>>;
    async fn delete_todo(&self, id: i32) -> RepositoryResult<Option<TodoItem>>;
}

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list_todos(&self) -> RepositoryResult<Vec<TodoItem>> {
        let todos = sqlx::query_as::<_, TodoItem>(&format!(
            "SELECT {} FROM todo ORDER BY id ASC",
            TODO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<TodoItem>> {
        let todo = sqlx::query_as::<_, TodoItem>(&format!(
            "SELECT {} FROM todo WHERE id = $1",
            TODO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn create_todo(&self, todo: &NewTodo) -> RepositoryResult<TodoItem> {
        let created = sqlx::query_as::<_, TodoItem>(&format!(
            "INSERT INTO todo (title, status, description) VALUES ($1, $2, $3) RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&todo.title)
        .bind(todo.status)
        .bind(&todo.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_todo(
        &self,
        id: i32,
        changes: &TodoChanges,
    ) -> RepositoryResult<Option<TodoItem>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE todo SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(title) = &changes.title {
                assignments.push("title = ");
                assignments.push_bind_unseparated(title.clone());
            }
            if let Some(status) = changes.status {
                assignments.push("status = ");
                assignments.push_bind_unseparated(status);
            }
            if let Some(description) = &changes.description {
                assignments.push("description = ");
                assignments.push_bind_unseparated(description.clone());
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING ");
        builder.push(TODO_COLUMNS);

        let updated = builder
            .build_query_as::<TodoItem>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_todo(&self, id: i32) -> RepositoryResult<Option<TodoItem>> {
        let deleted = sqlx::query_as::<_, TodoItem>(&format!(
            "DELETE FROM todo WHERE id = $1 RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
