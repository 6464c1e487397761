pub mod test_helpers {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::Router;
    use chrono::Utc;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use sqlx::PgPool;
    use tokio::sync::RwLock;

    use crate::models::{NewTodo, NewUser, TodoChanges, TodoItem, User};
    use crate::repositories::{
        RepositoryError, RepositoryResult, TodoRepository, UserRepository,
    };
    use crate::{db, routes, AppState};

    /// Connect to the database named by `TEST_DATABASE_URL`, bootstrap the
    /// schema and empty both tables.
    pub async fn create_test_db() -> Result<PgPool, sqlx::Error> {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .map_err(|_| sqlx::Error::Configuration("TEST_DATABASE_URL must be set".into()))?;

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await?;

        db::bootstrap_schema(&pool).await?;
        sqlx::query("TRUNCATE users, todo RESTART IDENTITY")
            .execute(&pool)
            .await?;

        Ok(pool)
    }

    /// A pool pointing at a closed port. Nothing connects until a query runs,
    /// and queries fail fast.
    pub fn unreachable_pool() -> PgPool {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nothing");

        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(options)
    }

    /// State over in-memory repositories; the health check reports the
    /// database as disconnected.
    pub fn in_memory_state() -> AppState {
        AppState::new(
            unreachable_pool(),
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryTodoRepository::default()),
        )
    }

    pub fn test_app() -> Router {
        routes::router(in_memory_state())
    }

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: RwLock<Vec<User>>,
        last_id: AtomicI32,
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn list_users(&self) -> RepositoryResult<Vec<User>> {
            Ok(self.users.read().await.clone())
        }

        async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
            let users = self.users.read().await;
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
            let email = email.to_lowercase();
            let users = self.users.read().await;
            Ok(users
                .iter()
                .find(|u| u.email.to_lowercase() == email)
                .cloned())
        }

        async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
            let mut users = self.users.write().await;
            let email = user.email.to_lowercase();
            if users.iter().any(|u| u.email.to_lowercase() == email) {
                return Err(RepositoryError::AlreadyExists);
            }

            let created = User {
                id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password.clone(),
            };
            users.push(created.clone());
            Ok(created)
        }

        async fn update_user(&self, id: i32, user: &NewUser) -> RepositoryResult<Option<User>> {
            let mut users = self.users.write().await;
            let email = user.email.to_lowercase();
            if users
                .iter()
                .any(|u| u.id != id && u.email.to_lowercase() == email)
            {
                return Err(RepositoryError::AlreadyExists);
            }

            Ok(users.iter_mut().find(|u| u.id == id).map(|existing| {
                existing.name = user.name.clone();
                existing.email = user.email.clone();
                if user.password.is_some() {
                    existing.password = user.password.clone();
                }
                existing.clone()
            }))
        }

        async fn delete_user(&self, id: i32) -> RepositoryResult<Option<User>> {
            let mut users = self.users.write().await;
            Ok(users
                .iter()
                .position(|u| u.id == id)
                .map(|index| users.remove(index)))
        }
    }

    #[derive(Default)]
    pub struct InMemoryTodoRepository {
        todos: RwLock<Vec<TodoItem>>,
        last_id: AtomicI32,
    }

    #[async_trait]
    impl TodoRepository for InMemoryTodoRepository {
        async fn list_todos(&self) -> RepositoryResult<Vec<TodoItem>> {
            Ok(self.todos.read().await.clone())
        }

        async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<TodoItem>> {
            let todos = self.todos.read().await;
            Ok(todos.iter().find(|t| t.id == id).cloned())
        }

        async fn create_todo(&self, todo: &NewTodo) -> RepositoryResult<TodoItem> {
            let created = TodoItem {
                id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
                title: todo.title.clone(),
                status: todo.status,
                description: todo.description.clone(),
                date: Utc::now(),
            };
            self.todos.write().await.push(created.clone());
            Ok(created)
        }

        async fn update_todo(
            &self,
            id: i32,
            changes: &TodoChanges,
        ) -> RepositoryResult<Option<TodoItem>> {
            let mut todos = self.todos.write().await;
            Ok(todos.iter_mut().find(|t| t.id == id).map(|existing| {
                if let Some(title) = &changes.title {
                    existing.title = title.clone();
                }
                if let Some(status) = changes.status {
                    existing.status = status;
                }
                if let Some(description) = &changes.description {
                    existing.description = description.clone();
                }
                existing.clone()
            }))
        }

        async fn delete_todo(&self, id: i32) -> RepositoryResult<Option<TodoItem>> {
            let mut todos = self.todos.write().await;
            Ok(todos
                .iter()
                .position(|t| t.id == id)
                .map(|index| todos.remove(index)))
        }
    }
}
