pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod validation;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use repositories::{PgTodoRepository, PgUserRepository, TodoRepository, UserRepository};
use services::{TodoService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub todo_service: Arc<TodoService>,
    pub pool: sqlx::PgPool,
}

impl AppState {
    /// Wires services over the given repositories. The pool is only used for
    /// health checks.
    pub fn new(
        pool: sqlx::PgPool,
        user_repository: Arc<dyn UserRepository>,
        todo_repository: Arc<dyn TodoRepository>,
    ) -> Self {
        AppState {
            user_service: Arc::new(UserService::new(user_repository)),
            todo_service: Arc::new(TodoService::new(todo_repository)),
            pool,
        }
    }

    /// State backed by PostgreSQL repositories sharing `pool`.
    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let todo_repository = Arc::new(PgTodoRepository::new(pool.clone()));
        Self::new(pool, user_repository, todo_repository)
    }
}
