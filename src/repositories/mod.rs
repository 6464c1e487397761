pub mod todo_repository;
pub mod user_repository;

pub use todo_repository::{PgTodoRepository, TodoRepository};
pub use user_repository::{PgUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Maps unique-constraint violations to `AlreadyExists`, everything else to
/// `Database`.
pub(crate) fn classify(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::AlreadyExists,
        _ => RepositoryError::Database(err),
    }
}
