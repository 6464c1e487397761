use crate::models::{NewUser, User};
use crate::repositories::{classify, RepositoryResult};
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    /// Returns `None` when no row has that id. A `None` password keeps the
    /// stored one.
    async fn update_user(&self, id: i32, user: &NewUser) -> RepositoryResult<Option<User>>;
    async fn delete_user(&self, id: i32) -> RepositoryResult<Option<User>>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn update_user(&self, id: i32, user: &NewUser) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, password = COALESCE($3, password)
            WHERE id = $4
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)
    }

    async fn delete_user(&self, id: i32) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 RETURNING id, name, email, password",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
